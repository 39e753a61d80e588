// Test doubles shared by the unit tests: a scripted backend and a fixed token.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;
use serde_json::Value;

use crate::services::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use crate::state::TokenSource;

pub fn block_on<F: Future>(future: F) -> F::Output {
    futures::executor::block_on(future)
}

pub struct StaticToken(pub Option<String>);

impl TokenSource for StaticToken {
    fn access_token(&self) -> Option<String> {
        self.0.clone()
    }
}

type Gate = Rc<RefCell<Option<oneshot::Receiver<()>>>>;

#[derive(Debug, Clone)]
enum Scripted {
    Reply(HttpResponse),
    /// Reply held back until the paired sender fires (or is dropped)
    Held(HttpResponse, Gate),
    NetworkDown,
}

/// Replies are queued per (method, path). The last reply of a route is
/// reused once the queue is down to one entry.
#[derive(Default)]
pub struct FakeBackend {
    routes: RefCell<HashMap<(HttpMethod, String), VecDeque<Scripted>>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl FakeBackend {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn respond(&self, method: HttpMethod, path: &str, status: u16, body: Value) {
        self.respond_raw(method, path, status, &body.to_string());
    }

    pub fn respond_raw(&self, method: HttpMethod, path: &str, status: u16, body: &str) {
        self.push(
            method,
            path,
            Scripted::Reply(HttpResponse {
                status,
                body: body.to_string(),
            }),
        );
    }

    /// Queues a reply that is only delivered once the returned sender fires
    pub fn respond_held(
        &self,
        method: HttpMethod,
        path: &str,
        status: u16,
        body: Value,
    ) -> oneshot::Sender<()> {
        let (release, gate) = oneshot::channel();
        self.push(
            method,
            path,
            Scripted::Held(
                HttpResponse {
                    status,
                    body: body.to_string(),
                },
                Rc::new(RefCell::new(Some(gate))),
            ),
        );
        release
    }

    pub fn fail_network(&self, method: HttpMethod, path: &str) {
        self.push(method, path, Scripted::NetworkDown);
    }

    fn push(&self, method: HttpMethod, path: &str, scripted: Scripted) {
        self.routes
            .borrow_mut()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(scripted);
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn count(&self, method: HttpMethod, path: &str) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|r| r.method == method && path_of(&r.url) == path)
            .count()
    }
}

fn path_of(url: &str) -> &str {
    let without_scheme = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
    match without_scheme.find('/') {
        Some(index) => &without_scheme[index..],
        None => "/",
    }
}

#[async_trait(?Send)]
impl HttpTransport for FakeBackend {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String> {
        let key = (request.method, path_of(&request.url).to_string());
        self.requests.borrow_mut().push(request);

        let scripted = {
            let mut routes = self.routes.borrow_mut();
            match routes.get_mut(&key) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };

        match scripted {
            Some(Scripted::Reply(response)) => Ok(response),
            Some(Scripted::Held(response, gate)) => {
                let pending = gate.borrow_mut().take();
                if let Some(pending) = pending {
                    let _ = pending.await;
                }
                Ok(response)
            }
            Some(Scripted::NetworkDown) => Err("connection refused".to_string()),
            None => Ok(HttpResponse {
                status: 404,
                body: format!("{{\"message\":\"no route for {} {}\"}}", key.0, key.1),
            }),
        }
    }
}
