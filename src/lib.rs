// ============================================================================
// CONTENT ADMIN - Client state layer of the admin dashboard
// ============================================================================
// - Services: HTTP only (ApiClient + one Resource per endpoint family)
// - Stores: observable state, one per concern (session, entities, feed)
// - State: Rc<RefCell> cells, token vault, app context
// - Models: records and payloads shared with the backend
// - Routing: screens and the authentication guard
// ============================================================================

pub mod config;
pub mod error;
pub mod models;
pub mod routing;
pub mod services;
pub mod state;
pub mod stores;
pub mod utils;

#[cfg(test)]
mod testing;

pub use config::AppConfig;
pub use error::{ApiError, ApiResult};
pub use routing::{Navigation, Route, RouteGuard};
pub use state::AppContext;

#[cfg(target_arch = "wasm32")]
mod entry {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;

    use crate::config::AppConfig;
    use crate::state::AppContext;

    // Single instance for the lifetime of the page
    thread_local! {
        static CONTEXT: RefCell<Option<AppContext>> = const { RefCell::new(None) };
    }

    /// Handle onto the running context, once `start` has run
    pub fn context() -> Option<AppContext> {
        CONTEXT.with(|cell| cell.borrow().clone())
    }

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        let config = AppConfig::resolve();
        if let Some(level) = config.log_level_filter().to_level() {
            wasm_logger::init(wasm_logger::Config::new(level));
        }
        log::info!("🚀 Content admin starting ({})", config.environment);

        let app = AppContext::browser(config);
        CONTEXT.with(|cell| *cell.borrow_mut() = Some(app.clone()));

        // A token left from the last visit is only trusted once the server
        // accepts it; the guard answers Pending until then
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = app.session.fetch_profile().await {
                log::info!("🔓 Starting anonymous: {}", e);
            }
        });

        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use entry::context;
