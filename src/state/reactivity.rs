// ============================================================================
// REACTIVITY - Shared store state with change subscribers
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub type SubscriptionId = u64;

type Callback = Rc<dyn Fn()>;

/// Shared mutable state plus a subscriber list.
/// Clones point at the same value and the same subscribers.
pub struct StoreCell<T> {
    value: Rc<RefCell<T>>,
    subscribers: Rc<RefCell<Vec<(SubscriptionId, Callback)>>>,
    next_id: Rc<Cell<SubscriptionId>>,
}

impl<T> StoreCell<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            subscribers: Rc::new(RefCell::new(Vec::new())),
            next_id: Rc::new(Cell::new(0)),
        }
    }

    /// Read access without cloning
    pub fn with<R>(&self, reader: impl FnOnce(&T) -> R) -> R {
        reader(&*self.value.borrow())
    }

    /// Mutate and notify. The borrow is released before subscribers run,
    /// so a subscriber may read the cell again.
    pub fn update<R>(&self, updater: impl FnOnce(&mut T) -> R) -> R {
        let result = updater(&mut *self.value.borrow_mut());
        self.notify();
        result
    }

    pub fn set(&self, new_value: T) {
        self.update(|value| *value = new_value);
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + 'static,
    {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.subscribers.borrow_mut().push((id, Rc::new(callback)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(sub_id, _)| *sub_id != id);
        subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    fn notify(&self) {
        // Snapshot first: a callback may subscribe or unsubscribe
        let callbacks: Vec<Callback> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, callback)| callback.clone())
            .collect();
        for callback in callbacks {
            callback();
        }
    }
}

impl<T: Clone> StoreCell<T> {
    /// Cloned snapshot of the current value
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }
}

impl<T> Clone for StoreCell<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            subscribers: self.subscribers.clone(),
            next_id: self.next_id.clone(),
        }
    }
}

impl<T: Default> Default for StoreCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
