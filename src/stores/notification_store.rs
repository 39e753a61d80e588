// ============================================================================
// NOTIFICATION STORE - In-memory feed of transient feedback
// ============================================================================
// Newest first. Nothing is persisted: a reload starts with an empty feed.
// ============================================================================

use uuid::Uuid;

use crate::models::{Notification, NotificationKind};
use crate::state::{StoreCell, SubscriptionId};

#[derive(Clone, Default)]
pub struct NotificationStore {
    notifications: StoreCell<Vec<Notification>>,
}

impl NotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepends a notification and returns its id
    pub fn add(&self, message: impl Into<String>, kind: NotificationKind, link: Option<String>) -> Uuid {
        let notification = Notification::new(message, kind, link);
        let id = notification.id;
        self.notifications.update(|list| list.insert(0, notification));
        id
    }

    pub fn success(&self, message: impl Into<String>) -> Uuid {
        self.add(message, NotificationKind::Success, None)
    }

    pub fn info(&self, message: impl Into<String>) -> Uuid {
        self.add(message, NotificationKind::Info, None)
    }

    pub fn error(&self, message: impl Into<String>) -> Uuid {
        self.add(message, NotificationKind::Error, None)
    }

    pub fn mark_read(&self, id: Uuid) {
        self.notifications.update(|list| {
            if let Some(notification) = list.iter_mut().find(|n| n.id == id) {
                notification.read = true;
            }
        });
    }

    pub fn mark_all_read(&self) {
        self.notifications
            .update(|list| list.iter_mut().for_each(|n| n.read = true));
    }

    pub fn remove(&self, id: Uuid) {
        self.notifications.update(|list| list.retain(|n| n.id != id));
    }

    pub fn clear(&self) {
        self.notifications.update(Vec::clear);
    }

    /// Derived on every call, never stored
    pub fn unread_count(&self) -> usize {
        self.notifications
            .with(|list| list.iter().filter(|n| !n.read).count())
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.get()
    }

    pub fn len(&self) -> usize {
        self.notifications.with(Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn subscribe<F: Fn() + 'static>(&self, callback: F) -> SubscriptionId {
        self.notifications.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.notifications.unsubscribe(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_prepends_with_fresh_ids() {
        let store = NotificationStore::new();
        let first = store.info("Category \"Business\" has been updated");
        let second = store.add("Open article", NotificationKind::Success, Some("/articles".to_string()));

        let list = store.notifications();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, second);
        assert_eq!(list[1].id, first);
        assert_ne!(first, second);
        assert_eq!(list[0].link.as_deref(), Some("/articles"));
        assert!(list[0].created_at >= list[1].created_at);
        assert!(list.iter().all(|n| !n.read));
    }

    #[test]
    fn mark_read_and_unread_count() {
        let store = NotificationStore::new();
        let a = store.success("a");
        store.error("b");
        store.info("c");
        assert_eq!(store.unread_count(), 3);

        store.mark_read(a);
        assert_eq!(store.unread_count(), 2);

        store.mark_read(Uuid::new_v4());
        assert_eq!(store.unread_count(), 2);

        store.mark_all_read();
        assert_eq!(store.unread_count(), 0);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn remove_and_clear() {
        let store = NotificationStore::new();
        let a = store.info("a");
        let b = store.info("b");

        store.remove(a);
        let ids: Vec<Uuid> = store.notifications().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![b]);

        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.unread_count(), 0);
    }

    #[test]
    fn clones_share_the_feed() {
        let store = NotificationStore::new();
        let handle = store.clone();
        handle.error("Failed to fetch tags");
        assert_eq!(store.len(), 1);
        assert_eq!(store.notifications()[0].kind, NotificationKind::Error);
    }
}
