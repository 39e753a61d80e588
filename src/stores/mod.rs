// ============================================================================
// STORES - Observable client state, one store per concern
// ============================================================================

pub mod notification_store;
pub mod entity_store;
pub mod article_store;
pub mod package_key_store;
pub mod session_store;

pub use notification_store::NotificationStore;
pub use entity_store::{EntityState, EntityStore};
pub use article_store::ArticleStore;
pub use package_key_store::PackageKeyStore;
pub use session_store::{AuthStatus, SessionSnapshot, SessionStore};

use crate::services::{Categories, Packages, Tags, Users};

pub type CategoryStore = EntityStore<Categories>;
pub type TagStore = EntityStore<Tags>;
pub type UserStore = EntityStore<Users>;
pub type PackageStore = EntityStore<Packages>;
