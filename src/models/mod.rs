pub mod envelope;
pub mod pagination;
pub mod auth;
pub mod article;
pub mod category;
pub mod tag;
pub mod user;
pub mod package;
pub mod notification;

pub use envelope::*;
pub use pagination::*;
pub use auth::*;
pub use article::*;
pub use category::*;
pub use tag::*;
pub use user::*;
pub use package::*;
pub use notification::*;
