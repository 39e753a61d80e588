pub mod http_client;
pub mod api_client;
pub mod resource;
pub mod auth_service;
pub mod article_service;
pub mod category_service;
pub mod tag_service;
pub mod user_service;
pub mod package_service;
#[cfg(target_arch = "wasm32")]
pub mod gloo_transport;

pub use http_client::*;
pub use api_client::{ApiClient, ApiResponse};
pub use resource::{CreatePolicy, Resource};
pub use auth_service::AuthApi;
pub use article_service::Articles;
pub use category_service::Categories;
pub use tag_service::Tags;
pub use user_service::Users;
pub use package_service::{PackageKeys, Packages};
#[cfg(target_arch = "wasm32")]
pub use gloo_transport::GlooTransport;
