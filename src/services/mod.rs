pub mod api_client;
pub mod auth_service;
pub mod error;
pub mod resultado_service;

pub use api_client::ApiClient;
pub use auth_service::AuthApi;
pub use error::ApiError;
pub use resultado_service::ResultadoApi;
