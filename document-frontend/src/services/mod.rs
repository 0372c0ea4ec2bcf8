pub mod api_client;
pub mod metrics;

pub use api_client::{ApiClient, ApiError};
