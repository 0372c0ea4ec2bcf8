pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

use services::api_client::ApiClient;
use std::sync::Arc;

/// Shared application state containing the backend client
#[derive(Clone)]
pub struct AppState {
    pub api_client: Arc<ApiClient>,
}

impl AppState {
    pub fn new(api_client: Arc<ApiClient>) -> Self {
        Self { api_client }
    }
}
