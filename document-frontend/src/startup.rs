use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::middleware::{
    metrics::metrics_middleware, security_headers::security_headers_middleware,
    tracing::{request_id_middleware, REQUEST_ID_HEADER},
};
use std::future::IntoFuture;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::Settings;
use crate::handlers::{
    api::{get_document, list_documents, regenerate_summary},
    app::{health_check, index},
    documents::document_page,
    upload::{upload_handler, upload_page, MAX_UPLOAD_BYTES},
};
use crate::services::api_client::ApiClient;
use crate::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/metrics", get(crate::handlers::metrics::metrics))
        .route("/documents/:id", get(document_page))
        .route("/upload", get(upload_page))
        .route(
            "/api/upload",
            post(upload_handler).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/api/documents", get(list_documents))
        .route("/api/documents/:id", get(get_document))
        .route(
            "/api/documents/:id/regenerate-summary",
            post(regenerate_summary),
        )
        .nest_service("/static", ServeDir::new(static_directory()))
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        // Outermost so the trace span sees the request id
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

fn static_directory() -> PathBuf {
    let base_path = std::env::current_dir().unwrap_or_default();
    if base_path.ends_with("document-frontend") {
        base_path.join("static")
    } else {
        base_path.join("document-frontend").join("static")
    }
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    /// Bind the listener and assemble the router. Port 0 picks a free port.
    pub async fn build(settings: Settings) -> anyhow::Result<Self> {
        let api_client = Arc::new(ApiClient::new(&settings.backend)?);
        let app = build_router(AppState::new(api_client));

        let address = format!("{}:{}", settings.server.host, settings.server.port);
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
            anyhow::anyhow!("Failed to bind to address {}: {}", address, e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Starting document-frontend on {}:{}", settings.server.host, port);

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
