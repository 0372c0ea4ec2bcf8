//! JSON routes the browser calls; each forwards to the backend via [`ApiClient`].
//!
//! [`ApiClient`]: crate::services::ApiClient

use crate::models::{Document, RegenerateSummaryRequest, RegenerateSummaryResponse};
use crate::services::ApiError;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;
use validator::Validate;

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Status { status, message } if status == StatusCode::NOT_FOUND => {
                AppError::NotFound(anyhow::anyhow!(message))
            }
            ApiError::Status { status, message } if status.is_client_error() => {
                AppError::BadRequest(anyhow::anyhow!(message))
            }
            ApiError::Status { message, .. } => AppError::BadGateway(message),
            ApiError::Transport { .. } => {
                tracing::error!(error = %err, "Backend unreachable");
                AppError::BadGateway("Backend service unavailable".to_string())
            }
            ApiError::Decode { .. } => {
                tracing::error!(error = %err, "Backend returned an unexpected payload");
                AppError::BadGateway("Invalid response from backend service".to_string())
            }
        }
    }
}

pub async fn list_documents(State(state): State<AppState>) -> Result<Json<Vec<Document>>, AppError> {
    let documents = state.api_client.list_documents().await?;
    Ok(Json(documents))
}

pub async fn get_document(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
) -> Result<Json<Document>, AppError> {
    let document = state.api_client.get_document(&document_id).await?;
    Ok(Json(document))
}

pub async fn regenerate_summary(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
    Json(payload): Json<RegenerateSummaryRequest>,
) -> Result<Json<RegenerateSummaryResponse>, AppError> {
    payload.validate()?;

    let response = state
        .api_client
        .regenerate_summary(&document_id, &payload.prompt)
        .await?;

    tracing::info!(document_id = %document_id, "Summary regenerated");
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    fn status_of(err: ApiError) -> StatusCode {
        AppError::from(err).into_response().status()
    }

    #[test]
    fn backend_statuses_map_to_proxy_statuses() {
        let status_error = |status| ApiError::Status {
            status,
            message: "Failed to fetch document".to_string(),
        };

        assert_eq!(status_of(status_error(StatusCode::NOT_FOUND)), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(status_error(StatusCode::UNPROCESSABLE_ENTITY)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(status_error(StatusCode::SERVICE_UNAVAILABLE)),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn decode_failures_are_bad_gateway() {
        let source = serde_json::from_str::<Document>("not json").unwrap_err();
        let err = ApiError::Decode {
            url: "http://backend:8000/api/documents".to_string(),
            source,
        };
        assert_eq!(status_of(err), StatusCode::BAD_GATEWAY);
    }
}
