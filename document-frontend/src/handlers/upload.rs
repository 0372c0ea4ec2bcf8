use crate::models::{Document, UploadRequest};
use crate::AppState;
use askama::Template;
use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use service_core::error::AppError;

/// Largest accepted upload body.
pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

#[derive(Template)]
#[template(path = "pages/upload.html")]
pub struct UploadTemplate {
    pub max_upload_mb: usize,
}

pub async fn upload_page() -> impl IntoResponse {
    UploadTemplate {
        max_upload_mb: MAX_UPLOAD_BYTES / 1024 / 1024,
    }
}

/// Forward a browser upload (`file`, `isTranscript`, `projectId`) to the backend.
pub async fn upload_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Document>, AppError> {
    let mut file: Option<(String, String, Vec<u8>)> = None;
    let mut is_transcript = false;
    let mut project_id = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Invalid multipart data", e))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or("unnamed").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field.bytes().await.map_err(|e| {
                    tracing::error!("Failed to read file {}: {}", file_name, e);
                    multipart_error("Failed to read file", e)
                })?;
                file = Some((file_name, content_type, data.to_vec()));
            }
            Some("isTranscript") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| multipart_error("Invalid isTranscript field", e))?;
                is_transcript = parse_flag(&value);
            }
            Some("projectId") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| multipart_error("Invalid projectId field", e))?;
                let value = value.trim();
                if !value.is_empty() {
                    project_id = Some(value.to_string());
                }
            }
            other => {
                tracing::debug!(field = ?other, "Ignoring unknown upload field");
            }
        }
    }

    let (filename, content_type, bytes) =
        file.ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("No file provided")))?;

    let document = state
        .api_client
        .upload_document(UploadRequest {
            filename: filename.clone(),
            content_type,
            bytes,
            is_transcript,
            project_id,
        })
        .await?;

    tracing::info!(
        document_id = %document.id,
        file_name = %filename,
        "File uploaded successfully"
    );

    Ok(Json(document))
}

/// Bodies over the route's limit are 413; anything else is a malformed request.
fn multipart_error(context: &str, e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!(
            "File exceeds the {} MB upload limit",
            MAX_UPLOAD_BYTES / 1024 / 1024
        ))
    } else {
        AppError::BadRequest(anyhow::anyhow!("{}: {}", context, e.body_text()))
    }
}

/// Form checkboxes post "on" (or their value); API callers post "true".
fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "on" | "1" | "yes"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_transcript_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag("on"));
        assert!(parse_flag(" TRUE "));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
    }

    #[test]
    fn upload_page_posts_to_proxy() {
        let html = UploadTemplate { max_upload_mb: 50 }.render().unwrap();
        assert!(html.contains(r#"action="/api/upload""#));
        assert!(html.contains(r#"enctype="multipart/form-data""#));
        assert!(html.contains(r#"name="isTranscript""#));
    }
}
