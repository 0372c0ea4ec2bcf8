//! HTTP client for the document-processing backend.
//!
//! One request per call: no retry, backoff or timeout. Failures surface
//! immediately as [`ApiError`] with a short, user-presentable message.

use crate::config::BackendSettings;
use crate::models::{
    BackendDocument, Document, RegenerateSummaryRequest, RegenerateSummaryResponse, UploadRequest,
};
use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use metrics::counter;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use service_core::observability::{TracedClientExt, TracedRequest};

pub const LIST_DOCUMENTS_FAILED: &str = "Failed to fetch documents";
pub const GET_DOCUMENT_FAILED: &str = "Failed to fetch document";
pub const UPLOAD_DOCUMENT_FAILED: &str = "Failed to upload document";
pub const REGENERATE_SUMMARY_FAILED: &str = "Failed to regenerate summary";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The backend answered with a non-success status.
    #[error("{message}")]
    Status { status: StatusCode, message: String },

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Client for the backend's `/api/documents` surface.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(settings: &BackendSettings) -> Result<Self> {
        let base_url = Url::parse(&settings.url)
            .with_context(|| format!("Invalid backend URL: {}", settings.url))?;

        if base_url.cannot_be_a_base() {
            return Err(anyhow!("Backend URL cannot be used as a base: {}", settings.url));
        }

        tracing::info!(backend_url = %base_url, "Using backend API");

        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }

    /// Fetch all documents.
    pub async fn list_documents(&self) -> Result<Vec<Document>, ApiError> {
        let url = self.endpoint(&["api", "documents"]);
        tracing::debug!(url = %url, "Making API request");

        let operation = "list_documents";
        let response = send(&url, operation, self.client.traced_get(url.as_str())).await?;
        let response = ensure_success(&url, operation, response, LIST_DOCUMENTS_FAILED)?;
        let raw: Vec<BackendDocument> = read_json(&url, operation, response).await?;
        tracing::debug!(count = raw.len(), "API returned documents");

        let now = Utc::now();
        Ok(raw
            .into_iter()
            .map(|doc| Document::from_backend(doc, now))
            .collect())
    }

    /// Fetch a single document by id.
    pub async fn get_document(&self, id: &str) -> Result<Document, ApiError> {
        let url = self.endpoint(&["api", "documents", id]);
        tracing::debug!(url = %url, "Making API request");

        let operation = "get_document";
        let response = send(&url, operation, self.client.traced_get(url.as_str())).await?;
        let response = ensure_success(&url, operation, response, GET_DOCUMENT_FAILED)?;
        let raw: BackendDocument = read_json(&url, operation, response).await?;

        Ok(Document::from_backend(raw, Utc::now()))
    }

    /// Upload a file as multipart form data.
    ///
    /// On failure the backend's JSON `error` field is used as the message when
    /// present, otherwise [`UPLOAD_DOCUMENT_FAILED`].
    pub async fn upload_document(&self, upload: UploadRequest) -> Result<Document, ApiError> {
        let url = self.endpoint(&["api", "documents", "upload"]);
        tracing::debug!(
            url = %url,
            filename = %upload.filename,
            size = upload.bytes.len(),
            is_transcript = upload.is_transcript,
            "Uploading document"
        );

        let file_part = Part::bytes(upload.bytes)
            .file_name(upload.filename)
            .mime_str(&upload.content_type)
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })?;

        let mut form = Form::new().part("file", file_part).text(
            "isTranscript",
            if upload.is_transcript { "true" } else { "false" },
        );
        if let Some(project_id) = upload.project_id {
            form = form.text("projectId", project_id);
        }

        let operation = "upload_document";
        let request = self.client.traced_post(url.as_str()).multipart(form);
        let response = send(&url, operation, request).await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|body| body.get("error").and_then(|e| e.as_str()).map(str::to_string))
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| UPLOAD_DOCUMENT_FAILED.to_string());

            tracing::error!(url = %url, status = status.as_u16(), error = %message, "Upload failed");
            record(operation, "error");
            return Err(ApiError::Status { status, message });
        }

        let raw: BackendDocument = read_json(&url, operation, response).await?;
        Ok(Document::from_backend(raw, Utc::now()))
    }

    /// Ask the backend to regenerate a document summary with a custom prompt.
    pub async fn regenerate_summary(
        &self,
        document_id: &str,
        prompt: &str,
    ) -> Result<RegenerateSummaryResponse, ApiError> {
        let url = self.endpoint(&["api", "documents", document_id, "regenerate-summary"]);
        tracing::debug!(url = %url, "Regenerating summary");

        let body = RegenerateSummaryRequest {
            prompt: prompt.to_string(),
        };
        let operation = "regenerate_summary";
        let request = self.client.traced_post(url.as_str()).json(&body);
        let response = send(&url, operation, request).await?;
        let response = ensure_success(&url, operation, response, REGENERATE_SUMMARY_FAILED)?;

        read_json(&url, operation, response).await
    }

    /// Join path segments onto the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

async fn send(
    url: &Url,
    operation: &'static str,
    request: TracedRequest,
) -> Result<Response, ApiError> {
    request.send().await.map_err(|source| {
        tracing::error!(url = %url, error = %source, "API request could not be sent");
        record(operation, "error");
        ApiError::Transport {
            url: url.to_string(),
            source,
        }
    })
}

fn ensure_success(
    url: &Url,
    operation: &'static str,
    response: Response,
    failure_message: &str,
) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    tracing::error!(url = %url, status = status.as_u16(), "API request failed");
    record(operation, "error");
    Err(ApiError::Status {
        status,
        message: failure_message.to_string(),
    })
}

/// Read and decode a success body. The request only counts as a success once
/// the body decodes.
async fn read_json<T: DeserializeOwned>(
    url: &Url,
    operation: &'static str,
    response: Response,
) -> Result<T, ApiError> {
    let bytes = response.bytes().await.map_err(|source| {
        record(operation, "error");
        ApiError::Transport {
            url: url.to_string(),
            source,
        }
    })?;

    let value = serde_json::from_slice(&bytes).map_err(|source| {
        tracing::error!(url = %url, error = %source, "Failed to decode API response");
        record(operation, "error");
        ApiError::Decode {
            url: url.to_string(),
            source,
        }
    })?;

    record(operation, "success");
    Ok(value)
}

fn record(operation: &'static str, outcome: &'static str) {
    counter!("backend_requests_total", "operation" => operation, "outcome" => outcome)
        .increment(1);
}
