//! Front-end document model and normalization of backend payloads.
//!
//! The backend has shipped both snake_case (`original_filename`, `created_at`)
//! and camelCase (`filename`, `uploadDate`) field names. Every payload is read
//! into [`BackendDocument`] and reshaped by [`Document::from_backend`].

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const UNNAMED_DOCUMENT: &str = "Unnamed Document";
pub const UNKNOWN_STATUS: &str = "unknown";

/// An uploaded file and its processing state, as served to the browser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub filename: String,
    pub upload_date: String,
    /// Free text; observed values include "unknown", "Processed", "Processing".
    pub status: String,
    pub summary: Option<String>,
    pub extracted_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blob_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blob_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
}

/// Identifiers arrive as strings from some backends and integers from others.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BackendId {
    Text(String),
    Number(i64),
}

impl std::fmt::Display for BackendId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendId::Text(s) => write!(f, "{}", s),
            BackendId::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Raw document as returned by the backend, accepting every known field name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackendDocument {
    #[serde(default)]
    pub id: Option<BackendId>,
    #[serde(default)]
    pub original_filename: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, rename = "uploadDate")]
    pub upload_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub extracted_text: Option<String>,
    #[serde(default, rename = "extractedText")]
    pub extracted_text_camel: Option<String>,
    #[serde(default)]
    pub blob_url: Option<String>,
    #[serde(default, rename = "blobUrl")]
    pub blob_url_camel: Option<String>,
    #[serde(default)]
    pub blob_name: Option<String>,
    #[serde(default, rename = "blobName")]
    pub blob_name_camel: Option<String>,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default, rename = "fileSize")]
    pub file_size_camel: Option<u64>,
}

impl Document {
    /// Reshape a backend payload, preferring snake_case names over camelCase
    /// ones. Empty strings and zero sizes count as missing, and `now` is used
    /// when no upload date is present.
    pub fn from_backend(raw: BackendDocument, now: DateTime<Utc>) -> Self {
        Self {
            id: raw.id.map(|id| id.to_string()).unwrap_or_default(),
            filename: first_non_empty(raw.original_filename, raw.filename)
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| UNNAMED_DOCUMENT.to_string()),
            upload_date: first_non_empty(raw.created_at, raw.upload_date)
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| now.to_rfc3339_opts(SecondsFormat::Millis, true)),
            status: raw
                .status
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| UNKNOWN_STATUS.to_string()),
            summary: raw.summary,
            extracted_text: first_non_empty(raw.extracted_text, raw.extracted_text_camel),
            blob_url: first_non_empty(raw.blob_url, raw.blob_url_camel),
            blob_name: first_non_empty(raw.blob_name, raw.blob_name_camel),
            file_size: match raw.file_size {
                Some(size) if size > 0 => Some(size),
                _ => raw.file_size_camel,
            },
        }
    }
}

/// `preferred` unless it is missing or empty, otherwise `fallback` as-is.
fn first_non_empty(preferred: Option<String>, fallback: Option<String>) -> Option<String> {
    match preferred {
        Some(value) if !value.is_empty() => Some(value),
        _ => fallback,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegenerateSummaryRequest {
    #[validate(length(min = 1, message = "prompt must not be empty"))]
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegenerateSummaryResponse {
    pub summary: String,
}

/// A file to forward to the backend's upload endpoint.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    pub is_transcript: bool,
    pub project_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 22, 9, 30, 0).unwrap()
    }

    fn normalize(value: serde_json::Value) -> Document {
        let raw: BackendDocument = serde_json::from_value(value).unwrap();
        Document::from_backend(raw, fixed_now())
    }

    #[test]
    fn snake_case_fields_map_to_camel_case() {
        let doc = normalize(json!({
            "id": "abc",
            "original_filename": "report.pdf",
            "created_at": "2024-10-20T08:00:00Z",
            "status": "Processed",
            "summary": "Short summary",
            "extracted_text": "Full text",
            "blob_url": "https://blob/report.pdf",
            "blob_name": "report.pdf",
            "file_size": 2048
        }));

        assert_eq!(
            doc,
            Document {
                id: "abc".to_string(),
                filename: "report.pdf".to_string(),
                upload_date: "2024-10-20T08:00:00Z".to_string(),
                status: "Processed".to_string(),
                summary: Some("Short summary".to_string()),
                extracted_text: Some("Full text".to_string()),
                blob_url: Some("https://blob/report.pdf".to_string()),
                blob_name: Some("report.pdf".to_string()),
                file_size: Some(2048),
            }
        );
    }

    #[test]
    fn camel_case_payload_is_unchanged() {
        let payload = json!({
            "id": "abc",
            "filename": "notes.txt",
            "uploadDate": "2024-10-20T08:00:00Z",
            "status": "Processing",
            "summary": null,
            "extractedText": "",
            "blobUrl": "https://blob/notes.txt",
            "blobName": "notes.txt",
            "fileSize": 12
        });

        let doc = normalize(payload.clone());
        assert_eq!(serde_json::to_value(&doc).unwrap(), payload);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let doc = normalize(json!({ "id": "7" }));

        assert_eq!(doc.filename, UNNAMED_DOCUMENT);
        assert_eq!(doc.upload_date, "2024-10-22T09:30:00.000Z");
        assert_eq!(doc.status, UNKNOWN_STATUS);
        assert_eq!(doc.summary, None);
        assert_eq!(doc.extracted_text, None);
        assert_eq!(doc.file_size, None);
    }

    #[test]
    fn empty_snake_case_values_fall_through() {
        let doc = normalize(json!({
            "id": 42,
            "original_filename": "",
            "filename": "fallback.pdf",
            "status": "",
            "file_size": 0,
            "fileSize": 99
        }));

        assert_eq!(doc.id, "42");
        assert_eq!(doc.filename, "fallback.pdf");
        assert_eq!(doc.status, UNKNOWN_STATUS);
        assert_eq!(doc.file_size, Some(99));
    }

    #[test]
    fn serializes_nullable_fields_and_omits_absent_metadata() {
        let doc = normalize(json!({ "id": "1", "filename": "a.pdf" }));
        let value = serde_json::to_value(&doc).unwrap();

        assert_eq!(value["summary"], serde_json::Value::Null);
        assert_eq!(value["extractedText"], serde_json::Value::Null);
        assert!(value.get("blobUrl").is_none());
        assert!(value.get("fileSize").is_none());
        assert_eq!(value["uploadDate"], "2024-10-22T09:30:00.000Z");
    }

    #[test]
    fn regenerate_request_rejects_empty_prompt() {
        let request = RegenerateSummaryRequest {
            prompt: String::new(),
        };
        assert!(request.validate().is_err());

        let request = RegenerateSummaryRequest {
            prompt: "Summarize in three bullets".to_string(),
        };
        assert!(request.validate().is_ok());
    }
}
