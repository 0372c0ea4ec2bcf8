use askama::Template;
use axum::{extract::Path, response::IntoResponse};

#[derive(Template)]
#[template(path = "pages/document.html")]
pub struct DocumentTemplate {
    pub id: String,
}

/// Placeholder detail page; it only echoes the route id.
pub async fn document_page(Path(id): Path<String>) -> impl IntoResponse {
    DocumentTemplate { id }
}
