use askama::Template;
use axum::response::IntoResponse;

/// A document tile on the home page.
#[derive(Debug, Clone)]
pub struct DocumentCard {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub status: &'static str,
}

impl DocumentCard {
    /// CSS class of the status dot: green when processed, yellow while
    /// processing, red for anything else.
    pub fn indicator_class(&self) -> &'static str {
        match self.status {
            "Processed" => "status-dot--green",
            "Processing" => "status-dot--yellow",
            _ => "status-dot--red",
        }
    }
}

/// Sample documents shown until the listing is wired to the backend.
pub const SAMPLE_CARDS: [DocumentCard; 2] = [
    DocumentCard {
        id: "1",
        title: "Sample Document",
        description: "Uploaded on 2024-10-22",
        status: "Processed",
    },
    DocumentCard {
        id: "2",
        title: "Example PDF",
        description: "Uploaded on 2024-10-20",
        status: "Processing",
    },
];

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub cards: Vec<DocumentCard>,
}

pub async fn index() -> impl IntoResponse {
    IndexTemplate {
        cards: SAMPLE_CARDS.to_vec(),
    }
}

pub async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_colour_follows_status() {
        let card = |status| DocumentCard {
            id: "9",
            title: "t",
            description: "d",
            status,
        };

        assert_eq!(card("Processed").indicator_class(), "status-dot--green");
        assert_eq!(card("Processing").indicator_class(), "status-dot--yellow");
        assert_eq!(card("Failed").indicator_class(), "status-dot--red");
        assert_eq!(card("processed").indicator_class(), "status-dot--red");
    }

    #[test]
    fn index_renders_cards_and_upload_tile() {
        let html = IndexTemplate {
            cards: SAMPLE_CARDS.to_vec(),
        }
        .render()
        .unwrap();

        assert!(html.contains("Document Processor"));
        assert!(html.contains("Sample Document"));
        assert!(html.contains("Uploaded on 2024-10-20"));
        assert!(html.contains(r#"href="/documents/1""#));
        assert!(html.contains(r#"href="/documents/2""#));
        assert!(html.contains("Upload New Document"));
        assert!(html.contains("status-dot--yellow"));
    }
}
