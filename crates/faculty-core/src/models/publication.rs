use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Publication {
    pub id: Uuid,
    pub title: String,
    pub authors: String,
    pub year: i32,
    /// article or project
    pub publication_type: Option<String>,
    pub journal: Option<String>,
    pub conference: Option<String>,
    pub location: Option<String>,
    pub doi: Option<String>,
    pub pdf_url: Option<String>,
    pub external_url: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Publication as the frontend reads it: `type` and `file_url` mirror
/// `publication_type` and `pdf_url`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PublicationResponse {
    pub id: Uuid,
    pub title: String,
    pub authors: String,
    pub year: i32,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub publication_type: Option<String>,
    pub journal: Option<String>,
    pub conference: Option<String>,
    pub location: Option<String>,
    pub doi: Option<String>,
    pub file_url: Option<String>,
    pub pdf_url: Option<String>,
    pub external_url: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Publication> for PublicationResponse {
    fn from(publication: Publication) -> Self {
        PublicationResponse {
            id: publication.id,
            title: publication.title,
            authors: publication.authors,
            year: publication.year,
            kind: publication.publication_type.clone(),
            publication_type: publication.publication_type,
            journal: publication.journal,
            conference: publication.conference,
            location: publication.location,
            doi: publication.doi,
            file_url: publication.pdf_url.clone(),
            pdf_url: publication.pdf_url,
            external_url: publication.external_url,
            abstract_text: publication.abstract_text,
            is_published: publication.is_published,
            created_at: publication.created_at,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreatePublicationRequest {
    #[validate(length(min = 1, max = 300, message = "Title must be between 1 and 300 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 500, message = "Authors must be between 1 and 500 characters"))]
    pub authors: String,
    #[validate(range(min = 1900, max = 2100, message = "Year must be between 1900 and 2100"))]
    pub year: i32,
    #[serde(default, alias = "type")]
    pub publication_type: Option<String>,
    #[serde(default)]
    pub journal: Option<String>,
    #[serde(default)]
    pub conference: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub doi: Option<String>,
    #[serde(default, alias = "file_url")]
    pub pdf_url: Option<String>,
    #[serde(default)]
    pub external_url: Option<String>,
    #[serde(default)]
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    #[serde(default = "default_true")]
    pub is_published: bool,
}

#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct UpdatePublicationRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 300, message = "Title must be between 1 and 300 characters"))]
    pub title: Option<String>,
    #[serde(default)]
    pub authors: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default, alias = "type")]
    pub publication_type: Option<String>,
    #[serde(default)]
    pub journal: Option<String>,
    #[serde(default)]
    pub conference: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub doi: Option<String>,
    #[serde(default, alias = "file_url")]
    pub pdf_url: Option<String>,
    #[serde(default)]
    pub external_url: Option<String>,
    #[serde(default)]
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    #[serde(default)]
    pub is_published: Option<bool>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PublicationQuery {
    #[serde(default)]
    pub skip: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub publication_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publication_response_mirrors_aliases() {
        let now = Utc::now();
        let publication = Publication {
            id: Uuid::new_v4(),
            title: "Servo control".to_string(),
            authors: "A. Yilmaz".to_string(),
            year: 2024,
            publication_type: Some("article".to_string()),
            journal: None,
            conference: None,
            location: None,
            doi: None,
            pdf_url: Some("/uploads/pdfs/paper.pdf".to_string()),
            external_url: None,
            abstract_text: None,
            is_published: true,
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(PublicationResponse::from(publication)).unwrap();
        assert_eq!(json["type"], "article");
        assert_eq!(json["publication_type"], "article");
        assert_eq!(json["file_url"], "/uploads/pdfs/paper.pdf");
        assert_eq!(json["pdf_url"], "/uploads/pdfs/paper.pdf");
    }

    #[test]
    fn test_create_request_accepts_frontend_names() {
        let req: CreatePublicationRequest = serde_json::from_value(serde_json::json!({
            "title": "Mechatronic design",
            "authors": "B. Kaya",
            "year": 2023,
            "type": "project",
            "file_url": "/uploads/pdfs/design.pdf"
        }))
        .unwrap();
        assert_eq!(req.publication_type.as_deref(), Some("project"));
        assert_eq!(req.pdf_url.as_deref(), Some("/uploads/pdfs/design.pdf"));
        assert!(req.is_published);
    }
}
