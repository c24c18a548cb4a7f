use serde::{Deserialize, Serialize};
use time::Date;

use crate::error::ApiError;

/// A note carries its material either inline or as an external document,
/// never both.
#[derive(Debug, Clone, PartialEq)]
pub enum NoteBody {
    Content(String),
    PdfUrl(String),
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Resolves the content/pdf_url pair into at most one body.
fn resolve_body(
    content: Option<String>,
    pdf_url: Option<String>,
) -> Result<Option<NoteBody>, ApiError> {
    match (non_empty(content), non_empty(pdf_url)) {
        (Some(_), Some(_)) => Err(ApiError::Validation(
            "provide either content or pdf_url, not both".into(),
        )),
        (Some(content), None) => Ok(Some(NoteBody::Content(content))),
        (None, Some(url)) => Ok(Some(NoteBody::PdfUrl(url))),
        (None, None) => Ok(None),
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub pdf_url: Option<String>,
    pub school_of: Option<String>,
    pub diploma: Option<String>,
}

#[derive(Debug)]
pub struct NewNote {
    pub title: String,
    pub description: String,
    pub body: NoteBody,
    pub school_of: String,
    pub diploma: String,
}

impl CreateNoteRequest {
    pub fn validate(self) -> Result<NewNote, ApiError> {
        let title = non_empty(self.title)
            .ok_or_else(|| ApiError::Validation("title is required".into()))?;
        let description = non_empty(self.description)
            .ok_or_else(|| ApiError::Validation("description is required".into()))?;
        let school_of = non_empty(self.school_of)
            .ok_or_else(|| ApiError::Validation("school_of is required".into()))?;
        let diploma = non_empty(self.diploma)
            .ok_or_else(|| ApiError::Validation("diploma is required".into()))?;
        let body = resolve_body(self.content, self.pdf_url)?
            .ok_or_else(|| ApiError::Validation("content or pdf_url is required".into()))?;
        Ok(NewNote {
            title,
            description,
            body,
            school_of,
            diploma,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateNoteRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub pdf_url: Option<String>,
    pub school_of: Option<String>,
    pub diploma: Option<String>,
}

/// An update payload that passed boundary validation. `body` switches the
/// note's material kind when present; other fields patch in place.
#[derive(Debug)]
pub struct NotePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub body: Option<NoteBody>,
    pub school_of: Option<String>,
    pub diploma: Option<String>,
}

impl UpdateNoteRequest {
    pub fn validate(self) -> Result<NotePatch, ApiError> {
        let body = resolve_body(self.content, self.pdf_url)?;
        Ok(NotePatch {
            title: self.title,
            description: self.description,
            body,
            school_of: self.school_of,
            diploma: self.diploma,
        })
    }
}

/// Optional listing filters; absent values contribute no predicate.
#[derive(Debug, Default, Deserialize)]
pub struct NoteFilters {
    pub diploma: Option<String>,
    pub school_of: Option<String>,
    pub search: Option<String>,
    pub created_at: Option<Date>,
    pub updated_at: Option<Date>,
}

#[derive(Debug, Serialize)]
pub struct CreatedNoteResponse {
    pub message: &'static str,
    pub note_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> CreateNoteRequest {
        CreateNoteRequest {
            title: Some("Linear algebra summary".into()),
            description: Some("Chapters 1-4".into()),
            content: Some("Vector spaces ...".into()),
            pdf_url: None,
            school_of: Some("Engineering".into()),
            diploma: Some("CS".into()),
        }
    }

    #[test]
    fn content_note_validates() {
        let note = full().validate().expect("valid");
        assert_eq!(note.body, NoteBody::Content("Vector spaces ...".into()));
    }

    #[test]
    fn pdf_note_validates() {
        let mut req = full();
        req.content = None;
        req.pdf_url = Some("https://cdn.example.com/algebra.pdf".into());
        let note = req.validate().expect("valid");
        assert_eq!(
            note.body,
            NoteBody::PdfUrl("https://cdn.example.com/algebra.pdf".into())
        );
    }

    #[test]
    fn missing_both_content_and_pdf_url_fails() {
        let mut req = full();
        req.content = None;
        assert!(req.validate().is_err());

        let mut req = full();
        req.content = Some("   ".into());
        req.pdf_url = Some("".into());
        assert!(req.validate().is_err());
    }

    #[test]
    fn both_content_and_pdf_url_fails() {
        let mut req = full();
        req.pdf_url = Some("https://cdn.example.com/algebra.pdf".into());
        assert!(req.validate().is_err());
    }

    #[test]
    fn classification_fields_are_required() {
        for strip in ["title", "description", "school_of", "diploma"] {
            let mut req = full();
            match strip {
                "title" => req.title = None,
                "description" => req.description = None,
                "school_of" => req.school_of = None,
                _ => req.diploma = None,
            }
            assert!(req.validate().is_err(), "{strip} should be required");
        }
    }

    #[test]
    fn patch_without_body_is_allowed() {
        let patch = UpdateNoteRequest {
            title: Some("New title".into()),
            description: None,
            content: None,
            pdf_url: None,
            school_of: None,
            diploma: None,
        }
        .validate()
        .expect("valid");
        assert!(patch.body.is_none());
        assert_eq!(patch.title.as_deref(), Some("New title"));
    }

    #[test]
    fn patch_with_both_bodies_fails() {
        let result = UpdateNoteRequest {
            title: None,
            description: None,
            content: Some("inline".into()),
            pdf_url: Some("https://cdn.example.com/x.pdf".into()),
            school_of: None,
            diploma: None,
        }
        .validate();
        assert!(result.is_err());
    }
}
