use axum::http::StatusCode;
use serde::Deserialize;

use pageforge_core::PageId;
use pageforge_pages::NewProjectPage;

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

/// A single free-text field (raw markdown).
#[derive(Debug, Deserialize)]
pub struct StringContent {
    pub content: String,
}

impl StringContent {
    /// The content must not be blank.
    pub fn validated(self) -> Result<String, axum::response::Response> {
        if self.content.trim().is_empty() {
            return Err(errors::json_error(
                StatusCode::BAD_REQUEST,
                "validation_error",
                "content must not be blank",
            ));
        }
        Ok(self.content)
    }
}

#[derive(Debug, Deserialize)]
pub struct NewProjectPageRequest {
    pub name: String,
    pub parent_id: Option<PageId>,
    #[serde(default)]
    pub contents: String,
}

impl From<NewProjectPageRequest> for NewProjectPage {
    fn from(req: NewProjectPageRequest) -> Self {
        Self {
            name: req.name,
            parent_id: req.parent_id,
            contents: req.contents,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_content_fails_validation() {
        let body = StringContent {
            content: "   ".to_string(),
        };
        assert!(body.validated().is_err());
    }

    #[test]
    fn non_blank_content_passes_through_unchanged() {
        let body = StringContent {
            content: "# Hi".to_string(),
        };
        assert_eq!(body.validated().unwrap(), "# Hi");
    }
}
