use thiserror::Error;

pub type PageResult<T> = Result<T, PageError>;

/// Failures raised by the page service.
///
/// Deterministic domain failures only; the HTTP layer translates these into
/// status codes centrally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PageError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("project not found")]
    ProjectNotFound,

    #[error("page not found")]
    PageNotFound,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("the home page cannot be deleted")]
    HomePage,

    #[error("project has reached the maximum number of pages ({0})")]
    MaxPages(usize),

    #[error("page nesting exceeds the maximum depth ({0})")]
    MaxDepth(usize),
}

impl PageError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}
