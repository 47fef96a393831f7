use std::sync::Arc;

use pageforge_pages::{MarkdownRenderer, ProjectPageService};

/// The collaborators every handler delegates to.
///
/// Both are trait objects injected at construction so tests can swap in
/// recording doubles.
pub struct AppServices {
    pub pages: Arc<dyn ProjectPageService>,
    pub markdown: Arc<dyn MarkdownRenderer>,
}

impl AppServices {
    pub fn new(pages: Arc<dyn ProjectPageService>, markdown: Arc<dyn MarkdownRenderer>) -> Self {
        Self { pages, markdown }
    }
}
