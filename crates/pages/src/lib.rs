//! `pageforge-pages` — the documentation-page domain.
//!
//! Projects own a tree of markdown pages rooted at an undeletable home page.
//! The HTTP layer talks to this crate exclusively through the
//! [`ProjectPageService`] and [`MarkdownRenderer`] traits so tests can inject
//! doubles.

pub mod error;
pub mod markdown;
pub mod page;
pub mod project;
pub mod service;

pub use error::{PageError, PageResult};
pub use markdown::{CommonMarkRenderer, MarkdownRenderer};
pub use page::{NewProjectPage, PagePath, PageView, ProjectPage};
pub use project::{Project, ProjectVisibility};
pub use service::{InMemoryPageStore, ProjectPageService};
