use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pageforge_core::{PageId, ProjectId};

use crate::error::{PageError, PageResult};

/// Page name length limits.
pub const MIN_NAME_LEN: usize = 3;
pub const MAX_NAME_LEN: usize = 255;

/// Maximum raw markdown size per page, in bytes.
pub const MAX_CONTENT_LEN: usize = 75_000;

/// Slug reserved for the page created with the project.
pub const HOME_SLUG: &str = "home";

/// A single documentation page.
///
/// Pages form a tree: `parent == None` means the page sits directly under the
/// home page. The home page itself has `home == true` and no parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectPage {
    pub id: PageId,
    pub project_id: ProjectId,
    pub name: String,
    pub slug: String,
    pub contents: String,
    pub parent: Option<PageId>,
    pub home: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProjectPage {
    pub fn home(project_id: ProjectId, contents: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: PageId::new(),
            project_id,
            name: "Home".to_string(),
            slug: HOME_SLUG.to_string(),
            contents: contents.into(),
            parent: None,
            home: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Attributes needed to create a new page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProjectPage {
    pub name: String,
    pub parent_id: Option<PageId>,
    #[serde(default)]
    pub contents: String,
}

/// Response shape for a resolved page: the page itself plus the slugs of its
/// direct children, so clients can render navigation without a second call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageView {
    pub id: PageId,
    pub project_id: ProjectId,
    pub name: String,
    pub slug: String,
    pub contents: String,
    pub parent: Option<PageId>,
    pub home: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub children: Vec<String>,
}

impl PageView {
    pub fn from_page(page: &ProjectPage, children: Vec<String>) -> Self {
        Self {
            id: page.id,
            project_id: page.project_id,
            name: page.name.clone(),
            slug: page.slug.clone(),
            contents: page.contents.clone(),
            parent: page.parent,
            home: page.home,
            created_at: page.created_at,
            updated_at: page.updated_at,
            children,
        }
    }
}

/// The page path: the ordered path segments after `{author}/{slug}` in a page
/// URL. An empty path addresses the home page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PagePath {
    segments: Vec<String>,
}

impl PagePath {
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse the wildcard suffix of a request path. Empty segments (double or
    /// trailing slashes) are dropped.
    pub fn from_request_suffix(suffix: &str) -> Self {
        Self {
            segments: suffix
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl core::fmt::Display for PagePath {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

/// Validate a page name and derive its slug.
///
/// Names are 3..=255 chars of alphanumerics, spaces, hyphens and underscores.
/// The slug is the lowercased name with spaces collapsed to single hyphens.
pub fn slug_for_name(name: &str) -> PageResult<String> {
    let trimmed = name.trim();
    let name_len = trimmed.chars().count();
    if name_len < MIN_NAME_LEN {
        return Err(PageError::validation(format!(
            "page name must be at least {MIN_NAME_LEN} characters"
        )));
    }
    if name_len > MAX_NAME_LEN {
        return Err(PageError::validation(format!(
            "page name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == ' ' || c == '-' || c == '_')
    {
        return Err(PageError::validation(
            "page name may only contain letters, digits, spaces, '-' and '_'",
        ));
    }

    let mut slug = String::with_capacity(trimmed.len());
    let mut last_was_hyphen = false;
    for c in trimmed.chars() {
        let c = if c == ' ' { '-' } else { c.to_ascii_lowercase() };
        if c == '-' {
            if last_was_hyphen {
                continue;
            }
            last_was_hyphen = true;
        } else {
            last_was_hyphen = false;
        }
        slug.push(c);
    }
    let slug = slug.trim_matches('-').to_string();

    if slug.is_empty() {
        return Err(PageError::validation("page name produces an empty slug"));
    }
    if slug == HOME_SLUG {
        return Err(PageError::validation(format!(
            "'{HOME_SLUG}' is reserved for the home page"
        )));
    }

    Ok(slug)
}

/// Validate raw page contents (used on create and save).
pub fn validate_contents(contents: &str) -> PageResult<()> {
    if contents.len() > MAX_CONTENT_LEN {
        return Err(PageError::validation(format!(
            "page contents exceed {MAX_CONTENT_LEN} bytes"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn slugifies_names() {
        assert_eq!(slug_for_name("Getting Started").unwrap(), "getting-started");
        assert_eq!(slug_for_name("API  Reference").unwrap(), "api-reference");
        assert_eq!(slug_for_name("FAQ").unwrap(), "faq");
        assert_eq!(slug_for_name("v2_migration").unwrap(), "v2_migration");
    }

    #[test]
    fn rejects_short_long_and_invalid_names() {
        assert!(slug_for_name("ab").is_err());
        assert!(slug_for_name(&"x".repeat(MAX_NAME_LEN + 1)).is_err());
        assert!(slug_for_name("nope/nested").is_err());
        assert!(slug_for_name("emoji 🎉").is_err());
    }

    #[test]
    fn name_length_is_counted_in_characters() {
        // 200 two-byte chars: within the character limit, so the failure must
        // come from the charset check, not the length check.
        let err = slug_for_name(&"é".repeat(200)).unwrap_err();
        let PageError::Validation(msg) = err else {
            panic!("expected validation error");
        };
        assert!(msg.contains("may only contain"));
    }

    #[test]
    fn home_slug_is_reserved() {
        assert!(slug_for_name("Home").is_err());
        assert!(slug_for_name("HOME").is_err());
    }

    #[test]
    fn page_path_drops_empty_segments() {
        let path = PagePath::from_request_suffix("guide//install/");
        assert_eq!(path.segments(), ["guide", "install"]);
        assert!(PagePath::from_request_suffix("").is_root());
    }

    #[test]
    fn contents_cap_is_enforced() {
        assert!(validate_contents("fine").is_ok());
        assert!(validate_contents(&"x".repeat(MAX_CONTENT_LEN + 1)).is_err());
    }

    proptest! {
        /// Any accepted name yields a slug that is non-empty, lowercase and
        /// free of spaces and doubled hyphens.
        #[test]
        fn accepted_slugs_are_canonical(name in "[a-zA-Z0-9 _-]{3,64}") {
            if let Ok(slug) = slug_for_name(&name) {
                prop_assert!(!slug.is_empty());
                prop_assert!(!slug.contains(' '));
                prop_assert!(!slug.contains("--"));
                prop_assert_eq!(slug.to_ascii_lowercase(), slug.clone());
                prop_assert!(!slug.starts_with('-') && !slug.ends_with('-'));
            }
        }
    }
}
