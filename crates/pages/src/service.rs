//! The page-management service: the contract the HTTP layer consumes, plus an
//! in-memory reference implementation.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;

use pageforge_core::{PageId, ProjectId};

use crate::error::{PageError, PageResult};
use crate::page::{
    NewProjectPage, PagePath, PageView, ProjectPage, slug_for_name, validate_contents,
};
use crate::project::Project;

/// Cap on pages per project (the home page counts).
pub const MAX_PAGES_PER_PROJECT: usize = 50;

/// Maximum nesting depth below the home page: children (1) and
/// grandchildren (2); anything deeper is refused.
pub const MAX_PAGE_DEPTH: usize = 2;

/// Page management contract.
///
/// Object-safe so the API layer can hold an `Arc<dyn ProjectPageService>` and
/// tests can substitute recording doubles.
pub trait ProjectPageService: Send + Sync {
    /// Look up a project by its URL address, for visibility checks.
    fn find_project(&self, author: &str, slug: &str) -> Option<Project>;

    /// Look up a project by id, for permission checks on mutating routes.
    fn find_project_by_id(&self, project_id: ProjectId) -> Option<Project>;

    /// Resolve a page by project address and page path. The root path
    /// resolves the home page.
    fn get_project_page(&self, author: &str, slug: &str, path: &PagePath) -> PageResult<PageView>;

    /// Create a page; returns the generated page slug.
    fn create_project_page(
        &self,
        project_id: ProjectId,
        new_page: NewProjectPage,
    ) -> PageResult<String>;

    /// Overwrite a page's contents.
    fn save_project_page(
        &self,
        project_id: ProjectId,
        page_id: PageId,
        contents: &str,
    ) -> PageResult<()>;

    /// Delete a page and its descendants. The home page is refused.
    fn delete_project_page(&self, project_id: ProjectId, page_id: PageId) -> PageResult<()>;
}

#[derive(Debug, Default)]
struct Inner {
    projects: HashMap<ProjectId, Project>,
    pages: HashMap<PageId, ProjectPage>,
}

/// In-memory page store.
///
/// Interior mutability via a single `Mutex`; every operation takes the lock
/// once, so concurrent edits to the same page serialize here.
#[derive(Debug, Default)]
pub struct InMemoryPageStore {
    inner: Mutex<Inner>,
}

impl InMemoryPageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a project and create its home page. Returns the project id.
    pub fn register_project(&self, project: Project) -> ProjectId {
        let project_id = project.id;
        let home = ProjectPage::home(project_id, "Welcome to your new project!");

        let mut inner = self.inner.lock().unwrap();
        inner.projects.insert(project_id, project);
        inner.pages.insert(home.id, home);
        project_id
    }

    /// Page count for a project (test/ops visibility).
    pub fn page_count(&self, project_id: ProjectId) -> usize {
        let inner = self.inner.lock().unwrap();
        inner
            .pages
            .values()
            .filter(|p| p.project_id == project_id)
            .count()
    }
}

impl Inner {
    fn home_page(&self, project_id: ProjectId) -> PageResult<&ProjectPage> {
        self.pages
            .values()
            .find(|p| p.project_id == project_id && p.home)
            .ok_or(PageError::PageNotFound)
    }

    /// Walk the path segment by segment from under the home page.
    fn resolve(&self, project_id: ProjectId, path: &PagePath) -> PageResult<&ProjectPage> {
        if path.is_root() {
            return self.home_page(project_id);
        }

        let mut parent: Option<PageId> = None;
        let mut found: Option<&ProjectPage> = None;
        for segment in path.segments() {
            let page = self
                .pages
                .values()
                .find(|p| {
                    p.project_id == project_id && !p.home && p.parent == parent && p.slug == *segment
                })
                .ok_or(PageError::PageNotFound)?;
            parent = Some(page.id);
            found = Some(page);
        }
        found.ok_or(PageError::PageNotFound)
    }

    fn child_slugs(&self, project_id: ProjectId, page: &ProjectPage) -> Vec<String> {
        let parent = if page.home { None } else { Some(page.id) };
        let mut slugs: Vec<String> = self
            .pages
            .values()
            .filter(|p| p.project_id == project_id && !p.home && p.parent == parent)
            .map(|p| p.slug.clone())
            .collect();
        slugs.sort();
        slugs
    }

    /// Nesting depth of a page: pages directly under home have depth 1.
    fn depth_of(&self, page: &ProjectPage) -> usize {
        let mut depth = 1;
        let mut current = page.parent;
        while let Some(parent_id) = current {
            depth += 1;
            current = self.pages.get(&parent_id).and_then(|p| p.parent);
        }
        depth
    }

    fn descendants_of(&self, page_id: PageId) -> Vec<PageId> {
        let mut out = Vec::new();
        let mut frontier = vec![page_id];
        while let Some(current) = frontier.pop() {
            for p in self.pages.values() {
                if p.parent == Some(current) {
                    frontier.push(p.id);
                    out.push(p.id);
                }
            }
        }
        out
    }
}

impl ProjectPageService for InMemoryPageStore {
    fn find_project(&self, author: &str, slug: &str) -> Option<Project> {
        let inner = self.inner.lock().unwrap();
        inner
            .projects
            .values()
            .find(|p| p.owner == author && p.slug == slug)
            .cloned()
    }

    fn find_project_by_id(&self, project_id: ProjectId) -> Option<Project> {
        let inner = self.inner.lock().unwrap();
        inner.projects.get(&project_id).cloned()
    }

    fn get_project_page(&self, author: &str, slug: &str, path: &PagePath) -> PageResult<PageView> {
        let inner = self.inner.lock().unwrap();
        let project = inner
            .projects
            .values()
            .find(|p| p.owner == author && p.slug == slug)
            .ok_or(PageError::ProjectNotFound)?;

        let page = inner.resolve(project.id, path)?;
        let children = inner.child_slugs(project.id, page);
        Ok(PageView::from_page(page, children))
    }

    fn create_project_page(
        &self,
        project_id: ProjectId,
        new_page: NewProjectPage,
    ) -> PageResult<String> {
        let slug = slug_for_name(&new_page.name)?;
        validate_contents(&new_page.contents)?;

        let mut inner = self.inner.lock().unwrap();
        if !inner.projects.contains_key(&project_id) {
            return Err(PageError::ProjectNotFound);
        }

        let count = inner
            .pages
            .values()
            .filter(|p| p.project_id == project_id)
            .count();
        if count >= MAX_PAGES_PER_PROJECT {
            return Err(PageError::MaxPages(MAX_PAGES_PER_PROJECT));
        }

        // A parent pointing at the home page means "top level".
        let parent = match new_page.parent_id {
            Some(parent_id) => {
                let parent = inner
                    .pages
                    .get(&parent_id)
                    .filter(|p| p.project_id == project_id)
                    .ok_or(PageError::PageNotFound)?;
                if parent.home {
                    None
                } else {
                    if inner.depth_of(parent) >= MAX_PAGE_DEPTH {
                        return Err(PageError::MaxDepth(MAX_PAGE_DEPTH));
                    }
                    Some(parent.id)
                }
            }
            None => None,
        };

        let duplicate = inner.pages.values().any(|p| {
            p.project_id == project_id && !p.home && p.parent == parent && p.slug == slug
        });
        if duplicate {
            return Err(PageError::conflict(format!(
                "a page with slug '{slug}' already exists here"
            )));
        }

        let now = Utc::now();
        let page = ProjectPage {
            id: PageId::new(),
            project_id,
            name: new_page.name.trim().to_string(),
            slug: slug.clone(),
            contents: new_page.contents,
            parent,
            home: false,
            created_at: now,
            updated_at: now,
        };

        tracing::info!(%project_id, page_id = %page.id, %slug, "page created");
        inner.pages.insert(page.id, page);
        Ok(slug)
    }

    fn save_project_page(
        &self,
        project_id: ProjectId,
        page_id: PageId,
        contents: &str,
    ) -> PageResult<()> {
        validate_contents(contents)?;

        let mut inner = self.inner.lock().unwrap();
        let page = inner
            .pages
            .get_mut(&page_id)
            .filter(|p| p.project_id == project_id)
            .ok_or(PageError::PageNotFound)?;

        page.contents = contents.to_string();
        page.updated_at = Utc::now();
        tracing::info!(%project_id, %page_id, "page saved");
        Ok(())
    }

    fn delete_project_page(&self, project_id: ProjectId, page_id: PageId) -> PageResult<()> {
        let mut inner = self.inner.lock().unwrap();
        let page = inner
            .pages
            .get(&page_id)
            .filter(|p| p.project_id == project_id)
            .ok_or(PageError::PageNotFound)?;
        if page.home {
            return Err(PageError::HomePage);
        }

        let doomed = inner.descendants_of(page_id);
        for id in &doomed {
            inner.pages.remove(id);
        }
        inner.pages.remove(&page_id);
        tracing::info!(%project_id, %page_id, descendants = doomed.len(), "page deleted");
        Ok(())
    }
}
