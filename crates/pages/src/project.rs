use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use pageforge_auth::Permission;
use pageforge_core::{ProjectId, UserId};

/// Who may view a project (and therefore its pages).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectVisibility {
    Public,
    Private,
}

/// A project: the resource that owns documentation pages.
///
/// Projects are addressed by `{author}/{slug}` in URLs. Membership carries
/// project-scoped permission grants; the owner implicitly holds the wildcard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    /// Handle of the owning author (URL namespace).
    pub owner: String,
    pub slug: String,
    pub visibility: ProjectVisibility,
    pub owner_id: UserId,
    pub members: HashMap<UserId, Vec<Permission>>,
}

impl Project {
    pub fn new(
        owner: impl Into<String>,
        slug: impl Into<String>,
        visibility: ProjectVisibility,
        owner_id: UserId,
    ) -> Self {
        Self {
            id: ProjectId::new(),
            owner: owner.into(),
            slug: slug.into(),
            visibility,
            owner_id,
            members: HashMap::new(),
        }
    }

    pub fn with_member(mut self, user_id: UserId, permissions: Vec<Permission>) -> Self {
        self.members.insert(user_id, permissions);
        self
    }

    /// Visibility predicate: public projects are visible to everyone
    /// (including anonymous callers); private ones only to the owner and
    /// members.
    pub fn visible_to(&self, viewer: Option<UserId>) -> bool {
        match self.visibility {
            ProjectVisibility::Public => true,
            ProjectVisibility::Private => match viewer {
                Some(user_id) => user_id == self.owner_id || self.members.contains_key(&user_id),
                None => false,
            },
        }
    }

    /// Project-scoped permissions granted to a user.
    pub fn permissions_for(&self, user_id: UserId) -> Vec<Permission> {
        if user_id == self.owner_id {
            return vec![Permission::new("*")];
        }
        self.members.get(&user_id).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_project_is_visible_to_anonymous() {
        let p = Project::new("alice", "widget", ProjectVisibility::Public, UserId::new());
        assert!(p.visible_to(None));
        assert!(p.visible_to(Some(UserId::new())));
    }

    #[test]
    fn private_project_is_hidden_from_strangers() {
        let owner = UserId::new();
        let member = UserId::new();
        let p = Project::new("alice", "widget", ProjectVisibility::Private, owner)
            .with_member(member, vec![Permission::edit_page()]);

        assert!(!p.visible_to(None));
        assert!(!p.visible_to(Some(UserId::new())));
        assert!(p.visible_to(Some(owner)));
        assert!(p.visible_to(Some(member)));
    }

    #[test]
    fn owner_holds_wildcard() {
        let owner = UserId::new();
        let p = Project::new("alice", "widget", ProjectVisibility::Public, owner);
        assert_eq!(p.permissions_for(owner), vec![Permission::new("*")]);
        assert!(p.permissions_for(UserId::new()).is_empty());
    }
}
