//! Pure authorization checks.
//!
//! No IO, no panics, no business logic. The API layer resolves a principal's
//! granted permissions (from project membership and roles) and calls
//! [`authorize`] before dispatching any mutating operation.

use std::collections::HashSet;

use thiserror::Error;

use crate::{Permission, Principal};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("account is locked")]
    Locked,

    #[error("forbidden: missing permission '{0}'")]
    Forbidden(String),
}

/// Authorize a principal holding `granted` permissions for `required`.
///
/// A locked account is refused regardless of its grants; the wildcard
/// permission `"*"` satisfies any requirement.
pub fn authorize(
    principal: &Principal,
    granted: &[Permission],
    required: &Permission,
) -> Result<(), AuthzError> {
    if principal.locked {
        return Err(AuthzError::Locked);
    }

    let perms: HashSet<&str> = granted.iter().map(|p| p.as_str()).collect();

    if perms.contains("*") || perms.contains(required.as_str()) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden(required.as_str().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pageforge_core::UserId;

    fn principal(locked: bool) -> Principal {
        Principal {
            user_id: UserId::new(),
            name: "alice".to_string(),
            locked,
            roles: Vec::new(),
        }
    }

    #[test]
    fn grants_exact_permission() {
        let p = principal(false);
        let granted = vec![Permission::edit_page()];
        assert_eq!(authorize(&p, &granted, &Permission::edit_page()), Ok(()));
    }

    #[test]
    fn wildcard_grants_everything() {
        let p = principal(false);
        let granted = vec![Permission::new("*")];
        assert_eq!(authorize(&p, &granted, &Permission::edit_page()), Ok(()));
    }

    #[test]
    fn missing_permission_is_forbidden() {
        let p = principal(false);
        let err = authorize(&p, &[], &Permission::edit_page()).unwrap_err();
        assert_eq!(err, AuthzError::Forbidden("pages.edit".to_string()));
    }

    #[test]
    fn locked_account_loses_even_wildcard() {
        let p = principal(true);
        let granted = vec![Permission::new("*")];
        assert_eq!(
            authorize(&p, &granted, &Permission::edit_page()),
            Err(AuthzError::Locked)
        );
    }
}
