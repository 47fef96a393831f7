use serde::{Deserialize, Serialize};

use pageforge_core::UserId;

use crate::Role;

/// An authenticated actor, as derived from verified token claims.
///
/// Construction is intentionally decoupled from transport: the API layer
/// builds a `Principal` from `JwtClaims` after signature verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: UserId,
    pub name: String,
    pub locked: bool,
    pub roles: Vec<Role>,
}

impl Principal {
    pub fn from_claims(claims: &crate::JwtClaims) -> Self {
        Self {
            user_id: claims.sub,
            name: claims.name.clone(),
            locked: claims.locked,
            roles: claims.roles.clone(),
        }
    }

    /// Convention: the "admin" role grants the wildcard permission everywhere.
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|r| r.as_str() == "admin")
    }
}
