use pageforge_auth::Principal;

/// Principal context for a request.
///
/// Inserted by the auth middleware only when a valid bearer token was
/// presented; anonymous requests carry no context and handlers extract it as
/// `Option<Extension<PrincipalContext>>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    principal: Principal,
}

impl PrincipalContext {
    pub fn new(principal: Principal) -> Self {
        Self { principal }
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }
}
