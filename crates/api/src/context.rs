use logihub_auth::{Role, SessionClaims, User};

/// Authenticated session for a request (claims from a validated token).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    claims: SessionClaims,
}

impl SessionContext {
    pub fn new(claims: SessionClaims) -> Self {
        Self { claims }
    }

    pub fn user_id(&self) -> &str {
        &self.claims.sub
    }

    pub fn role(&self) -> Role {
        self.claims.role
    }

    pub fn user(&self) -> User {
        self.claims.user()
    }

    pub fn claims(&self) -> &SessionClaims {
        &self.claims
    }
}
