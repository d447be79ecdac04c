//! API-side authorization guard.
//!
//! Handlers check permissions here before touching the data service, keeping
//! the data layer auth-agnostic.

use logihub_auth::{AuthzError, CommandAuthorization, authorize};

use crate::context::SessionContext;

/// Check every permission `command` requires against the session's role.
pub fn authorize_command<C: CommandAuthorization>(session: &SessionContext, command: &C) -> Result<(), AuthzError> {
    for perm in command.required_permissions() {
        authorize(session.role(), perm)?;
    }
    Ok(())
}
