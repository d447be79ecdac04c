use axum::response::Response;

use logihub_auth::{CommandAuthorization, Permission};

use crate::app::errors;
use crate::context::SessionContext;

/// Small helper wrapper to associate required permissions with a request.
pub struct CmdAuth<C> {
    pub inner: C,
    pub required: Vec<Permission>,
}

impl<C> CommandAuthorization for CmdAuth<C> {
    fn required_permissions(&self) -> &[Permission] {
        &self.required
    }
}

impl<C> CmdAuth<C> {
    pub fn new(inner: C, permission: Permission) -> Self {
        Self { inner, required: vec![permission] }
    }

    /// Unwrap the request if the session may issue it.
    pub fn authorize(self, session: &SessionContext) -> Result<C, Response> {
        crate::authz::authorize_command(session, &self).map_err(errors::forbidden)?;
        Ok(self.inner)
    }
}

/// Guard for read endpoints.
pub fn require_read(session: &SessionContext) -> Result<(), Response> {
    CmdAuth::new((), Permission::READ).authorize(session)
}
