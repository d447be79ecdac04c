//! `logihub-auth`: session authentication and role-based authorization.
//!
//! Decoupled from HTTP and storage: the API layer extracts bearer tokens and
//! asks this crate who the caller is and what they may do.

pub mod authorize;
pub mod claims;
pub mod directory;
pub mod permissions;
pub mod roles;
pub mod tokens;

pub use authorize::{AuthzError, CommandAuthorization, authorize, permissions_for};
pub use claims::{SessionClaims, TokenValidationError, validate_claims};
pub use directory::{AuthError, MockUserDirectory, User};
pub use permissions::Permission;
pub use roles::Role;
pub use tokens::{Hs256SessionTokens, SessionTokens, TokenError};
