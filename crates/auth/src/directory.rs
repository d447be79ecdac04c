//! The two built-in accounts.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Role;

/// An authenticated account, without its password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
}

struct Account {
    user: User,
    password: &'static str,
}

pub struct MockUserDirectory {
    accounts: Vec<Account>,
}

impl Default for MockUserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl MockUserDirectory {
    pub fn new() -> Self {
        let account = |id: &str, email: &str, password: &'static str, name: &str, role| Account {
            user: User { id: id.into(), email: email.into(), name: name.into(), role },
            password,
        };
        Self {
            accounts: vec![
                account("1", "admin@logistics.com", "admin123", "Admin User", Role::Admin),
                account("2", "user@logistics.com", "user123", "Regular User", Role::User),
            ],
        }
    }

    /// Exact, case-sensitive match on both email and password.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthError> {
        tracing::info!(email, "login attempt");
        match self
            .accounts
            .iter()
            .find(|a| a.user.email == email && a.password == password)
        {
            Some(a) => Ok(a.user.clone()),
            None => {
                tracing::info!(email, "login rejected");
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    pub fn find(&self, id: &str) -> Option<&User> {
        self.accounts.iter().map(|a| &a.user).find(|u| u.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_accounts_log_in() {
        let dir = MockUserDirectory::new();
        let admin = dir.authenticate("admin@logistics.com", "admin123").unwrap();
        assert_eq!(admin.id, "1");
        assert_eq!(admin.name, "Admin User");
        assert_eq!(admin.role, Role::Admin);

        let user = dir.authenticate("user@logistics.com", "user123").unwrap();
        assert_eq!(user.role, Role::User);
    }

    #[test]
    fn wrong_password_or_unknown_email_fails() {
        let dir = MockUserDirectory::new();
        assert_eq!(
            dir.authenticate("admin@logistics.com", "user123"),
            Err(AuthError::InvalidCredentials)
        );
        assert!(dir.authenticate("ADMIN@logistics.com", "admin123").is_err());
        assert!(dir.authenticate("", "").is_err());
    }

    #[test]
    fn serialized_user_has_no_password() {
        let user = MockUserDirectory::new().authenticate("user@logistics.com", "user123").unwrap();
        let v = serde_json::to_value(&user).unwrap();
        assert!(v.get("password").is_none());
        assert_eq!(v["role"], "user");
    }
}
