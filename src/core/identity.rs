//! Session identity resolution and the local user directory.

use std::collections::BTreeMap;

use tracing::info;

use crate::core::services::{ServiceError, ServiceResult};
use crate::domain::common::Displayable;
use crate::domain::user::{derive_display_name, Role, User};

/// Resolves the current session to a user identity. Authentication itself
/// is an external collaborator; the core only consumes its result.
pub trait IdentityProvider: Send + Sync {
    fn current_user(&self) -> Option<User>;

    fn is_admin(&self) -> bool {
        self.current_user().map(|user| user.is_admin()).unwrap_or(false)
    }
}

/// In-memory user directory keyed by lowercased email, with one designated
/// admin address.
pub struct Directory {
    admin_email: String,
    users: BTreeMap<String, User>,
}

impl Directory {
    pub fn new(admin_email: impl Into<String>) -> Self {
        Self {
            admin_email: admin_email.into(),
            users: BTreeMap::new(),
        }
    }

    /// Resolves a signing-in email to a user. The configured admin address
    /// (case-insensitive) becomes the sole admin; anyone else is a rep whose
    /// display name is the registered one, else derived from the email.
    pub fn login(&mut self, email: &str) -> User {
        if email.eq_ignore_ascii_case(&self.admin_email) {
            return User::new("Admin", email, Role::Admin);
        }
        let key = email.to_lowercase();
        let user = self
            .users
            .entry(key)
            .or_insert_with(|| User::new(derive_display_name(email), email, Role::Rep))
            .clone();
        info!("signed in {}", user.display_label());
        user
    }

    /// Registers a new rep, rejecting duplicate emails.
    pub fn register(&mut self, name: &str, email: &str) -> ServiceResult<User> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ServiceError::Validation("name is required".into()));
        }
        let key = email.to_lowercase();
        if self.users.contains_key(&key) || email.eq_ignore_ascii_case(&self.admin_email) {
            return Err(ServiceError::Validation(
                "an account with this email already exists".into(),
            ));
        }
        let user = User::new(trimmed, email, Role::Rep);
        self.users.insert(key, user.clone());
        info!(email = %user.email, "user registered");
        Ok(user)
    }

    pub fn is_known(&self, email: &str) -> bool {
        self.users.contains_key(&email.to_lowercase())
    }
}
