//! Platform users and the display-name heuristic for bare emails.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::common::Displayable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Distinguishes field representatives from the single administrator.
pub enum Role {
    Rep,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Role::Rep => "Rep",
            Role::Admin => "Admin",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl Displayable for User {
    fn display_label(&self) -> String {
        format!("{} <{}> [{}]", self.name, self.email, self.role)
    }
}

/// Derives a presentable name from an email's local part: dots become spaces
/// and each word is capitalized. Single consolidated implementation used
/// everywhere a display name is needed but absent.
pub fn derive_display_name(email: &str) -> String {
    let local = email.split('@').next().unwrap_or(email);
    local
        .split('.')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
