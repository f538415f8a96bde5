//! User identity and role as resolved from the directory.

use super::{ParseUserRoleError, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role a user holds at the time an action is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Administrative user.
    Admin,
    /// Regular user.
    User,
}

impl UserRole {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

impl TryFrom<&str> for UserRole {
    type Error = ParseUserRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            _ => Err(ParseUserRoleError(value.to_owned())),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User record exposed by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    role: UserRole,
}

impl User {
    /// Creates a user with a fresh identifier.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: UserRole) -> Self {
        Self::from_parts(UserId::new(), name, email, role)
    }

    /// Reconstructs a user from stored parts.
    #[must_use]
    pub fn from_parts(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        role: UserRole,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            role,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display name used for name-based lookups.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the contact email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the user's current role.
    #[must_use]
    pub const fn role(&self) -> UserRole {
        self.role
    }
}
