//! Project records that own tasks.

use super::{ProjectId, UserId};
use serde::{Deserialize, Serialize};

/// Project known to the project directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: String,
    description: String,
    owner_id: UserId,
}

impl Project {
    /// Creates a project with a fresh identifier.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>, owner_id: UserId) -> Self {
        Self::from_parts(ProjectId::new(), name, description, owner_id)
    }

    /// Reconstructs a project from stored parts.
    #[must_use]
    pub fn from_parts(
        id: ProjectId,
        name: impl Into<String>,
        description: impl Into<String>,
        owner_id: UserId,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            owner_id,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the project description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the identifier of the user who owns the project.
    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        self.owner_id
    }
}
