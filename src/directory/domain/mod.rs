//! Domain model for the user and project directory.
//!
//! Users and projects are owned by collaborators outside the core. The core
//! only resolves them, so these types are read-side views.

mod error;
mod ids;
mod project;
mod user;

pub use error::ParseUserRoleError;
pub use ids::{ProjectId, UserId};
pub use project::Project;
pub use user::{User, UserRole};
