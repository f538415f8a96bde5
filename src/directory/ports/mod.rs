//! Port contracts for directory lookups.

pub mod directory;

pub use directory::{DirectoryError, DirectoryResult, ProjectDirectory, UserDirectory};

#[cfg(test)]
pub use directory::MockUserDirectory;
