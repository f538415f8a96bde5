//! Error types for directory value parsing.

use thiserror::Error;

/// Error returned while parsing a user role from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown user role: {0}")]
pub struct ParseUserRoleError(pub String);
