//! Error types for comment validation.

use thiserror::Error;

/// Errors returned while constructing comment values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommentDomainError {
    /// The content is empty after trimming.
    #[error("comment content must not be empty")]
    EmptyContent,
}
