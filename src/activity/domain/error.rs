//! Parse errors for audit values.

use thiserror::Error;

/// Error returned while parsing an action label.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown activity action: {0}")]
pub struct ParseActivityActionError(pub String);
