//! Stable failure classification shared by every service.
//!
//! Service errors carry rich, module-specific variants. Callers that only
//! need to decide how to respond (for example a transport layer mapping
//! failures to status codes) inspect [`ErrorKind`] instead of matching on
//! messages.

use std::fmt;

/// Distinguishable outcome class of a failed core operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A referenced task, project, comment, or user does not exist.
    NotFound,
    /// The input is malformed or violates a policy of the core.
    BadRequest,
    /// The actor may not mutate the targeted record.
    Forbidden,
    /// The write lost a race against a concurrent change or duplicates an
    /// existing identity.
    Conflict,
    /// A structural invariant of stored data does not hold.
    Fatal,
    /// The backing store failed.
    Storage,
}

impl ErrorKind {
    /// Returns a stable lowercase label for the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::BadRequest => "bad_request",
            Self::Forbidden => "forbidden",
            Self::Conflict => "conflict",
            Self::Fatal => "fatal",
            Self::Storage => "storage",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
