//! Domain model for task comments.

mod comment;
mod error;
mod ids;

pub use comment::{Comment, PersistedCommentData};
pub use error::CommentDomainError;
pub use ids::{CommentContent, CommentId};
