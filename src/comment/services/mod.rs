//! Orchestration services for comment threads.

mod requests;
mod thread;

pub use requests::{CreateCommentRequest, UpdateCommentRequest};
pub use thread::{
    CommentDeletion, CommentService, CommentServiceError, CommentServiceResult, CommentView,
};
