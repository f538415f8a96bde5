//! Application services for the audit trail.

mod log;

pub use log::{
    ActivityLogService, ActivityServiceError, ActivityServiceResult, AppendActivityRequest,
};
