//! Domain model for task lifecycle management.
//!
//! Tasks carry a validated title, closed status and priority enumerations,
//! directory references for creator, assignee and project, and an
//! optimistic-concurrency version. Removal is a tombstone.

mod error;
mod ids;
mod query;
mod task;

pub use error::{
    ParseSortOrderError, ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError,
};
pub use ids::{TaskId, TaskTitle};
pub use query::{SortOrder, TaskFilter, TaskQuery};
pub use task::{NewTask, PersistedTaskData, Task, TaskChanges, TaskPriority, TaskStatus};
