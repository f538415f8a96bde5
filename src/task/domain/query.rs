//! Listing filters and ordering for task queries.

use super::{ParseSortOrderError, Task, TaskPriority, TaskStatus};
use crate::directory::domain::ProjectId;
use crate::pagination::PageRequest;

/// Direction applied to the creation timestamp when listing tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    /// Oldest first.
    Ascending,
    /// Newest first.
    #[default]
    Descending,
}

impl SortOrder {
    /// Returns the canonical query representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

impl TryFrom<&str> for SortOrder {
    type Error = ParseSortOrderError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(ParseSortOrderError(value.to_owned())),
        }
    }
}

/// Conjunctive filter over live tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Case-insensitive substring the title must contain.
    pub title_contains: Option<String>,
    /// Exact priority.
    pub priority: Option<TaskPriority>,
    /// Exact status.
    pub status: Option<TaskStatus>,
    /// Exact owning project.
    pub project_id: Option<ProjectId>,
}

impl TaskFilter {
    /// Returns `true` when the task satisfies every supplied criterion.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        let title_ok = self.title_contains.as_deref().is_none_or(|needle| {
            task.title()
                .as_str()
                .to_lowercase()
                .contains(&needle.to_lowercase())
        });
        title_ok
            && self.priority.is_none_or(|priority| task.priority() == priority)
            && self.status.is_none_or(|status| task.status() == status)
            && self.project_id.is_none_or(|project| task.project_id() == project)
    }
}

/// Full listing request: filter, ordering and page window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskQuery {
    /// Filter criteria.
    pub filter: TaskFilter,
    /// Creation-time ordering.
    pub sort: SortOrder,
    /// Page window.
    pub page: PageRequest,
}

impl TaskQuery {
    /// Creates an unfiltered, newest-first query for the given page.
    #[must_use]
    pub fn new(page: PageRequest) -> Self {
        Self {
            filter: TaskFilter::default(),
            sort: SortOrder::default(),
            page,
        }
    }

    /// Replaces the filter.
    #[must_use]
    pub fn with_filter(mut self, filter: TaskFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Replaces the sort order.
    #[must_use]
    pub const fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }
}
