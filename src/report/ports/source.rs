//! Read-only counting port over task records.

use crate::directory::domain::ProjectId;
use crate::report::domain::{CreationWindow, StatusTally};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for burndown source reads.
pub type BurndownSourceResult<T> = Result<T, BurndownSourceError>;

/// Counts live tasks by creation window and current status.
#[async_trait]
pub trait BurndownSource: Send + Sync {
    /// Returns one tally per window, in the order the windows were given.
    ///
    /// Every tally of one call observes the same snapshot of the task set.
    async fn tally_created_by_status(
        &self,
        project_id: ProjectId,
        windows: &[CreationWindow],
    ) -> BurndownSourceResult<Vec<StatusTally>>;
}

/// Errors returned by burndown sources.
#[derive(Debug, Clone, Error)]
pub enum BurndownSourceError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl BurndownSourceError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
