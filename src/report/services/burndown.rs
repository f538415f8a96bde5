//! Burndown series computation.

use crate::config::ReportConfig;
use crate::directory::domain::ProjectId;
use crate::error::ErrorKind;
use crate::report::{
    domain::{BurndownPoint, CreationWindow},
    ports::{BurndownSource, BurndownSourceError},
};
use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Service-level errors for burndown computation.
#[derive(Debug, Error)]
pub enum BurndownError {
    /// The inclusive range spans more days than allowed.
    #[error("burndown range of {requested} days exceeds the limit of {max}")]
    RangeTooLong {
        /// Days in the requested range.
        requested: i64,
        /// Configured limit.
        max: u32,
    },
    /// The task source failed.
    #[error(transparent)]
    Source(#[from] BurndownSourceError),
}

impl BurndownError {
    /// Classifies the failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::RangeTooLong { .. } => ErrorKind::BadRequest,
            Self::Source(_) => ErrorKind::Storage,
        }
    }
}

/// Result type for burndown computation.
pub type BurndownResult<T> = Result<T, BurndownError>;

/// Computes per-day burndown series.
#[derive(Clone)]
pub struct BurndownService<S>
where
    S: BurndownSource,
{
    source: Arc<S>,
    max_days: u32,
}

impl<S> BurndownService<S>
where
    S: BurndownSource,
{
    /// Creates a service with the default range limit.
    #[must_use]
    pub fn new(source: Arc<S>) -> Self {
        Self::from_config(source, &ReportConfig::default())
    }

    /// Creates a service limited by `reports.max_burndown_days`.
    #[must_use]
    pub const fn from_config(source: Arc<S>, config: &ReportConfig) -> Self {
        Self {
            source,
            max_days: config.max_burndown_days,
        }
    }

    /// Overrides the longest accepted range, in days.
    #[must_use]
    pub const fn with_max_days(mut self, max_days: u32) -> Self {
        self.max_days = max_days;
        self
    }

    /// Returns one point per day of `[start, end]`, oldest first.
    ///
    /// A start after the end yields an empty series.
    ///
    /// # Errors
    ///
    /// Returns [`BurndownError::RangeTooLong`] when the range exceeds the
    /// limit, or [`BurndownError::Source`] when counting fails.
    pub async fn compute(
        &self,
        project_id: ProjectId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> BurndownResult<Vec<BurndownPoint>> {
        if start > end {
            return Ok(Vec::new());
        }
        let requested = (end - start).num_days() + 1;
        if requested > i64::from(self.max_days) {
            return Err(BurndownError::RangeTooLong {
                requested,
                max: self.max_days,
            });
        }

        let windows: Vec<CreationWindow> = start
            .iter_days()
            .take_while(|day| *day <= end)
            .map(CreationWindow::for_day)
            .collect();
        let tallies = self
            .source
            .tally_created_by_status(project_id, &windows)
            .await?;
        debug!(%project_id, days = windows.len(), "computed burndown");

        Ok(windows
            .iter()
            .zip(tallies)
            .map(|(window, tally)| BurndownPoint::from_tally(window.day(), tally))
            .collect())
    }
}
