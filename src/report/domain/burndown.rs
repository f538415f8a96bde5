//! Daily burndown points and the windows they are counted over.

use crate::task::domain::TaskStatus;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Half-open UTC interval `[start, end)` covering one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CreationWindow {
    day: NaiveDate,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl CreationWindow {
    /// Covers `day` from midnight UTC up to the next midnight.
    #[must_use]
    pub fn for_day(day: NaiveDate) -> Self {
        let start = day.and_time(NaiveTime::MIN).and_utc();
        let end = day
            .succ_opt()
            .map_or(DateTime::<Utc>::MAX_UTC, |next| next.and_time(NaiveTime::MIN).and_utc());
        Self { day, start, end }
    }

    /// Returns the calendar day.
    #[must_use]
    pub const fn day(&self) -> NaiveDate {
        self.day
    }

    /// Returns the inclusive lower bound.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Returns the exclusive upper bound.
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Returns `true` when `instant` falls inside the window.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

/// Task counts per reported status for one window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusTally {
    /// Completed tasks.
    pub completed: u64,
    /// In-progress tasks.
    pub in_progress: u64,
    /// Not-started tasks.
    pub not_started: u64,
}

impl StatusTally {
    /// Counts one task. Closed tasks are not reported.
    pub fn record(&mut self, status: TaskStatus) {
        self.add(status, 1);
    }

    /// Counts `count` tasks sharing a status.
    pub fn add(&mut self, status: TaskStatus, count: u64) {
        match status {
            TaskStatus::Completed => self.completed += count,
            TaskStatus::InProgress => self.in_progress += count,
            TaskStatus::NotStarted => self.not_started += count,
            TaskStatus::Closed => {}
        }
    }
}

/// One day of a burndown series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BurndownPoint {
    /// Calendar day, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Tasks created that day that are now completed.
    pub completed_count: u64,
    /// Tasks created that day that are now in progress.
    pub in_progress_count: u64,
    /// Tasks created that day that have not started.
    pub not_started_count: u64,
}

impl BurndownPoint {
    /// Builds a point from a window's tally.
    #[must_use]
    pub const fn from_tally(date: NaiveDate, tally: StatusTally) -> Self {
        Self {
            date,
            completed_count: tally.completed,
            in_progress_count: tally.in_progress,
            not_started_count: tally.not_started,
        }
    }
}
