//! Burndown analytics derived from current task records.
//!
//! Each day of a range counts the project's live tasks created that day,
//! bucketed by their current status. The series is a creation-day cohort,
//! not a historical snapshot of status on that day.

pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
