//! Domain types for burndown series.

mod burndown;

pub use burndown::{BurndownPoint, CreationWindow, StatusTally};
