//! Application services for burndown analytics.

mod burndown;

pub use burndown::{BurndownError, BurndownResult, BurndownService};
