//! Port contracts for burndown analytics.

pub mod source;

pub use source::{BurndownSource, BurndownSourceError, BurndownSourceResult};
