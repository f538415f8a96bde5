//! Unit tests for burndown reporting.
