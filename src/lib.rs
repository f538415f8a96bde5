//! Tasktrail: task tracking with an immutable audit trail.
//!
//! This crate tracks tasks through their lifecycle, records every
//! state-affecting action in an append-only activity log, hosts threaded
//! comments per task, and derives daily burndown series from task records.
//!
//! # Architecture
//!
//! Tasktrail follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`task`]: Task lifecycle and its audited writes
//! - [`comment`]: Comment threads with soft deletion
//! - [`activity`]: Append-only activity log
//! - [`report`]: Burndown aggregation
//! - [`directory`]: User and project lookups consumed by the core

pub mod activity;
pub mod comment;
pub mod config;
pub mod db;
pub mod directory;
pub mod error;
pub mod pagination;
pub mod report;
pub mod task;
pub mod telemetry;
