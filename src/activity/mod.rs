//! Append-only audit trail of lifecycle-affecting actions.
//!
//! Task and comment writers append entries through their own repositories so
//! the write and the entry commit together; [`services::ActivityLogService`]
//! is the boundary for callers that supply role and action as text.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
