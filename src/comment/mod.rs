//! Threaded discussion on tasks.
//!
//! Comments belong to one task for life, may reply to a live comment of the
//! same task, may be anonymous, and are tombstoned on removal together with a
//! `COMMENT_DELETED` audit entry.
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
