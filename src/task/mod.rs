//! Task lifecycle management.
//!
//! Tasks are created against a project from directory names, updated field
//! by field, moved freely between statuses, and tombstoned on removal. Every
//! write commits together with one audit entry. The module follows hexagonal
//! architecture:
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
