//! User and project directory contracts.
//!
//! The directory is an external collaborator: the core resolves users by
//! name or identifier (identity plus role) and projects by identifier, but
//! never writes them.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
