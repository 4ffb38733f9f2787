//! # TaskLedger Shared Library
//!
//! Domain types, persistence and the role-gated lifecycle services used by the
//! TaskLedger API server and the seeding tool.
//!
//! ## Module Organization
//!
//! - `models`: users, projects, tasks and task logs, with their SQL queries
//! - `store`: the `EntityStore` abstraction and its Postgres / in-memory backends
//! - `auth`: caller identity and the role gate
//! - `services`: project, task, time log and login operations
//! - `error`: the service error taxonomy
//! - `db`: connection pool and migrations
//! - `seed`: demo data

pub mod auth;
pub mod db;
pub mod error;
pub mod models;
pub mod seed;
pub mod services;
pub mod store;

/// Current version of the TaskLedger shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
