//! Repository contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define data access contracts for members, teams and status mirroring.
//! - Keep SQL inside the persistence boundary.
//!
//! # Invariants
//! - Write paths validate entities before any SQL mutation.
//! - Repositories refuse connections that have not been migrated.
//! - Missing rows on update/delete surface as `RepoError::NotFound`.

pub mod error;
pub mod member_repo;
pub mod page;
mod schema;
pub mod status_repo;
pub mod team_repo;
