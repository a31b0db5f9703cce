//! Domain records for the member/team roster.
//!
//! # Responsibility
//! - Define entity shapes (`Member`, `Team`) and read projections.
//! - Define the closed `TableStatus` mapping used for denormalized columns.
//!
//! # Invariants
//! - Entity ids are `None` until the database assigns them.
//! - Audit timestamps are an embedded value owned by each entity and are
//!   only ever written by the persistence layer.

pub mod audit;
pub mod member;
pub mod table_status;
pub mod team;
pub mod validation;
