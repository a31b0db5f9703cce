//! Use-case services over repository contracts.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Turn storage-level failures into semantic errors callers can match on.

pub mod member_service;
pub mod status_service;
