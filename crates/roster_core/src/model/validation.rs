//! Input validation errors shared by entities and paging requests.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Invariant violations detected before any SQL runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// `username` is empty after trimming.
    EmptyUsername,
    /// `age` is below zero.
    NegativeAge(i32),
    /// `name` is empty after trimming.
    EmptyTeamName,
    /// A relation was set to a team that has not been saved yet.
    UnsavedTeam,
    /// Page size must be at least one.
    ZeroPageSize,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username cannot be empty"),
            Self::NegativeAge(age) => write!(f, "age cannot be negative, got {age}"),
            Self::EmptyTeamName => write!(f, "team name cannot be empty"),
            Self::UnsavedTeam => write!(f, "team must be saved before it can be referenced"),
            Self::ZeroPageSize => write!(f, "page size must be at least 1"),
        }
    }
}

impl Error for ValidationError {}
