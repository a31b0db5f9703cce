//! Closed status-code mapping for denormalized status columns.
//!
//! A canonical status code read from the origin table is copied into two
//! downstream tables with different column types: a short string in
//! `table1_status` and a boolean in `table2_status`. This module owns that
//! mapping.
//!
//! # Invariants
//! - Every variant has exactly one `(table1_value, table2_value)` pair.
//! - Lookups are pure and cannot fail.
//! - New codes must define both values in `values()`.

use serde::{Deserialize, Serialize};

/// Canonical status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableStatus {
    Y,
}

impl TableStatus {
    /// Every defined status code.
    pub const ALL: [TableStatus; 1] = [TableStatus::Y];

    /// Both derived representations, `(table1_value, table2_value)`.
    pub const fn values(self) -> (&'static str, bool) {
        match self {
            Self::Y => ("1", true),
        }
    }

    /// String form stored in `table1_status.status_value`.
    pub const fn table1_value(self) -> &'static str {
        self.values().0
    }

    /// Boolean form stored in `table2_status.status_flag`.
    pub const fn table2_value(self) -> bool {
        self.values().1
    }

    /// Code as stored in `origin_status.status_code`.
    pub const fn code(self) -> &'static str {
        match self {
            Self::Y => "Y",
        }
    }

    /// Parses a stored code; unknown codes yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.code() == code)
    }
}

/// Result of copying one origin status into both downstream tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirroredStatus {
    pub origin_id: i64,
    pub table1_value: String,
    pub table2_value: bool,
}
