//! Team entity.
//!
//! The one-to-many side of the member relation is not held on the struct;
//! members of a team are loaded through `TeamRepository::find_members`.

use crate::model::audit::AuditTimestamps;
use crate::model::validation::ValidationError;
use serde::{Deserialize, Serialize};

/// Database-assigned team identity.
pub type TeamId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: Option<TeamId>,
    pub name: String,
    /// `None` until the row has been written.
    pub audit: Option<AuditTimestamps>,
}

impl Team {
    /// Creates an unsaved team.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            audit: None,
        }
    }

    /// Returns whether this team has not been persisted yet.
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyTeamName);
        }
        Ok(())
    }
}
