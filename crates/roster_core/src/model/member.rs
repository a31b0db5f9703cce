//! Member entity and its read projections.
//!
//! # Invariants
//! - `username` is non-empty after trimming.
//! - `age` is never negative.
//! - `team_id`, when set, references a saved team.

use crate::model::audit::AuditTimestamps;
use crate::model::team::{Team, TeamId};
use crate::model::validation::ValidationError;
use serde::{Deserialize, Serialize};

/// Database-assigned member identity.
pub type MemberId = i64;

/// Member record with a many-to-one link to `Team`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: Option<MemberId>,
    pub username: String,
    pub age: i32,
    pub team_id: Option<TeamId>,
    /// `None` until the row has been written.
    pub audit: Option<AuditTimestamps>,
}

impl Member {
    /// Creates an unsaved member with age `0` and no team.
    pub fn new(username: impl Into<String>) -> Self {
        Self::with_age(username, 0)
    }

    /// Creates an unsaved member without a team.
    pub fn with_age(username: impl Into<String>, age: i32) -> Self {
        Self {
            id: None,
            username: username.into(),
            age,
            team_id: None,
            audit: None,
        }
    }

    /// Creates an unsaved member that belongs to an existing team.
    pub fn with_team(username: impl Into<String>, age: i32, team_id: TeamId) -> Self {
        let mut member = Self::with_age(username, age);
        member.team_id = Some(team_id);
        member
    }

    /// Points this member at `team`.
    ///
    /// # Errors
    /// - `UnsavedTeam` when `team` has no id yet.
    pub fn change_team(&mut self, team: &Team) -> Result<(), ValidationError> {
        let team_id = team.id.ok_or(ValidationError::UnsavedTeam)?;
        self.team_id = Some(team_id);
        Ok(())
    }

    /// Drops the team relation.
    pub fn leave_team(&mut self) {
        self.team_id = None;
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.username.trim().is_empty() {
            return Err(ValidationError::EmptyUsername);
        }
        if self.age < 0 {
            return Err(ValidationError::NegativeAge(self.age));
        }
        Ok(())
    }
}

/// Member joined with its team name. Members without a team are not listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDto {
    pub id: MemberId,
    pub username: String,
    pub team_name: String,
}

/// Member loaded together with its team in a single query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberWithTeam {
    pub member: Member,
    pub team: Option<Team>,
}

#[cfg(test)]
mod tests {
    use super::Member;
    use crate::model::team::Team;
    use crate::model::validation::ValidationError;

    #[test]
    fn constructors_leave_identity_and_audit_unset() {
        let member = Member::new("memberA");
        assert!(member.is_new());
        assert_eq!(member.age, 0);
        assert_eq!(member.team_id, None);
        assert_eq!(member.audit, None);

        let member = Member::with_team("memberB", 20, 7);
        assert_eq!(member.age, 20);
        assert_eq!(member.team_id, Some(7));
    }

    #[test]
    fn change_team_requires_saved_team() {
        let mut member = Member::with_age("member1", 10);
        let mut team = Team::new("teamA");

        assert_eq!(
            member.change_team(&team),
            Err(ValidationError::UnsavedTeam)
        );

        team.id = Some(3);
        member.change_team(&team).unwrap();
        assert_eq!(member.team_id, Some(3));

        member.leave_team();
        assert_eq!(member.team_id, None);
    }

    #[test]
    fn validate_rejects_blank_username_and_negative_age() {
        assert_eq!(
            Member::new("  ").validate(),
            Err(ValidationError::EmptyUsername)
        );
        assert_eq!(
            Member::with_age("member1", -1).validate(),
            Err(ValidationError::NegativeAge(-1))
        );
        assert!(Member::with_age("member1", 0).validate().is_ok());
    }
}
