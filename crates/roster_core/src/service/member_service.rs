//! Member use-case service.
//!
//! # Invariants
//! - A member is never written with a `team_id` that does not resolve to a
//!   saved team; the check runs before the foreign key would reject it.
//! - Service APIs never bypass repository validation.

use crate::model::member::{Member, MemberId};
use crate::model::team::TeamId;
use crate::repo::error::RepoError;
use crate::repo::member_repo::MemberRepository;
use crate::repo::page::{Page, PageRequest};
use crate::repo::team_repo::TeamRepository;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum MemberServiceError {
    /// Referenced team does not exist.
    TeamNotFound(TeamId),
    /// Target member does not exist.
    MemberNotFound(MemberId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for MemberServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TeamNotFound(id) => write!(f, "team not found: {id}"),
            Self::MemberNotFound(id) => write!(f, "member not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for MemberServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for MemberServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound {
                table: "members",
                id,
            } => Self::MemberNotFound(id),
            RepoError::NotFound { table: "teams", id } => Self::TeamNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Compact member view returned by paged listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberSummary {
    pub id: Option<MemberId>,
    pub username: String,
    pub age: i32,
}

pub struct MemberService<M: MemberRepository, T: TeamRepository> {
    members: M,
    teams: T,
}

impl<M: MemberRepository, T: TeamRepository> MemberService<M, T> {
    pub fn new(members: M, teams: T) -> Self {
        Self { members, teams }
    }

    /// Creates a member, optionally attached to an existing team.
    pub fn register(
        &self,
        username: impl Into<String>,
        age: i32,
        team_id: Option<TeamId>,
    ) -> Result<Member, MemberServiceError> {
        let mut member = Member::with_age(username, age);
        if let Some(team_id) = team_id {
            self.ensure_team_exists(team_id)?;
            member.team_id = Some(team_id);
        }
        self.members.save(&mut member)?;
        Ok(member)
    }

    /// Moves a member to another team.
    pub fn change_team(
        &self,
        member_id: MemberId,
        team_id: TeamId,
    ) -> Result<Member, MemberServiceError> {
        let mut member = self
            .members
            .find_by_id(member_id)?
            .ok_or(MemberServiceError::MemberNotFound(member_id))?;
        let team = self
            .teams
            .find_by_id(team_id)?
            .ok_or(MemberServiceError::TeamNotFound(team_id))?;

        member.change_team(&team).map_err(RepoError::from)?;
        self.members.save(&mut member)?;
        Ok(member)
    }

    /// Pages members of one age in the order given by `request`.
    pub fn page_by_age(
        &self,
        age: i32,
        request: &PageRequest,
    ) -> Result<Page<MemberSummary>, MemberServiceError> {
        let page = self.members.find_by_age(age, request)?;
        Ok(page.map(|member| MemberSummary {
            id: member.id,
            username: member.username,
            age: member.age,
        }))
    }

    fn ensure_team_exists(&self, team_id: TeamId) -> Result<(), MemberServiceError> {
        match self.teams.find_by_id(team_id)? {
            Some(_) => Ok(()),
            None => Err(MemberServiceError::TeamNotFound(team_id)),
        }
    }
}
