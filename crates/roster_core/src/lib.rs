//! Member/team roster core.
//!
//! SQLite-backed entities with audit timestamps, repository queries, and the
//! `TableStatus` mapping that feeds the denormalized status tables.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::audit::AuditTimestamps;
pub use model::member::{Member, MemberDto, MemberId, MemberWithTeam};
pub use model::table_status::{MirroredStatus, TableStatus};
pub use model::team::{Team, TeamId};
pub use model::validation::ValidationError;
pub use repo::error::{RepoError, RepoResult};
pub use repo::member_repo::{MemberRepository, SqliteMemberRepository};
pub use repo::page::{MemberSortProperty, Page, PageRequest, Sort, SortDirection};
pub use repo::status_repo::{SqliteStatusMirrorRepository, StatusMirrorRepository};
pub use repo::team_repo::{SqliteTeamRepository, TeamRepository};
pub use service::member_service::{MemberService, MemberServiceError, MemberSummary};
pub use service::status_service::StatusMirrorService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
