//! Team repository contract and SQLite implementation.
//!
//! # Invariants
//! - Deleting a team keeps its members and clears their `team_id`.
//! - `find_members` lists members by `id ASC`.

use crate::model::audit::AuditTimestamps;
use crate::model::member::Member;
use crate::model::team::{Team, TeamId};
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::member_repo::{parse_member_row, MEMBER_SELECT_SQL};
use crate::repo::schema::{ensure_connection_ready, RequiredTable, NOW_MS_SQL};
use log::info;
use rusqlite::{params, Connection, OptionalExtension, Row};

const TEAM_SELECT_SQL: &str = "SELECT id, name, created_at, updated_at FROM teams";

const TEAM_TABLES: &[RequiredTable] = &[
    ("teams", &["id", "name", "created_at", "updated_at"]),
    (
        "members",
        &["id", "username", "age", "team_id", "created_at", "updated_at"],
    ),
];

pub trait TeamRepository {
    /// Inserts an unsaved team or updates a saved one, then refreshes `id`
    /// and `audit` on the passed value.
    fn save(&self, team: &mut Team) -> RepoResult<TeamId>;
    fn find_by_id(&self, id: TeamId) -> RepoResult<Option<Team>>;
    fn find_all(&self) -> RepoResult<Vec<Team>>;
    fn count(&self) -> RepoResult<u64>;
    fn delete(&self, team: &Team) -> RepoResult<()>;
    /// Members whose `team_id` points at `id`.
    fn find_members(&self, id: TeamId) -> RepoResult<Vec<Member>>;
}

pub struct SqliteTeamRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTeamRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, TEAM_TABLES)?;
        Ok(Self { conn })
    }
}

impl TeamRepository for SqliteTeamRepository<'_> {
    fn save(&self, team: &mut Team) -> RepoResult<TeamId> {
        team.validate()?;

        let (id, mode) = match team.id {
            None => {
                self.conn.execute(
                    "INSERT INTO teams (name) VALUES (?1);",
                    [team.name.as_str()],
                )?;
                (self.conn.last_insert_rowid(), "insert")
            }
            Some(id) => {
                let changed = self.conn.execute(
                    &format!(
                        "UPDATE teams
                         SET name = ?1, updated_at = MAX(updated_at, {NOW_MS_SQL})
                         WHERE id = ?2;"
                    ),
                    params![team.name.as_str(), id],
                )?;
                if changed == 0 {
                    return Err(RepoError::NotFound { table: "teams", id });
                }
                (id, "update")
            }
        };

        team.id = Some(id);
        team.audit = Some(load_team_audit(self.conn, id)?);
        info!("event=team_save module=repo status=ok mode={mode} team_id={id}");
        Ok(id)
    }

    fn find_by_id(&self, id: TeamId) -> RepoResult<Option<Team>> {
        let team = self
            .conn
            .query_row(
                &format!("{TEAM_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_team_row,
            )
            .optional()?;
        Ok(team)
    }

    fn find_all(&self) -> RepoResult<Vec<Team>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TEAM_SELECT_SQL} ORDER BY id ASC;"))?;
        let teams = stmt
            .query_map([], parse_team_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(teams)
    }

    fn count(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM teams;", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn delete(&self, team: &Team) -> RepoResult<()> {
        let id = team.id.ok_or(RepoError::Unsaved("teams"))?;
        let changed = self.conn.execute("DELETE FROM teams WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound { table: "teams", id });
        }
        info!("event=team_delete module=repo status=ok team_id={id}");
        Ok(())
    }

    fn find_members(&self, id: TeamId) -> RepoResult<Vec<Member>> {
        let mut stmt = self.conn.prepare(&format!(
            "{MEMBER_SELECT_SQL} WHERE team_id = ?1 ORDER BY id ASC;"
        ))?;
        let members = stmt
            .query_map([id], parse_member_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(members)
    }
}

fn parse_team_row(row: &Row<'_>) -> rusqlite::Result<Team> {
    Ok(Team {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        audit: Some(AuditTimestamps {
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        }),
    })
}

fn load_team_audit(conn: &Connection, id: TeamId) -> RepoResult<AuditTimestamps> {
    let audit = conn.query_row(
        "SELECT created_at, updated_at FROM teams WHERE id = ?1;",
        [id],
        |row| {
            Ok(AuditTimestamps {
                created_at: row.get(0)?,
                updated_at: row.get(1)?,
            })
        },
    )?;
    Ok(audit)
}
