//! Member repository contract and SQLite implementation.
//!
//! # Responsibility
//! - CRUD over `members` with audit timestamps owned by SQLite.
//! - Field-equality, projection, join and paged queries.
//!
//! # Invariants
//! - `save` validates before writing and never touches `created_at`.
//! - List queries have a deterministic order (`id ASC` unless stated).
//! - Queries returning a collection return an empty `Vec` when nothing
//!   matches; single-result queries return `None`.

use crate::model::audit::AuditTimestamps;
use crate::model::member::{Member, MemberDto, MemberId, MemberWithTeam};
use crate::model::team::Team;
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::page::{Page, PageRequest, Sort};
use crate::repo::schema::{ensure_connection_ready, RequiredTable, NOW_MS_SQL};
use log::{debug, info};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

pub(crate) const MEMBER_SELECT_SQL: &str = "SELECT
    id,
    username,
    age,
    team_id,
    created_at,
    updated_at
FROM members";

const MEMBER_TABLES: &[RequiredTable] = &[
    (
        "members",
        &["id", "username", "age", "team_id", "created_at", "updated_at"],
    ),
    ("teams", &["id", "name", "created_at", "updated_at"]),
];

/// Repository interface for member persistence and queries.
pub trait MemberRepository {
    /// Inserts an unsaved member or updates a saved one, then refreshes
    /// `id` and `audit` on the passed value.
    fn save(&self, member: &mut Member) -> RepoResult<MemberId>;
    fn find_by_id(&self, id: MemberId) -> RepoResult<Option<Member>>;
    fn find_all(&self) -> RepoResult<Vec<Member>>;
    fn count(&self) -> RepoResult<u64>;
    fn delete(&self, member: &Member) -> RepoResult<()>;
    fn delete_by_id(&self, id: MemberId) -> RepoResult<()>;
    /// Members matching both `username` and `age`.
    fn find_user(&self, username: &str, age: i32) -> RepoResult<Vec<Member>>;
    /// Members that have a team, projected with the team name.
    fn find_member_dto(&self) -> RepoResult<Vec<MemberDto>>;
    /// Members whose username is any of `names`.
    fn find_by_names(&self, names: &[String]) -> RepoResult<Vec<Member>>;
    fn find_list_by_username(&self, username: &str) -> RepoResult<Vec<Member>>;
    /// # Errors
    /// - `NonUniqueResult` when several members share `username`.
    fn find_member_by_username(&self, username: &str) -> RepoResult<Option<Member>>;
    fn find_by_age(&self, age: i32, request: &PageRequest) -> RepoResult<Page<Member>>;
    /// Members and their teams loaded with one `LEFT JOIN`.
    fn find_member_fetch_join(&self) -> RepoResult<Vec<MemberWithTeam>>;
    /// All members ordered by `username ASC, id ASC`.
    fn find_member_custom(&self) -> RepoResult<Vec<Member>>;
}

/// SQLite-backed member repository.
pub struct SqliteMemberRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMemberRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, MEMBER_TABLES)?;
        Ok(Self { conn })
    }

    fn query_members(&self, sql: &str, values: Vec<Value>) -> RepoResult<Vec<Member>> {
        let mut stmt = self.conn.prepare(sql)?;
        let members = stmt
            .query_map(params_from_iter(values), parse_member_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(members)
    }
}

impl MemberRepository for SqliteMemberRepository<'_> {
    fn save(&self, member: &mut Member) -> RepoResult<MemberId> {
        member.validate()?;

        let (id, mode) = match member.id {
            None => {
                self.conn.execute(
                    "INSERT INTO members (username, age, team_id) VALUES (?1, ?2, ?3);",
                    params![member.username.as_str(), member.age, member.team_id],
                )?;
                (self.conn.last_insert_rowid(), "insert")
            }
            Some(id) => {
                let changed = self.conn.execute(
                    &format!(
                        "UPDATE members
                         SET
                            username = ?1,
                            age = ?2,
                            team_id = ?3,
                            updated_at = MAX(updated_at, {NOW_MS_SQL})
                         WHERE id = ?4;"
                    ),
                    params![member.username.as_str(), member.age, member.team_id, id],
                )?;
                if changed == 0 {
                    return Err(RepoError::NotFound {
                        table: "members",
                        id,
                    });
                }
                (id, "update")
            }
        };

        member.id = Some(id);
        member.audit = Some(load_member_audit(self.conn, id)?);
        info!(
            "event=member_save module=repo status=ok mode={} member_id={} has_team={}",
            mode,
            id,
            member.team_id.is_some()
        );
        Ok(id)
    }

    fn find_by_id(&self, id: MemberId) -> RepoResult<Option<Member>> {
        let member = self
            .conn
            .query_row(
                &format!("{MEMBER_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_member_row,
            )
            .optional()?;
        Ok(member)
    }

    fn find_all(&self) -> RepoResult<Vec<Member>> {
        self.query_members(&format!("{MEMBER_SELECT_SQL} ORDER BY id ASC;"), Vec::new())
    }

    fn count(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM members;", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn delete(&self, member: &Member) -> RepoResult<()> {
        let id = member.id.ok_or(RepoError::Unsaved("members"))?;
        self.delete_by_id(id)
    }

    fn delete_by_id(&self, id: MemberId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM members WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                table: "members",
                id,
            });
        }
        info!("event=member_delete module=repo status=ok member_id={id}");
        Ok(())
    }

    fn find_user(&self, username: &str, age: i32) -> RepoResult<Vec<Member>> {
        self.query_members(
            &format!("{MEMBER_SELECT_SQL} WHERE username = ?1 AND age = ?2 ORDER BY id ASC;"),
            vec![
                Value::Text(username.to_string()),
                Value::Integer(i64::from(age)),
            ],
        )
    }

    fn find_member_dto(&self) -> RepoResult<Vec<MemberDto>> {
        let mut stmt = self.conn.prepare(
            "SELECT m.id, m.username, t.name
             FROM members m
             JOIN teams t ON t.id = m.team_id
             ORDER BY m.id ASC;",
        )?;
        let dtos = stmt
            .query_map([], |row| {
                Ok(MemberDto {
                    id: row.get(0)?,
                    username: row.get(1)?,
                    team_name: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(dtos)
    }

    fn find_by_names(&self, names: &[String]) -> RepoResult<Vec<Member>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; names.len()].join(", ");
        let values = names
            .iter()
            .map(|name| Value::Text(name.clone()))
            .collect();
        self.query_members(
            &format!("{MEMBER_SELECT_SQL} WHERE username IN ({placeholders}) ORDER BY id ASC;"),
            values,
        )
    }

    fn find_list_by_username(&self, username: &str) -> RepoResult<Vec<Member>> {
        self.query_members(
            &format!("{MEMBER_SELECT_SQL} WHERE username = ?1 ORDER BY id ASC;"),
            vec![Value::Text(username.to_string())],
        )
    }

    fn find_member_by_username(&self, username: &str) -> RepoResult<Option<Member>> {
        let mut matches = self.query_members(
            &format!("{MEMBER_SELECT_SQL} WHERE username = ?1 ORDER BY id ASC LIMIT 2;"),
            vec![Value::Text(username.to_string())],
        )?;
        if matches.len() > 1 {
            return Err(RepoError::NonUniqueResult("members"));
        }
        Ok(matches.pop())
    }

    fn find_by_age(&self, age: i32, request: &PageRequest) -> RepoResult<Page<Member>> {
        request.validate()?;

        let total: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM members WHERE age = ?1;",
            [age],
            |row| row.get(0),
        )?;

        let offset = i64::try_from(request.offset()).map_err(|_| {
            RepoError::InvalidData(format!("page offset {} is out of range", request.offset()))
        })?;
        let content = self.query_members(
            &format!(
                "{MEMBER_SELECT_SQL} WHERE age = ?1 ORDER BY {} LIMIT ?2 OFFSET ?3;",
                Sort::order_by_sql(request.sort)
            ),
            vec![
                Value::Integer(i64::from(age)),
                Value::Integer(i64::from(request.size)),
                Value::Integer(offset),
            ],
        )?;

        debug!(
            "event=member_page module=repo status=ok page={} size={} returned={} total={}",
            request.page,
            request.size,
            content.len(),
            total
        );
        Ok(Page::new(content, request, total as u64))
    }

    fn find_member_fetch_join(&self) -> RepoResult<Vec<MemberWithTeam>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                m.id, m.username, m.age, m.team_id, m.created_at, m.updated_at,
                t.id, t.name, t.created_at, t.updated_at
             FROM members m
             LEFT JOIN teams t ON t.id = m.team_id
             ORDER BY m.id ASC;",
        )?;
        let rows = stmt
            .query_map([], parse_member_with_team_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn find_member_custom(&self) -> RepoResult<Vec<Member>> {
        self.query_members(
            &format!("{MEMBER_SELECT_SQL} ORDER BY username ASC, id ASC;"),
            Vec::new(),
        )
    }
}

pub(crate) fn parse_member_row(row: &Row<'_>) -> rusqlite::Result<Member> {
    Ok(Member {
        id: Some(row.get("id")?),
        username: row.get("username")?,
        age: row.get("age")?,
        team_id: row.get("team_id")?,
        audit: Some(AuditTimestamps {
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        }),
    })
}

fn parse_member_with_team_row(row: &Row<'_>) -> rusqlite::Result<MemberWithTeam> {
    let member = Member {
        id: Some(row.get(0)?),
        username: row.get(1)?,
        age: row.get(2)?,
        team_id: row.get(3)?,
        audit: Some(AuditTimestamps {
            created_at: row.get(4)?,
            updated_at: row.get(5)?,
        }),
    };

    let team = match row.get::<_, Option<i64>>(6)? {
        Some(team_id) => Some(Team {
            id: Some(team_id),
            name: row.get(7)?,
            audit: Some(AuditTimestamps {
                created_at: row.get(8)?,
                updated_at: row.get(9)?,
            }),
        }),
        None => None,
    };

    Ok(MemberWithTeam { member, team })
}

fn load_member_audit(conn: &Connection, id: MemberId) -> RepoResult<AuditTimestamps> {
    let audit = conn.query_row(
        "SELECT created_at, updated_at FROM members WHERE id = ?1;",
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
