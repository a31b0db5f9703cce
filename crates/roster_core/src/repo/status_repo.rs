//! Status mirroring from `origin_status` into the two denormalized tables.
//!
//! # Invariants
//! - `table1_status` and `table2_status` are written in one transaction.
//! - Mirroring the same origin again replaces the previous derived rows.
//! - Stored codes that no longer map to a `TableStatus` are reported as
//!   `InvalidData`, never silently skipped.

use crate::model::table_status::{MirroredStatus, TableStatus};
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::schema::{bool_to_int, ensure_connection_ready, int_to_bool, RequiredTable};
use log::info;
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};

const STATUS_TABLES: &[RequiredTable] = &[
    ("origin_status", &["id", "status_code", "created_at"]),
    ("table1_status", &["origin_id", "status_value"]),
    ("table2_status", &["origin_id", "status_flag"]),
];

pub trait StatusMirrorRepository {
    /// Stores a canonical status and returns the origin row id.
    fn insert_origin(&self, status: TableStatus) -> RepoResult<i64>;
    fn find_origin(&self, origin_id: i64) -> RepoResult<Option<TableStatus>>;
    /// Copies the origin status into both downstream tables.
    fn mirror(&mut self, origin_id: i64) -> RepoResult<MirroredStatus>;
    fn find_mirrored(&self, origin_id: i64) -> RepoResult<Option<MirroredStatus>>;
}

pub struct SqliteStatusMirrorRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteStatusMirrorRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, STATUS_TABLES)?;
        Ok(Self { conn })
    }
}

impl StatusMirrorRepository for SqliteStatusMirrorRepository<'_> {
    fn insert_origin(&self, status: TableStatus) -> RepoResult<i64> {
        self.conn.execute(
            "INSERT INTO origin_status (status_code) VALUES (?1);",
            [status.code()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn find_origin(&self, origin_id: i64) -> RepoResult<Option<TableStatus>> {
        load_origin(self.conn, origin_id)
    }

    fn mirror(&mut self, origin_id: i64) -> RepoResult<MirroredStatus> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let status = load_origin(&tx, origin_id)?.ok_or(RepoError::NotFound {
            table: "origin_status",
            id: origin_id,
        })?;
        let (table1_value, table2_value) = status.values();

        tx.execute(
            "INSERT INTO table1_status (origin_id, status_value) VALUES (?1, ?2)
             ON CONFLICT(origin_id) DO UPDATE SET status_value = excluded.status_value;",
            params![origin_id, table1_value],
        )?;
        tx.execute(
            "INSERT INTO table2_status (origin_id, status_flag) VALUES (?1, ?2)
             ON CONFLICT(origin_id) DO UPDATE SET status_flag = excluded.status_flag;",
            params![origin_id, bool_to_int(table2_value)],
        )?;
        tx.commit()?;

        info!(
            "event=status_mirror module=repo status=ok origin_id={} code={}",
            origin_id,
            status.code()
        );
        Ok(MirroredStatus {
            origin_id,
            table1_value: table1_value.to_string(),
            table2_value,
        })
    }

    fn find_mirrored(&self, origin_id: i64) -> RepoResult<Option<MirroredStatus>> {
        let row = self
            .conn
            .query_row(
                "SELECT t1.status_value, t2.status_flag
                 FROM table1_status t1
                 JOIN table2_status t2 ON t2.origin_id = t1.origin_id
                 WHERE t1.origin_id = ?1;",
                [origin_id],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)),
            )
            .optional()?;

        match row {
            Some((table1_value, flag)) => Ok(Some(MirroredStatus {
                origin_id,
                table1_value,
                table2_value: int_to_bool(flag, "table2_status.status_flag")?,
            })),
            None => Ok(None),
        }
    }
}

fn load_origin(conn: &Connection, origin_id: i64) -> RepoResult<Option<TableStatus>> {
    let code: Option<String> = conn
        .query_row(
            "SELECT status_code FROM origin_status WHERE id = ?1;",
            [origin_id],
            |row| row.get(0),
        )
        .optional()?;

    match code {
        Some(code) => TableStatus::from_code(&code).map(Some).ok_or_else(|| {
            RepoError::InvalidData(format!(
                "unknown status code `{code}` in origin_status.status_code"
            ))
        }),
        None => Ok(None),
    }
}
