use roster_core::db::open_db_in_memory;
use roster_core::{
    MirroredStatus, RepoError, SqliteStatusMirrorRepository, StatusMirrorRepository,
    StatusMirrorService, TableStatus,
};

#[test]
fn mirror_copies_origin_code_into_both_tables() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteStatusMirrorRepository::try_new(&mut conn).unwrap();

    let origin_id = repo.insert_origin(TableStatus::Y).unwrap();
    assert_eq!(repo.find_origin(origin_id).unwrap(), Some(TableStatus::Y));

    let mirrored = repo.mirror(origin_id).unwrap();
    assert_eq!(
        mirrored,
        MirroredStatus {
            origin_id,
            table1_value: "1".to_string(),
            table2_value: true,
        }
    );
    assert_eq!(repo.find_mirrored(origin_id).unwrap(), Some(mirrored));
    drop(repo);

    let (value, flag): (String, i64) = conn
        .query_row(
            "SELECT t1.status_value, t2.status_flag
             FROM table1_status t1
             JOIN table2_status t2 ON t2.origin_id = t1.origin_id
             WHERE t1.origin_id = ?1;",
            [origin_id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(value, "1");
    assert_eq!(flag, 1);
}

#[test]
fn mirroring_twice_replaces_derived_rows() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service =
        StatusMirrorService::new(SqliteStatusMirrorRepository::try_new(&mut conn).unwrap());

    let first = service.mirror_status(TableStatus::Y).unwrap();
    let second = service.remirror(first.origin_id).unwrap();
    assert_eq!(first, second);
    drop(service);

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM table1_status;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn mirror_of_missing_origin_is_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteStatusMirrorRepository::try_new(&mut conn).unwrap();

    assert!(matches!(
        repo.mirror(404).unwrap_err(),
        RepoError::NotFound {
            table: "origin_status",
            id: 404
        }
    ));
    assert_eq!(repo.find_mirrored(404).unwrap(), None);
    assert_eq!(repo.find_origin(404).unwrap(), None);
}

#[test]
fn unknown_stored_code_is_invalid_data() {
    let mut conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO origin_status (id, status_code) VALUES (1, 'Q');",
        [],
    )
    .unwrap();
    let mut repo = SqliteStatusMirrorRepository::try_new(&mut conn).unwrap();

    assert!(matches!(
        repo.find_origin(1).unwrap_err(),
        RepoError::InvalidData(_)
    ));
    assert!(matches!(repo.mirror(1).unwrap_err(), RepoError::InvalidData(_)));
    assert_eq!(repo.find_mirrored(1).unwrap(), None);
}
