use roster_core::db::open_db_in_memory;
use roster_core::{
    Member, MemberRepository, SqliteMemberRepository, SqliteTeamRepository, Team, TeamRepository,
};

const PAST_MS: i64 = 1_600_000_000_000;

#[test]
fn insert_sets_both_timestamps() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemberRepository::try_new(&conn).unwrap();

    let mut member = Member::new("member1");
    assert!(member.audit.is_none());
    repo.save(&mut member).unwrap();

    let audit = member.audit.unwrap();
    assert!(audit.created_at > PAST_MS);
    assert!(audit.updated_at >= audit.created_at);
}

#[test]
fn update_refreshes_updated_at_and_keeps_created_at() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemberRepository::try_new(&conn).unwrap();

    let mut member = Member::with_age("member1", 10);
    let id = repo.save(&mut member).unwrap();
    conn.execute(
        "UPDATE members SET created_at = ?1, updated_at = ?1 WHERE id = ?2;",
        rusqlite::params![PAST_MS, id],
    )
    .unwrap();

    member.age = 11;
    repo.save(&mut member).unwrap();

    let audit = member.audit.unwrap();
    assert_eq!(audit.created_at, PAST_MS);
    assert!(audit.updated_at > PAST_MS);
    assert_eq!(repo.find_by_id(id).unwrap().unwrap().audit, Some(audit));
}

#[test]
fn team_update_refreshes_updated_at_and_keeps_created_at() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTeamRepository::try_new(&conn).unwrap();

    let mut team = Team::new("teamA");
    let id = repo.save(&mut team).unwrap();
    conn.execute(
        "UPDATE teams SET created_at = ?1, updated_at = ?1 WHERE id = ?2;",
        rusqlite::params![PAST_MS, id],
    )
    .unwrap();

    team.name = "teamB".to_string();
    repo.save(&mut team).unwrap();

    let audit = team.audit.unwrap();
    assert_eq!(audit.created_at, PAST_MS);
    assert!(audit.updated_at > PAST_MS);
}

#[test]
fn saved_member_serializes_audit_as_second_precision_text() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemberRepository::try_new(&conn).unwrap();

    let mut member = Member::new("member1");
    let id = repo.save(&mut member).unwrap();
    conn.execute(
        "UPDATE members SET created_at = ?1, updated_at = ?1 WHERE id = ?2;",
        rusqlite::params![PAST_MS, id],
    )
    .unwrap();
    let member = repo.find_by_id(id).unwrap().unwrap();

    let json = serde_json::to_value(&member).unwrap();
    assert_eq!(json["audit"]["created_at"], "2020-09-13T12:26:40");
    assert_eq!(json["audit"]["updated_at"], "2020-09-13T12:26:40");
    assert_eq!(json["username"], "member1");
}
