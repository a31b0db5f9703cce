use roster_core::db::open_db_in_memory;
use roster_core::{
    MemberRepository, MemberService, MemberServiceError, MemberSortProperty, PageRequest, Sort,
    SqliteMemberRepository, SqliteTeamRepository, Team, TeamRepository,
};
use rusqlite::Connection;

fn service(
    conn: &Connection,
) -> MemberService<SqliteMemberRepository<'_>, SqliteTeamRepository<'_>> {
    MemberService::new(
        SqliteMemberRepository::try_new(conn).unwrap(),
        SqliteTeamRepository::try_new(conn).unwrap(),
    )
}

#[test]
fn register_with_existing_team() {
    let conn = open_db_in_memory().unwrap();
    let mut team = Team::new("teamA");
    SqliteTeamRepository::try_new(&conn)
        .unwrap()
        .save(&mut team)
        .unwrap();

    let member = service(&conn)
        .register("member1", 10, team.id)
        .unwrap();
    assert!(member.id.is_some());
    assert_eq!(member.team_id, team.id);
    assert!(member.audit.is_some());
}

#[test]
fn register_with_unknown_team_is_rejected_without_write() {
    let conn = open_db_in_memory().unwrap();

    let err = service(&conn).register("member1", 10, Some(77)).unwrap_err();
    assert!(matches!(err, MemberServiceError::TeamNotFound(77)));

    let members = SqliteMemberRepository::try_new(&conn).unwrap();
    assert_eq!(members.count().unwrap(), 0);
}

#[test]
fn change_team_moves_member() {
    let conn = open_db_in_memory().unwrap();
    let teams = SqliteTeamRepository::try_new(&conn).unwrap();
    let mut team_a = Team::new("teamA");
    let mut team_b = Team::new("teamB");
    teams.save(&mut team_a).unwrap();
    teams.save(&mut team_b).unwrap();

    let service = service(&conn);
    let member = service.register("member1", 10, team_a.id).unwrap();
    let moved = service
        .change_team(member.id.unwrap(), team_b.id.unwrap())
        .unwrap();
    assert_eq!(moved.team_id, team_b.id);

    let names: Vec<_> = teams
        .find_members(team_b.id.unwrap())
        .unwrap()
        .into_iter()
        .map(|m| m.username)
        .collect();
    assert_eq!(names, vec!["member1"]);
}

#[test]
fn change_team_reports_missing_member_and_team() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    assert!(matches!(
        service.change_team(5, 1).unwrap_err(),
        MemberServiceError::MemberNotFound(5)
    ));

    let member = service.register("member1", 10, None).unwrap();
    assert!(matches!(
        service.change_team(member.id.unwrap(), 9).unwrap_err(),
        MemberServiceError::TeamNotFound(9)
    ));
}

#[test]
fn page_by_age_maps_members_to_summaries() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    for name in ["member1", "member2", "member3"] {
        service.register(name, 10, None).unwrap();
    }

    let request = PageRequest::of(0, 2)
        .unwrap()
        .with_sort(Sort::asc(MemberSortProperty::Username));
    let page = service.page_by_age(10, &request).unwrap();

    assert_eq!(page.total_elements, 3);
    assert_eq!(page.content.len(), 2);
    assert_eq!(page.content[0].username, "member1");
    assert_eq!(page.content[1].age, 10);

    let json = serde_json::to_value(&page).unwrap();
    assert_eq!(json["total_elements"], 3);
    assert_eq!(json["content"][0]["username"], "member1");
}

#[test]
fn invalid_input_surfaces_as_repository_error() {
    let conn = open_db_in_memory().unwrap();

    let err = service(&conn).register("", 10, None).unwrap_err();
    assert!(matches!(err, MemberServiceError::Repo(_)));
}
