//! Roster smoke runner.
//!
//! Opens the configured database, registers a team with two members, and
//! prints the first page of members plus one mirrored status.

mod config;

use config::CliConfig;
use log::error;
use roster_core::db::{open_db, open_db_in_memory};
use roster_core::{
    MemberService, MemberSortProperty, PageRequest, Sort, SqliteMemberRepository,
    SqliteStatusMirrorRepository, SqliteTeamRepository, StatusMirrorService, TableStatus, Team,
    TeamRepository,
};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let config = CliConfig::from_env();

    if let Some(log_dir) = config.log_dir.as_deref() {
        if let Err(err) = roster_core::init_logging(&config.log_level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &CliConfig) -> Result<(), Box<dyn Error>> {
    let mut conn = match config.db_path.as_deref() {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };
    println!("roster_core version={}", roster_core::core_version());

    {
        let teams = SqliteTeamRepository::try_new(&conn)?;
        let mut team = Team::new("teamA");
        let team_id = teams.save(&mut team)?;

        let service = MemberService::new(
            SqliteMemberRepository::try_new(&conn)?,
            SqliteTeamRepository::try_new(&conn)?,
        );
        service.register("member1", 10, Some(team_id))?;
        service.register("member2", 10, None)?;

        let request =
            PageRequest::of(0, 3)?.with_sort(Sort::desc(MemberSortProperty::Username));
        let page = service.page_by_age(10, &request)?;
        println!(
            "members page={} size={} total={} pages={}",
            page.number,
            page.size,
            page.total_elements,
            page.total_pages()
        );
        for summary in &page.content {
            println!("  {}", summary_line(summary));
        }
    }

    let mut status_service =
        StatusMirrorService::new(SqliteStatusMirrorRepository::try_new(&mut conn)?);
    let mirrored = status_service.mirror_status(TableStatus::Y)?;
    println!(
        "status origin_id={} table1_value={} table2_value={}",
        mirrored.origin_id, mirrored.table1_value, mirrored.table2_value
    );
    Ok(())
}

fn summary_line(summary: &roster_core::MemberSummary) -> String {
    format!(
        "id={} username={} age={}",
        summary.id.map_or_else(|| "-".to_string(), |id| id.to_string()),
        summary.username,
        summary.age
    )
}
