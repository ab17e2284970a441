/// CLI argument parsing and command handling.
use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::{Datelike, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use rusqlite::Connection;

use crate::config::{DAYS_PER_WEEK, GridLayout};
use crate::projection::{
    SegmentRole, ViewMode, gantt_chart, month_grid, period_label, week_grid,
};
use crate::store::{Store, generate_id};
use crate::types::Project;
use crate::{dates, db};

const DEFAULT_PROJECT_DAYS: i64 = 7;

#[derive(Parser)]
#[command(
    name = "crewboard",
    version,
    about = "Crewboard - A terminal scheduling board for road crews"
)]
pub struct Cli {
    /// Database file (defaults to the user data directory)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,
    /// trace|debug|info|warn|error
    #[arg(long = "log-level", global = true)]
    pub log_level: Option<String>,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Project {
        #[command(subcommand)]
        command: ProjectCommand,
    },
    Crew {
        #[command(subcommand)]
        command: CrewCommand,
    },
    /// Print a view of the board
    Show {
        #[arg(value_enum, default_value = "month")]
        view: ShowView,
        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(short = 'd', long = "date")]
        date: Option<String>,
    },
    /// Forget all projects and restore the default crews
    Reset {
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ShowView {
    Month,
    Week,
    Gantt,
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommand {
    Add {
        name: String,
        #[arg(short = 's', long = "start")]
        start: Option<String>,
        #[arg(short = 'e', long = "end")]
        end: Option<String>,
        /// Crew id or name
        #[arg(short = 'c', long = "crew")]
        crew: Option<String>,
        #[arg(short = 'l', long = "location")]
        location: Option<String>,
        #[arg(short = 'n', long = "notes")]
        notes: Option<String>,
    },
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(short = 's', long = "start")]
        start: Option<String>,
        #[arg(short = 'e', long = "end")]
        end: Option<String>,
        /// Crew id or name; an empty value unassigns the project
        #[arg(short = 'c', long = "crew")]
        crew: Option<String>,
        #[arg(short = 'l', long = "location")]
        location: Option<String>,
        #[arg(short = 'n', long = "notes")]
        notes: Option<String>,
    },
    Delete {
        id: String,
    },
    List,
}

#[derive(Subcommand, Debug)]
pub enum CrewCommand {
    Add {
        name: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    Delete {
        id: String,
    },
    List,
    Member {
        #[command(subcommand)]
        command: MemberCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum MemberCommand {
    Add { crew: String, name: String },
    /// Remove the member at a 1-based position
    Remove { crew: String, position: usize },
    /// Make the member at a 1-based position the crew leader
    Leader { crew: String, position: usize },
}

/// Execute a CLI command against the board stored in `conn`.
pub fn run(command: Command, conn: &Connection) -> Result<()> {
    if let Command::Reset { yes } = command {
        return handle_reset(yes, conn);
    }

    let mut store = db::load_store(conn)?;
    let today = dates::today();
    let (output, mutated) = execute(command, &mut store, today)?;
    if mutated {
        db::save_store(&store, conn)?;
    }
    print!("{output}");
    Ok(())
}

/// Applies a command to the store. Returns the text to print and whether
/// the store changed.
fn execute(command: Command, store: &mut Store, today: NaiveDate) -> Result<(String, bool)> {
    match command {
        Command::Project { command } => handle_project(command, store, today),
        Command::Crew { command } => handle_crew(command, store),
        Command::Show { view, date } => {
            let reference = match date {
                Some(value) => parse_cli_date(&value)?,
                None => today,
            };
            let output = match view {
                ShowView::Month => render_month(store, reference, today),
                ShowView::Week => render_week(store, reference, today),
                ShowView::Gantt => render_gantt(store, reference),
            };
            Ok((output, false))
        }
        Command::Reset { .. } => bail!("reset must run against the database directly"),
    }
}

fn handle_project(
    command: ProjectCommand,
    store: &mut Store,
    today: NaiveDate,
) -> Result<(String, bool)> {
    match command {
        ProjectCommand::Add {
            name,
            start,
            end,
            crew,
            location,
            notes,
        } => {
            let name = required_name(&name)?;
            let start_date = match start {
                Some(value) => parse_cli_date(&value)?,
                None => today,
            };
            let end_date = match end {
                Some(value) => parse_cli_date(&value)?,
                None => dates::add_days(start_date, DEFAULT_PROJECT_DAYS),
            };
            check_range(start_date, end_date)?;
            let crew_id = crew.map(|key| resolve_crew(store, &key)).transpose()?;
            let project = Project {
                id: generate_id(),
                name,
                location,
                start_date: dates::format_date(&start_date),
                end_date: dates::format_date(&end_date),
                crew_id,
                notes,
            };
            let output = format!("Added project {} ({})\n", project.name, project.id);
            store.upsert_project(project);
            Ok((output, true))
        }
        ProjectCommand::Edit {
            id,
            name,
            start,
            end,
            crew,
            location,
            notes,
        } => {
            let mut project = match store.project(&id) {
                Some(project) => project.clone(),
                None => bail!("project '{id}' not found"),
            };
            if let Some(name) = name {
                project.name = required_name(&name)?;
            }
            if let Some(value) = start {
                project.start_date = dates::format_date(&parse_cli_date(&value)?);
            }
            if let Some(value) = end {
                project.end_date = dates::format_date(&parse_cli_date(&value)?);
            }
            if let (Some(start), Some(end)) = (
                dates::parse_date(&project.start_date),
                dates::parse_date(&project.end_date),
            ) {
                check_range(start, end)?;
            }
            if let Some(key) = crew {
                project.crew_id = if key.is_empty() {
                    None
                } else {
                    Some(resolve_crew(store, &key)?)
                };
            }
            if location.is_some() {
                project.location = location;
            }
            if notes.is_some() {
                project.notes = notes;
            }
            let output = format!("Updated project {} ({})\n", project.name, project.id);
            store.upsert_project(project);
            Ok((output, true))
        }
        ProjectCommand::Delete { id } => match store.delete_project(&id) {
            Some(project) => Ok((format!("Deleted project {}\n", project.name), true)),
            None => bail!("project '{id}' not found"),
        },
        ProjectCommand::List => {
            let mut out = String::new();
            if store.projects().is_empty() {
                out.push_str("No projects.\n");
            }
            for project in store.projects() {
                let crew = match (project.crew(), store.crew_for(project)) {
                    (_, Some(crew)) => crew.name.clone(),
                    (Some(id), None) => format!("unknown crew {id}"),
                    (None, None) => "unassigned".to_string(),
                };
                let _ = writeln!(
                    out,
                    "{:<10} {:<28} {} .. {}  {}",
                    project.id, project.name, project.start_date, project.end_date, crew
                );
            }
            Ok((out, false))
        }
    }
}

fn handle_crew(command: CrewCommand, store: &mut Store) -> Result<(String, bool)> {
    match command {
        CrewCommand::Add { name, color } => {
            let crew = store.new_crew(name.as_deref())?;
            let id = crew.id.clone();
            let name = crew.name.clone();
            if color.is_some() {
                store.update_crew(&id, None, color.as_deref())?;
            }
            Ok((format!("Added crew {name} ({id})\n"), true))
        }
        CrewCommand::Edit { id, name, color } => {
            let id = resolve_crew(store, &id)?;
            store.update_crew(&id, name.as_deref(), color.as_deref())?;
            Ok((format!("Updated crew {id}\n"), true))
        }
        CrewCommand::Delete { id } => {
            let id = resolve_crew(store, &id)?;
            let assigned = store
                .projects()
                .iter()
                .filter(|project| project.crew() == Some(id.as_str()))
                .count();
            let mut out = String::new();
            if let Some(crew) = store.delete_crew(&id) {
                let _ = writeln!(out, "Deleted crew {}", crew.name);
            }
            if assigned > 0 {
                let _ = writeln!(
                    out,
                    "{assigned} project(s) still reference deleted crew {id}."
                );
            }
            Ok((out, true))
        }
        CrewCommand::List => {
            let mut out = String::new();
            for crew in store.crews() {
                let members = crew
                    .members
                    .iter()
                    .map(|member| {
                        if member.is_leader {
                            format!("{} (leader)", member.name)
                        } else {
                            member.name.clone()
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                let leader = crew.leader().map_or("-", |member| member.name.as_str());
                let _ = writeln!(
                    out,
                    "{:<10} {:<16} {:<8} lead: {:<16} {}",
                    crew.id, crew.name, crew.color, leader, members
                );
            }
            Ok((out, false))
        }
        CrewCommand::Member { command } => handle_member(command, store),
    }
}

fn handle_member(command: MemberCommand, store: &mut Store) -> Result<(String, bool)> {
    match command {
        MemberCommand::Add { crew, name } => {
            let id = resolve_crew(store, &crew)?;
            store.add_member(&id, &name)?;
            Ok((format!("Added {} to crew {id}\n", name.trim()), true))
        }
        MemberCommand::Remove { crew, position } => {
            let id = resolve_crew(store, &crew)?;
            let member = store.remove_member(&id, position_to_index(position)?)?;
            let mut out = format!("Removed {} from crew {id}\n", member.name);
            if member.is_leader {
                out.push_str("The crew has no leader now.\n");
            }
            Ok((out, true))
        }
        MemberCommand::Leader { crew, position } => {
            let id = resolve_crew(store, &crew)?;
            let leader = store.set_leader(&id, position_to_index(position)?)?;
            Ok((format!("{} now leads crew {id}\n", leader.name), true))
        }
    }
}

fn handle_reset(yes: bool, conn: &Connection) -> Result<()> {
    if !yes {
        println!("This removes every project and restores the default crews. Re-run with --yes.");
        return Ok(());
    }
    db::delete_value(db::PROJECTS_KEY, conn)?;
    db::delete_value(db::CREWS_KEY, conn)?;
    info!("event=board_reset");
    println!("Board reset.");
    Ok(())
}

/// Matches a crew by id first, then by case-insensitive name.
fn resolve_crew(store: &Store, key: &str) -> Result<String> {
    if store.crew(key).is_some() {
        return Ok(key.to_string());
    }
    let matches: Vec<&str> = store
        .crews()
        .iter()
        .filter(|crew| crew.name.eq_ignore_ascii_case(key))
        .map(|crew| crew.id.as_str())
        .collect();
    match matches.as_slice() {
        [id] => Ok((*id).to_string()),
        [] => bail!("crew '{key}' not found"),
        _ => bail!("multiple crews are named '{key}', use the crew id"),
    }
}

fn required_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        bail!("project name cannot be empty");
    }
    Ok(name.to_string())
}

fn parse_cli_date(value: &str) -> Result<NaiveDate> {
    dates::parse_date(value.trim())
        .with_context(|| format!("invalid date '{value}', expected YYYY-MM-DD"))
}

fn check_range(start: NaiveDate, end: NaiveDate) -> Result<()> {
    if end < start {
        bail!("end date {end} is before start date {start}");
    }
    Ok(())
}

fn position_to_index(position: usize) -> Result<usize> {
    match position.checked_sub(1) {
        Some(index) => Ok(index),
        None => bail!("positions start at 1"),
    }
}

fn crew_label(store: &Store, project: &Project) -> String {
    store
        .crew_for(project)
        .map(|crew| crew.name.clone())
        .unwrap_or_else(|| "-".to_string())
}

fn role_marker(role: SegmentRole) -> &'static str {
    match role {
        SegmentRole::Single => "[ ]",
        SegmentRole::Start => "[--",
        SegmentRole::Middle => "---",
        SegmentRole::End => "--]",
    }
}

fn render_month(store: &Store, reference: NaiveDate, today: NaiveDate) -> String {
    let cells = month_grid(reference, today, store);
    let mut out = String::new();
    let _ = writeln!(out, "{}", period_label(ViewMode::Month, reference));
    let _ = writeln!(out, " Sun  Mon  Tue  Wed  Thu  Fri  Sat");
    for week in cells.chunks(DAYS_PER_WEEK) {
        let row = week
            .iter()
            .map(|cell| {
                let day = cell.date.day();
                match (cell.is_today, cell.in_month) {
                    (true, _) => format!("[{day:>2}]"),
                    (false, true) => format!(" {day:>2} "),
                    (false, false) => format!("({day:>2})"),
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(out, "{row}");
    }
    for cell in cells.iter().filter(|cell| !cell.projects.is_empty()) {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", cell.date.format("%a %Y-%m-%d"));
        for placed in &cell.projects {
            let _ = writeln!(
                out,
                "  {} {}  {}  {}",
                role_marker(placed.role),
                placed.project.name,
                crew_label(store, placed.project),
                placed.color
            );
        }
    }
    out
}

fn render_week(store: &Store, reference: NaiveDate, today: NaiveDate) -> String {
    let columns = week_grid(reference, today, store, &GridLayout::default());
    let mut out = String::new();
    let _ = writeln!(out, "{}", period_label(ViewMode::Week, reference));
    for column in &columns {
        let marker = if column.is_today { " (today)" } else { "" };
        let _ = writeln!(out, "{}{marker}", column.date.format("%a %m-%d"));
        for stacked in &column.projects {
            let _ = writeln!(
                out,
                "  {}. {}  {}",
                stacked.stack_index + 1,
                stacked.project.name,
                crew_label(store, stacked.project)
            );
        }
    }
    out
}

fn render_gantt(store: &Store, reference: NaiveDate) -> String {
    let layout = GridLayout {
        day_width: 1,
        bar_gap: 0,
        ..GridLayout::default()
    };
    let chart = gantt_chart(reference, store, &layout);
    let mut out = String::new();
    let _ = writeln!(out, "{}", period_label(ViewMode::Gantt, reference));
    if chart.rows.is_empty() {
        out.push_str("No projects this month\n");
    }
    for row in chart.rows.rows() {
        let bar: String = (0..chart.total_width)
            .map(|position| {
                if position >= row.left && position < row.left + row.width {
                    '#'
                } else {
                    '.'
                }
            })
            .collect();
        let _ = writeln!(
            out,
            "{:<24} {bar}  {:>2}-{:<2} {}",
            row.project.name,
            row.display_start,
            row.display_end,
            crew_label(store, row.project)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn date(value: &str) -> NaiveDate {
        dates::parse_date(value).expect("test date should parse")
    }

    fn exec(store: &mut Store, args: &[&str]) -> Result<(String, bool)> {
        let cli = Cli::try_parse_from(std::iter::once("crewboard").chain(args.iter().copied()))
            .expect("arguments should parse");
        let command = cli.command.expect("a subcommand");
        execute(command, store, date("2024-06-12"))
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn project_add_defaults_to_a_week_from_today() {
        let mut store = Store::seeded();
        let (_, mutated) =
            exec(&mut store, &["project", "add", "Route 9", "--crew", "beta crew"]).expect("add");
        assert!(mutated);
        let project = &store.projects()[0];
        assert_eq!(project.start_date, "2024-06-12");
        assert_eq!(project.end_date, "2024-06-19");
        assert_eq!(project.crew(), Some("2"));
    }

    #[test]
    fn project_add_rejects_bad_input() {
        let mut store = Store::seeded();
        assert!(exec(&mut store, &["project", "add", "  "]).is_err());
        assert!(exec(&mut store, &["project", "add", "X", "-s", "2024-6-1"]).is_err());
        assert!(
            exec(
                &mut store,
                &["project", "add", "X", "-s", "2024-06-10", "-e", "2024-06-01"]
            )
            .is_err()
        );
        assert!(exec(&mut store, &["project", "add", "X", "-c", "Delta"]).is_err());
        assert!(store.projects().is_empty());
    }

    #[test]
    fn project_edit_can_unassign_crew() {
        let mut store = Store::seeded();
        exec(&mut store, &["project", "add", "Overlay", "-c", "1"]).expect("add");
        let id = store.projects()[0].id.clone();
        exec(&mut store, &["project", "edit", &id, "--crew", "", "--notes", "wet"]).expect("edit");
        let project = store.project(&id).expect("still there");
        assert_eq!(project.crew(), None);
        assert_eq!(project.notes.as_deref(), Some("wet"));
    }

    #[test]
    fn crew_delete_reports_dangling_projects() {
        let mut store = Store::seeded();
        exec(&mut store, &["project", "add", "Overlay", "-c", "1"]).expect("add");
        let (output, _) = exec(&mut store, &["crew", "delete", "Alpha Crew"]).expect("delete");
        assert!(output.contains("1 project(s) still reference deleted crew 1."));
        assert_eq!(store.projects()[0].crew_id.as_deref(), Some("1"));
    }

    #[test]
    fn member_commands_use_one_based_positions() {
        let mut store = Store::seeded();
        exec(&mut store, &["crew", "member", "leader", "1", "2"]).expect("leader");
        let crew = store.crew("1").expect("crew 1");
        assert!(crew.members[1].is_leader);
        assert!(!crew.members[0].is_leader);

        assert!(exec(&mut store, &["crew", "member", "leader", "1", "0"]).is_err());
        assert!(exec(&mut store, &["crew", "member", "leader", "1", "9"]).is_err());

        let (output, _) =
            exec(&mut store, &["crew", "member", "remove", "1", "2"]).expect("remove");
        assert!(output.contains("no leader"));
        assert!(store.crew("1").and_then(|c| c.leader()).is_none());
    }

    #[test]
    fn show_month_lists_projects_with_roles() {
        let mut store = Store::seeded();
        exec(
            &mut store,
            &["project", "add", "Bridge", "-s", "2024-06-10", "-e", "2024-06-11", "-c", "1"],
        )
        .expect("add");
        let (output, mutated) =
            exec(&mut store, &["show", "month", "--date", "2024-06-01"]).expect("show");
        assert!(!mutated);
        assert!(output.starts_with("June 2024\n"));
        assert!(output.contains("[12]"));
        assert!(output.contains("(26)"));
        assert!(output.contains("[-- Bridge  Alpha Crew  #3b82f6"));
        assert!(output.contains("--] Bridge"));
    }

    #[test]
    fn show_gantt_clamps_and_reports_empty_months() {
        let mut store = Store::seeded();
        exec(
            &mut store,
            &["project", "add", "Sweep", "-s", "2024-05-28", "-e", "2024-06-03"],
        )
        .expect("add");
        let (output, _) = exec(&mut store, &["show", "gantt", "-d", "2024-06-20"]).expect("show");
        let bar = format!("{}{}", "#".repeat(3), ".".repeat(27));
        assert!(output.contains(&bar));
        assert!(output.contains(" 1-3 "));

        let (output, _) = exec(&mut store, &["show", "gantt", "-d", "2024-08-01"]).expect("show");
        assert!(output.contains("No projects this month"));
    }

    #[test]
    fn show_week_numbers_stack_positions() {
        let mut store = Store::seeded();
        exec(&mut store, &["project", "add", "A", "-s", "2024-06-12", "-e", "2024-06-12"])
            .expect("add");
        exec(&mut store, &["project", "add", "B", "-s", "2024-06-10", "-e", "2024-06-14"])
            .expect("add");
        let (output, _) = exec(&mut store, &["show", "week"]).expect("show");
        assert!(output.contains("Wed 06-12 (today)\n  1. A  -\n  2. B  -\n"));
    }
}
