mod app;
mod cli;
mod color;
mod config;
mod dates;
mod db;
mod event;
mod logging;
mod projection;
mod store;
mod tui;
mod types;
mod ui;

use anyhow::Result;
use clap::Parser;
use log::info;

use config::Settings;

fn main() -> Result<()> {
    let cli_opts = cli::Cli::parse();
    let settings = Settings::resolve(cli_opts.db, cli_opts.log_level);
    if let Err(err) = logging::init_logging(&settings.log_level, &settings.log_dir) {
        eprintln!("crewboard: logging disabled: {err:#}");
    }

    let conn = db::init(&settings.db_path)?;
    if let Some(command) = cli_opts.command {
        return cli::run(command, &conn);
    }

    info!("event=tui_start db={}", settings.db_path.display());
    let mut app = app::App::new(conn)?;
    let mut terminal = tui::init()?;
    let result = event::run(&mut app, &mut terminal);

    tui::restore()?;

    result
}
