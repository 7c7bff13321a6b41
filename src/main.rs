use clap::Parser;
use color_eyre::Result;
use teva_tui::{
    cli::{self, Cli, Commands},
    logging, Config, Database, Profile,
};

fn main() -> Result<()> {
    // Set up error reporting with color-eyre
    color_eyre::install()?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Determine profile: --dev flag enables dev mode, otherwise use prod
    let profile = if cli.dev { Profile::Dev } else { Profile::Prod };

    // Load configuration with the determined profile
    // Note: --config option is parsed but not yet used to override config path
    let config = Config::load_with_profile(profile)?;

    // Logging goes to rotating files next to the database; stdout belongs
    // to the TUI and the command output
    logging::init_logging(logging::default_log_level(), &config.get_log_dir())?;

    // Initialize database
    let db_path = config.get_database_path();
    let db = Database::new(
        db_path
            .to_str()
            .ok_or_else(|| color_eyre::eyre::eyre!("Database path contains invalid UTF-8"))?,
    )?;

    // Dispatch to appropriate command handler
    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            let app = teva_tui::tui::App::new(config, db)?;
            teva_tui::tui::run_event_loop(app)?;
        }
        Commands::AddTask {
            title,
            due,
            priority,
            category,
        } => {
            cli::handle_add_task(title, due, priority, category, &db)?;
        }
        Commands::AddEvent {
            title,
            date,
            time,
            kind,
            description,
        } => {
            cli::handle_add_event(title, date, time, kind, description, &db)?;
        }
        Commands::ToggleTask { id } => {
            cli::handle_toggle_task(id, &db)?;
        }
        Commands::RemoveTask { id } => {
            cli::handle_remove_task(id, &db)?;
        }
        Commands::RemoveEvent { id } => {
            cli::handle_remove_event(id, &db)?;
        }
        Commands::Stats => {
            cli::handle_stats(&db)?;
        }
        Commands::Agenda { date } => {
            cli::handle_agenda(date, &db)?;
        }
        Commands::Upcoming { days, limit } => {
            cli::handle_upcoming(
                days,
                limit,
                config.upcoming_window_days,
                config.upcoming_limit,
                &db,
            )?;
        }
        Commands::Export => {
            cli::handle_export(&db)?;
        }
    }

    Ok(())
}
