use clap::Parser;
use color_eyre::Result;
use glowplan::cli::{Cli, Commands};
use glowplan::{Config, Database, Profile};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Set up error reporting with color-eyre
    color_eyre::install()?;

    let cli = Cli::parse();

    // Determine profile: --dev flag enables dev mode, otherwise use prod
    let profile = if cli.dev { Profile::Dev } else { Profile::Prod };

    let config = Config::load_with_profile(profile)?;

    match cli.command {
        Commands::Serve { listen } => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
                )
                .init();

            let db = open_database(&config)?;
            let addr = listen.unwrap_or_else(|| config.listen_addr.clone());
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(glowplan::api::serve(&addr, db))?;
        }
        Commands::Tui => {
            let (bus, invalidations) = glowplan::client::invalidation_channel();
            let client = glowplan::client::ApiClient::new(&config.server_url, bus)?;
            let app = glowplan::tui::App::new(config, client, invalidations)?;
            glowplan::tui::run_event_loop(app)?;
        }
        Commands::AddTask {
            title,
            priority,
            list,
            category,
        } => {
            let db = open_database(&config)?;
            glowplan::cli::handle_add_task(title, priority, list, category, &db)?;
        }
        Commands::LogHabit {
            key,
            value,
            target,
            date,
        } => {
            let db = open_database(&config)?;
            glowplan::cli::handle_log_habit(key, value, target, date, &db)?;
        }
        Commands::Glow => {
            let db = open_database(&config)?;
            glowplan::cli::handle_glow(&db)?;
        }
    }

    Ok(())
}

fn open_database(config: &Config) -> Result<Database> {
    let db_path = config.get_database_path();
    Ok(Database::new(db_path.to_str().ok_or_else(|| {
        color_eyre::eyre::eyre!("Database path contains invalid UTF-8")
    })?)?)
}
