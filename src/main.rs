mod collections;
mod config;
mod database;
mod entities;
mod http_server;
mod logging;
mod provision;
mod seed;
mod services;
#[cfg(test)]
mod test_utils;

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use clap::{Parser, Subcommand};
use color_eyre::{Result, eyre::Context};
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    config::Config,
    database::Database,
    http_server::app::HttpServerConfig,
    logging::setup_logging,
    provision::{GraphStatus, SchemaProvisioner},
    seed::{Dataset, Seeder},
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The config file to use
    #[arg(short, long, env = "MUSIC_GRAPH_CONFIG")]
    config: Option<PathBuf>,

    /// SQLite database file, overrides `database_path` from the config
    #[arg(long, env = "MUSIC_GRAPH_DATABASE", global = true)]
    database: Option<PathBuf>,

    /// Named graph to provision and traverse, overrides `graph_name` from the config
    #[arg(long, env = "MUSIC_GRAPH_NAME", global = true)]
    graph_name: Option<String>,

    /// Console log level (default: info)
    #[arg(long, default_value = "info", global = true, env = "LOG_LEVEL")]
    log_level: log::LevelFilter,

    /// File log level (default: debug)
    #[arg(long, default_value = "debug", global = true)]
    log_file_level: log::LevelFilter,

    /// Path to log file
    #[arg(long, env = "MUSIC_GRAPH_LOG_FILE", global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the database, collections, indexes and named graph where missing
    Provision,
    /// Wipe every collection and load the built-in catalog
    Seed {
        /// Validate and plan only, without touching the database
        #[arg(long)]
        dry_run: bool,

        /// Seed for the playlist track selection, for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Serve the REST API
    Serve {
        /// The port to run the server on, overrides `server.port` from the config
        #[arg(short, long, env = "MUSIC_GRAPH_HTTP_PORT")]
        port: Option<u16>,
    },
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Create a default config file, if it doesn't exist
    CreateDefault,
    /// Print the path to the config file
    Path,
}

async fn open_provisioned(config: &Config) -> Result<Arc<Database>> {
    let database = Arc::new(Database::open(&config.database_path()).await?);

    let report = SchemaProvisioner::new(database.clone())
        .ensure(&config.graph_name)
        .await
        .context("Failed to provision database")?;
    if let GraphStatus::Unavailable(reason) = &report.graph {
        log::warn!("Graph '{}' unavailable: {}", config.graph_name, reason);
    }

    Ok(database)
}

/// Load the config file named by `--config`, or the default one, then apply the
/// command line overrides
fn load_config(args: &Args) -> Result<Config> {
    log::debug!("Loading configuration");

    let mut config = {
        if let Some(config) = &args.config {
            Config::from_file(config)
        } else {
            Config::load()
        }
    }
    .with_context(|| "Failed to load music-graph config")?;

    if let Some(database) = &args.database {
        config.set_database_path(database);
    }
    if let Some(graph_name) = &args.graph_name {
        config.graph_name = graph_name.clone();
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    setup_logging(args.log_level, args.log_file.clone(), args.log_file_level)?;

    match &args.command {
        Commands::Provision => {
            let config = load_config(&args)?;
            let database = Database::open(&config.database_path()).await?;
            let report = SchemaProvisioner::new(Arc::new(database))
                .ensure(&config.graph_name)
                .await?;

            let graph = match &report.graph {
                GraphStatus::Created => "created".to_string(),
                GraphStatus::AlreadyExists => "already present".to_string(),
                GraphStatus::Unavailable(reason) => format!("unavailable ({})", reason),
            };
            println!(
                "Provisioned {}: {} collections created, graph '{}' {}",
                config.database_path().display(),
                report.created_collections.len(),
                config.graph_name,
                graph
            );
        }
        Commands::Seed { dry_run, seed } => {
            let mut rng = match *seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            let now = Utc::now().timestamp_millis();
            let dataset = Dataset::builtin(now);

            if *dry_run {
                let (_, report) = seed::prepare(&dataset, &mut rng, now)?;
                println!("Dry run, nothing written: {}", report);
                return Ok(());
            }

            let config = load_config(&args)?;
            let database = open_provisioned(&config).await?;
            let report = Seeder::new(database).run(&dataset, &mut rng, now).await?;
            println!(
                "Seed complete in {}: collections, indexes and edges ready ({})",
                config.database_path().display(),
                report
            );
        }
        Commands::Serve { port } => {
            let config = load_config(&args)?;
            let port = port.unwrap_or(config.server.port);
            let database = open_provisioned(&config).await?;

            log::info!("Starting HTTP server on port: {}", port);
            http_server::app::start(HttpServerConfig {
                port,
                database,
                graph_name: config.graph_name.clone(),
            })
            .await?;
        }
        // These act on the file itself, which may not exist yet
        Commands::Config(config_commands) => match config_commands {
            ConfigCommands::CreateDefault => {
                log::debug!("Creating default config");
                let path = Config::create_default(args.config.as_deref())?;
                println!("{}", path.display());
            }
            ConfigCommands::Path => match args.config.clone().or_else(Config::config_path) {
                Some(path) => println!("{}", path.display()),
                None => println!("No default config path found"),
            },
        },
    }

    Ok(())
}
