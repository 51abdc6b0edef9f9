//! Bilheteira CLI
//!
//! Watches the Sporting CP ticket page and emails newly listed fixtures.
//! Meant to be driven by an external scheduler (cron or a systemd timer);
//! one invocation performs at most one fetch and one delivery.

use std::path::PathBuf;

use bilheteira::{
    error::Result,
    models::Config,
    pipeline::{self, WatchOptions},
    services::{FixtureExtractor, MailConfig, Mailer},
    storage::{LocalStorage, StateStore},
    utils::http,
};
use clap::{Parser, Subcommand};

/// bilheteira - Sporting CP Ticket Page Watcher
#[derive(Parser, Debug)]
#[command(name = "bilheteira", version, about = "Sporting CP ticket page watcher")]
struct Cli {
    /// Path to storage directory containing config and state files
    #[arg(short, long, default_value = "storage")]
    storage_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one full cycle: fetch, extract, diff, notify, persist
    Watch {
        /// Report fixtures found by the very first run instead of only
        /// recording them as the baseline
        #[arg(long)]
        notify_on_first_run: bool,
    },

    /// Fetch the page and print extracted fixtures without touching state
    Extract,

    /// Validate configuration
    Validate,

    /// Show current state info
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::info!("bilheteira starting...");

    let config_path = cli.storage_dir.join("config.toml");
    let config = Config::load_or_default(&config_path);

    match cli.command {
        Command::Watch {
            notify_on_first_run,
        } => {
            config.validate()?;

            let client = http::create_client(&config.watcher)?;
            let storage = LocalStorage::new(&cli.storage_dir);
            let mailer = Mailer::new(MailConfig::from_env(), &config.mail);

            pipeline::run_watch(
                &config,
                &storage,
                &mailer,
                &client,
                WatchOptions {
                    notify_on_first_run,
                },
            )
            .await?;

            log::info!("Watch complete!");
        }

        Command::Extract => {
            config.validate()?;

            let client = http::create_client(&config.watcher)?;
            let lines = http::fetch_page_lines(&client, &config.watcher.url).await?;
            let extractor = FixtureExtractor::new(config.heuristics.clone());
            let fixtures = extractor.extract(&lines);

            log::info!("Extracted {} fixture(s)", fixtures.len());
            for fixture in &fixtures {
                println!("{}", fixture.summary());
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK (url: {})", config.watcher.url);

            match MailConfig::from_env().validate() {
                Ok(()) => log::info!("✓ SMTP configuration complete"),
                Err(e) => log::warn!(
                    "SMTP configuration incomplete ({}); 'watch' will fail once new fixtures appear",
                    e
                ),
            }

            log::info!("All validations passed!");
        }

        Command::Info => {
            log::info!("Storage directory: {}", cli.storage_dir.display());

            let storage = LocalStorage::new(&cli.storage_dir);
            let state = storage.load().await?;
            if state.is_first_run() {
                log::info!("No state recorded yet; the next 'watch' establishes the baseline.");
            } else {
                log::info!("Seen fixtures: {}", state.len());
                log::info!("Last updated: {}", state.updated_at);
            }
        }
    }

    log::info!("Done!");

    Ok(())
}
