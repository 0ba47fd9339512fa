//! mbt - Marathon Backup Tool
//!
//! `mbt backup <PATH>` snapshots every application; `mbt restore <PATH>`
//! recreates them with zero instances.

use anyhow::Result;
use clap::{Parser, Subcommand};
use marathon_backup::config::{Config, Overrides};
use marathon_backup::{utils, FsSnapshotStore, MarathonClient, SnapshotRestorer, SnapshotWriter};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mbt", author, version, about = "Marathon Backup Tool", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Marathon endpoint e.g. http://localhost:8080
    #[arg(short, long, global = true)]
    endpoint: Option<String>,

    /// HTTP Basic Auth user:password
    #[arg(short, long, value_name = "USER:PASSWORD", global = true)]
    user: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Backup the given Marathon endpoint
    Backup {
        /// Directory to write snapshots into
        path: PathBuf,

        /// Force writing backup files
        #[arg(short, long)]
        force: bool,
    },

    /// Restore the given Marathon endpoint
    Restore {
        /// Directory to restore from
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let (root, force) = match &args.command {
        Command::Backup { path, force } => (path.clone(), *force),
        Command::Restore { path } => (path.clone(), false),
    };

    // Load configuration
    let config = match &args.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => Config::default(),
    }
    .with_overrides(Overrides {
        endpoint: args.endpoint.clone(),
        credentials: args.user.clone(),
        root: Some(root),
        force,
        log_level: args.log_level.clone(),
    })?;

    // Initialize logging
    utils::logger::init(&config.log.level)?;

    let client = MarathonClient::new(&config.marathon)?;
    let store = FsSnapshotStore::from_config(&config.snapshot);

    tracing::info!(
        "mbt v{} against {} (root: {})",
        env!("CARGO_PKG_VERSION"),
        client.base_url(),
        config.snapshot.root.display()
    );

    match args.command {
        Command::Backup { .. } => {
            let summary = SnapshotWriter::new(client, store).backup().await?;
            println!(
                "Backed up {} applications ({} versions, {} files) to {} in {}s",
                summary.applications,
                summary.versions,
                summary.files_written,
                config.snapshot.root.display(),
                summary.duration_secs
            );
        }
        Command::Restore { .. } => {
            let report = SnapshotRestorer::new(client, store).restore().await?;
            for failure in &report.failed {
                eprintln!(
                    "Failed to restore {} ({}): {}",
                    failure.app_id,
                    failure.path.display(),
                    failure.error
                );
            }
            println!(
                "Restored {} applications, {} failed",
                report.succeeded(),
                report.failed.len()
            );
        }
    }

    Ok(())
}
