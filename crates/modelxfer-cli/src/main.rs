//! modelxfer CLI
//!
//! Export a single model version from the local store as an archive, or
//! import such an archive into a store.

mod commands;

use clap::{Parser, Subcommand};
use modelxfer_archive::{ArchiveTool, TarArchiver};
use modelxfer_core::{XferConfig, MODELS_ENV};
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

/// modelxfer - move models between machines without a registry
#[derive(Parser, Debug)]
#[command(name = "modelxfer")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Model store root (defaults to ~/.ollama/models)
    #[arg(long, env = MODELS_ENV, global = true)]
    models: Option<PathBuf>,

    /// Configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Export a model as an uncompressed tar archive
    Save {
        /// Model to export (e.g., mistral:7b, myorg/custom)
        model: String,

        /// Write the archive to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the files that would be archived and exit
        #[arg(long)]
        dry_run: bool,
    },

    /// Import a model archive (.tar, .tar.gz, .tar.bz, .tar.xz)
    Load {
        /// Archive file to extract
        archive: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => XferConfig::from_file(path)?,
        None => XferConfig::default(),
    };

    // Initialize logging; stdout is reserved for archive data
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        match config.logging.level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "error" => Level::ERROR,
            _ => Level::WARN,
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    let root = config.store.resolve_root(cli.models);
    let archiver = TarArchiver::new(config.archiver);
    debug!(root = %root.display(), archiver = archiver.name(), "Using model store");

    match cli.command {
        Commands::Save {
            model,
            output,
            dry_run,
        } => {
            commands::save(&root, &archiver, &model, output, dry_run).await?;
        }
        Commands::Load { archive } => {
            commands::load(&root, &archiver, &archive).await?;
        }
    }

    Ok(())
}
