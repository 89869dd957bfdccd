//! Pixelmill CLI - apply image transform pipelines from the command line.
//!
//! Pixelmill reads an image, runs an ordered sequence of transform specs
//! against it (crop, resize, seam carve, flips, contrast, color presets,
//! watermark), and writes the result.
//!
//! # Usage
//!
//! ```bash
//! # Apply a spec string to an image
//! pixelmill apply photo.jpg --spec "W3sib3AiOi..." -o out.png
//!
//! # Apply a spec sequence from a JSON file, with a timing report
//! pixelmill apply photo.jpg --spec-file ops.json -o out.png --report
//!
//! # Build and inspect spec strings
//! pixelmill spec encode ops.json
//! pixelmill spec decode "W3sib3AiOi..."
//!
//! # View configuration
//! pixelmill config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;
mod validate;

/// Pixelmill - apply image transform pipelines from the command line.
#[derive(Parser, Debug)]
#[command(name = "pixelmill")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Transform an image with a spec sequence
    Apply(cli::apply::ApplyArgs),

    /// Encode and decode spec strings
    Spec(cli::spec::SpecArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging from config, with CLI verbose override.
    // Note: logging isn't initialized yet, so use eprintln for config warnings.
    let config = match pixelmill_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `pixelmill config path`."
            );
            pixelmill_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("pixelmill v{}", pixelmill_core::VERSION);

    // Dispatch to the appropriate command handler
    match cli.command {
        Commands::Apply(args) => cli::apply::execute(args),
        Commands::Spec(args) => cli::spec::execute(args),
        Commands::Config(args) => cli::config::execute(args),
    }
}
