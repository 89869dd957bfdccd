//! The `pixelmill config` command: inspect and create the config file.

use clap::{Args, Subcommand};
use pixelmill_core::Config;

/// Arguments for the `config` command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Operations on the configuration file.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the active configuration as TOML
    Show,

    /// Print the config file location
    Path,

    /// Write a config file populated with the defaults
    Init {
        /// Replace an existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Execute the config command.
pub fn execute(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => println!("{}", Config::load()?.to_toml()?),
        ConfigCommand::Path => println!("{}", Config::default_path().display()),
        ConfigCommand::Init { force } => init_config(force)?,
    }
    Ok(())
}

fn init_config(force: bool) -> anyhow::Result<()> {
    let path = Config::default_path();
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists; pass --force to replace it",
            path.display()
        );
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, Config::default().to_toml()?)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}
