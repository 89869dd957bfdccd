//! The `pixelmill spec` command for encoding and decoding spec strings.

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Subcommand};
use pixelmill_core::{decode_spec_string, encode_spec_string, Spec};

/// Arguments for the `spec` command.
#[derive(Args, Debug)]
pub struct SpecArgs {
    #[command(subcommand)]
    pub command: SpecCommand,
}

#[derive(Subcommand, Debug)]
pub enum SpecCommand {
    /// Encode a JSON spec sequence into a spec string
    Encode {
        /// JSON file to encode (reads stdin when omitted)
        file: Option<PathBuf>,
    },
    /// Decode a spec string into pretty-printed JSON
    Decode {
        /// Spec string to decode
        spec: String,
    },
}

/// Execute the spec command.
pub fn execute(args: SpecArgs) -> anyhow::Result<()> {
    match args.command {
        SpecCommand::Encode { file } => {
            let json = read_input(file.as_deref())?;
            let specs: Vec<Spec> =
                serde_json::from_str(&json).context("Input is not a JSON spec sequence")?;
            println!("{}", encode_spec_string(&specs)?);
        }
        SpecCommand::Decode { spec } => {
            let specs = decode_spec_string(&spec)?;
            println!("{}", serde_json::to_string_pretty(&specs)?);
        }
    }
    Ok(())
}

fn read_input(file: Option<&std::path::Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}
