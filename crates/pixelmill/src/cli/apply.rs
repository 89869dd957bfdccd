//! The `pixelmill apply` command for transforming an image file.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use pixelmill_core::{decode_spec_string, Config, Executor, PixelBuffer, RunReport, Spec};

use crate::validate::Validator;

/// Arguments for the `apply` command.
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Image file to transform
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output image file (format inferred from the extension)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Spec string (URL-safe base64 over the JSON spec sequence)
    #[arg(
        short,
        long,
        required_unless_present = "spec_file",
        conflicts_with = "spec_file"
    )]
    pub spec: Option<String>,

    /// JSON file holding the spec sequence
    #[arg(long)]
    pub spec_file: Option<PathBuf>,

    /// Use a specific config file instead of the default
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write a JSON run report (per-step timings and dimensions) to a file,
    /// or to stdout with `-`
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,
}

/// Execute the apply command.
pub fn execute(args: ApplyArgs) -> anyhow::Result<()> {
    let specs = load_specs(&args)?;
    let config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load()?,
    };
    let executor = Executor::from_config(&config)?;

    Validator::new(config.limits.clone()).validate(&args.input)?;
    let img = image::open(&args.input)
        .with_context(|| format!("Failed to open image {}", args.input.display()))?;
    let buffer = PixelBuffer::from(img);
    check_input_dimensions(&buffer, config.limits.max_image_dimension)?;
    tracing::info!(
        "Loaded {} ({}x{}), applying {} step(s)",
        args.input.display(),
        buffer.width(),
        buffer.height(),
        specs.len()
    );

    let (out, report) = executor.run_with_report(buffer, &specs)?;

    let (width, height) = out.dimensions();
    save_output(out, &args.output)?;
    tracing::info!("Wrote {} ({}x{})", args.output.display(), width, height);

    if let Some(target) = &args.report {
        write_report(&report, target)?;
    }
    Ok(())
}

/// Resolve the spec sequence from `--spec` or `--spec-file`.
fn load_specs(args: &ApplyArgs) -> anyhow::Result<Vec<Spec>> {
    if let Some(spec) = &args.spec {
        return Ok(decode_spec_string(spec)?);
    }
    // clap guarantees one of the two is present
    let path = args
        .spec_file
        .as_ref()
        .context("Provide --spec or --spec-file")?;
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read spec file {}", path.display()))?;
    let specs: Vec<Spec> =
        serde_json::from_str(&json).context("Spec file is not a JSON spec sequence")?;
    Ok(specs)
}

fn check_input_dimensions(buffer: &PixelBuffer, max: u32) -> anyhow::Result<()> {
    let (w, h) = buffer.dimensions();
    if w > max || h > max {
        anyhow::bail!("Input is {}x{}, above the {} px dimension limit", w, h, max);
    }
    Ok(())
}

/// Encode the buffer to the output path. JPEG cannot carry alpha, so those
/// outputs are flattened to RGB first.
fn save_output(buffer: PixelBuffer, path: &Path) -> anyhow::Result<()> {
    let rgba = buffer.into_rgba_image();
    let jpeg = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg"))
        .unwrap_or(false);

    let result = if jpeg {
        image::DynamicImage::ImageRgba8(rgba).to_rgb8().save(path)
    } else {
        rgba.save(path)
    };
    result.with_context(|| format!("Failed to write image {}", path.display()))
}

/// Emit the run report as pretty JSON, to stdout when the target is `-`.
fn write_report(report: &RunReport, target: &Path) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    if target == Path::new("-") {
        println!("{}", json);
    } else {
        std::fs::write(target, json)
            .with_context(|| format!("Failed to write report {}", target.display()))?;
    }
    Ok(())
}
