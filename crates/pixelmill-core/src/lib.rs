//! Pixelmill Core - Embeddable image transform pipeline.
//!
//! Pixelmill applies an ordered sequence of editing operations (crop,
//! resize, flips, contrast, color presets, watermark) to an RGBA pixel
//! buffer. The interesting part is the execution engine: a deterministic,
//! strictly sequential interpreter over a tagged spec sequence, with a
//! kernel-based resampler and a content-aware seam carver behind the two
//! resize strategies.
//!
//! # Architecture
//!
//! ```text
//! PixelBuffer → [Spec, Spec, ...] → Executor → operators → PixelBuffer
//! ```
//!
//! Each operator consumes the buffer produced by the previous step and
//! validates its parameters against that buffer's current dimensions; the
//! first failure aborts the run with the offending step's index and kind.
//!
//! # Usage
//!
//! ```rust,ignore
//! use pixelmill_core::{Config, PixelBuffer, Pixelmill, Spec, SampleFilter};
//!
//! fn main() -> pixelmill_core::Result<()> {
//!     let mill = Pixelmill::new(Config::load()?)?;
//!     let buffer = PixelBuffer::from(image::open("./photo.jpg")?);
//!
//!     let specs = [
//!         Spec::crop(0, 0, 1200, 800),
//!         Spec::resize(600, 400, SampleFilter::Lanczos3),
//!     ];
//!     let out = mill.run(buffer, &specs)?;
//!     out.into_rgba_image().save("./photo_small.jpg")?;
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod buffer;
pub mod codec;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod spec;

// Re-exports for convenient access
pub use buffer::PixelBuffer;
pub use codec::{decode_spec_string, encode_spec_string};
pub use config::Config;
pub use error::{
    ConfigError, OperatorError, PipelineError, PipelineResult, PixelmillError, Result,
    SpecCodecError,
};
pub use pipeline::{Executor, WatermarkAsset};
pub use report::{RunReport, StepReport};
pub use spec::{FilterPreset, ResizeMode, SampleFilter, Spec, SpecKind};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Pixelmill engine - the main entry point for running spec sequences.
///
/// Bundles a configuration with an executor built from it, so callers load
/// config once and run any number of buffers through it.
pub struct Pixelmill {
    config: Config,
    executor: Executor,
}

impl Pixelmill {
    /// Create a new engine with the given configuration.
    pub fn new(config: Config) -> Result<Self> {
        tracing::debug!("Initializing pixelmill v{}", VERSION);
        let executor = Executor::from_config(&config)?;
        Ok(Self { config, executor })
    }

    /// Create a new engine with configuration from the default location.
    pub fn with_defaults() -> Result<Self> {
        let config = Config::load()?;
        Self::new(config)
    }

    /// Get a reference to the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get a reference to the executor.
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Run a spec sequence against a buffer.
    pub fn run(&self, buffer: PixelBuffer, specs: &[Spec]) -> PipelineResult<PixelBuffer> {
        self.executor.run(buffer, specs)
    }

    /// Decode a spec string and run it against a buffer.
    pub fn run_spec_string(&self, buffer: PixelBuffer, spec_string: &str) -> Result<PixelBuffer> {
        let specs = decode_spec_string(spec_string)?;
        Ok(self.executor.run(buffer, &specs)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_pixelmill_new() {
        let mill = Pixelmill::new(Config::default()).unwrap();
        assert_eq!(mill.config().limits.max_image_dimension, 32768);
    }

    #[test]
    fn test_run_spec_string_end_to_end() {
        let mill = Pixelmill::new(Config::default()).unwrap();
        let buffer = PixelBuffer::from_fn(4, 4, |x, y| [(x * 50) as u8, (y * 50) as u8, 0, 255]);
        let spec_string = encode_spec_string(&[Spec::crop(0, 0, 2, 2), Spec::flip_v()]).unwrap();

        let out = mill.run_spec_string(buffer, &spec_string).unwrap();
        assert_eq!(out.dimensions(), (2, 2));
    }

    #[test]
    fn test_run_spec_string_surfaces_codec_errors() {
        let mill = Pixelmill::new(Config::default()).unwrap();
        let buffer = PixelBuffer::new(2, 2);
        let err = mill.run_spec_string(buffer, "@@@").unwrap_err();
        assert!(matches!(err, PixelmillError::Codec(_)));
    }

    #[test]
    fn test_executor_accessor_reports_steps() {
        let mill = Pixelmill::new(Config::default()).unwrap();
        let buffer = PixelBuffer::from_fn(4, 4, |x, y| [(x * 50) as u8, (y * 50) as u8, 0, 255]);
        let specs = [Spec::crop(1, 1, 3, 3), Spec::flip_h()];

        let (out, report) = mill.executor().run_with_report(buffer, &specs).unwrap();
        assert_eq!(out.dimensions(), (2, 2));
        assert_eq!(report.steps.len(), 2);
        assert_eq!(report.steps[0].kind, SpecKind::Crop);
    }
}
