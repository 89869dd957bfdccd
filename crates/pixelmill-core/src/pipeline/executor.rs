//! Pipeline execution - threads one buffer through an ordered spec sequence.

use std::time::Instant;

use crate::buffer::PixelBuffer;
use crate::config::{Config, LimitsConfig, PresetsConfig};
use crate::error::{OperatorError, PipelineError, PipelineResult, Result};
use crate::report::{RunReport, StepReport};
use crate::spec::{ResizeMode, Spec};

use super::watermark::WatermarkAsset;
use super::{contrast, geometry, preset, resample, seam, watermark};

/// Executes spec sequences against pixel buffers.
///
/// The executor owns the run-independent assets: the preset palette, the
/// watermark image and the resize limits. Runs themselves are strictly
/// sequential; each operator consumes the buffer the previous one produced,
/// and the first failure aborts the run with the offending step's index and
/// kind. An executor is immutable during runs, so one instance can serve
/// any number of buffers.
pub struct Executor {
    presets: PresetsConfig,
    watermark: WatermarkAsset,
    limits: LimitsConfig,
}

impl Executor {
    /// Create an executor with the built-in palette, badge and limits.
    pub fn new() -> Self {
        Self {
            presets: PresetsConfig::default(),
            watermark: WatermarkAsset::builtin(),
            limits: LimitsConfig::default(),
        }
    }

    /// Create an executor from configuration, loading the watermark asset
    /// from the configured path when one is set.
    pub fn from_config(config: &Config) -> Result<Self> {
        let watermark = match config.watermark_source() {
            Some(path) => WatermarkAsset::load_from(&path)?,
            None => WatermarkAsset::builtin(),
        };
        Ok(Self {
            presets: config.presets.clone(),
            watermark,
            limits: config.limits.clone(),
        })
    }

    /// Replace the watermark asset.
    pub fn with_watermark(mut self, asset: WatermarkAsset) -> Self {
        self.watermark = asset;
        self
    }

    /// Run `specs` in order against `buffer`.
    ///
    /// An empty sequence returns the buffer unchanged. On failure nothing
    /// is surfaced but the error; callers treat a failed run as if no step
    /// had been applied.
    pub fn run(&self, buffer: PixelBuffer, specs: &[Spec]) -> PipelineResult<PixelBuffer> {
        self.run_with_report(buffer, specs).map(|(buf, _)| buf)
    }

    /// Run `specs` and also report per-step timings and dimensions.
    pub fn run_with_report(
        &self,
        mut buffer: PixelBuffer,
        specs: &[Spec],
    ) -> PipelineResult<(PixelBuffer, RunReport)> {
        let start = Instant::now();
        let (input_width, input_height) = buffer.dimensions();
        tracing::debug!(
            "Running {} specs on {}x{} buffer",
            specs.len(),
            input_width,
            input_height
        );

        let mut steps = Vec::with_capacity(specs.len());
        for (index, spec) in specs.iter().enumerate() {
            let step_start = Instant::now();
            let kind = spec.kind();

            buffer = self
                .apply(buffer, spec)
                .map_err(|source| PipelineError::at(index, kind, source))?;

            let elapsed = step_start.elapsed();
            let (width, height) = buffer.dimensions();
            tracing::trace!("  step {} ({}): {:?} -> {}x{}", index, kind, elapsed, width, height);
            steps.push(StepReport {
                index,
                kind,
                elapsed_ms: elapsed.as_secs_f64() * 1000.0,
                width,
                height,
            });
        }

        let total = start.elapsed();
        let (output_width, output_height) = buffer.dimensions();
        tracing::debug!(
            "Ran {} specs in {:?} ({}x{} -> {}x{})",
            specs.len(),
            total,
            input_width,
            input_height,
            output_width,
            output_height
        );

        let report = RunReport {
            input_width,
            input_height,
            output_width,
            output_height,
            total_ms: total.as_secs_f64() * 1000.0,
            steps,
        };
        Ok((buffer, report))
    }

    /// Dispatch one spec to its operator.
    fn apply(&self, buffer: PixelBuffer, spec: &Spec) -> std::result::Result<PixelBuffer, OperatorError> {
        match spec {
            Spec::Crop(params) => geometry::crop(&buffer, params),
            Spec::Resize(params) => {
                self.check_resize_limit(&buffer, params.width, params.height)?;
                match params.mode {
                    ResizeMode::Normal => {
                        resample::resize(&buffer, params.width, params.height, params.filter)
                    }
                    ResizeMode::SeamCarve => seam::seam_carve(&buffer, params.width, params.height),
                }
            }
            Spec::FlipH => Ok(geometry::flip_h(buffer)),
            Spec::FlipV => Ok(geometry::flip_v(buffer)),
            Spec::Contrast(params) => contrast::adjust(buffer, params),
            Spec::Filter(params) => preset::apply(buffer, params, &self.presets),
            Spec::Watermark(params) => watermark::composite(buffer, params, &self.watermark),
        }
    }

    /// Reject resize targets beyond the configured maximum dimension.
    fn check_resize_limit(
        &self,
        buffer: &PixelBuffer,
        target_w: u32,
        target_h: u32,
    ) -> std::result::Result<(), OperatorError> {
        let max = self.limits.max_image_dimension;
        if target_w > max || target_h > max {
            let (w, h) = buffer.dimensions();
            return Err(OperatorError::geometry(
                format!(
                    "resize target {}x{} exceeds the maximum dimension {}",
                    target_w, target_h, max
                ),
                w,
                h,
            ));
        }
        Ok(())
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new()
    }
}
