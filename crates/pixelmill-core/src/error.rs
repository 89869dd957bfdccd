//! Error types for the pixelmill transform pipeline.
//!
//! Errors are layered the way the pipeline is: each operator validates the
//! parameters it was given against the buffer it receives and reports an
//! [`OperatorError`], the executor wraps the first failure with the position
//! of the offending spec as a [`PipelineError`], and [`PixelmillError`]
//! aggregates everything a caller can hit.

use thiserror::Error;

use crate::spec::SpecKind;

/// Top-level error type for pixelmill operations.
#[derive(Error, Debug)]
pub enum PixelmillError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pipeline execution errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Spec string marshalling errors
    #[error("Spec codec error: {0}")]
    Codec(#[from] SpecCodecError),

    /// Image decode/encode errors from the underlying codec
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// A validation or execution failure raised by a single operator.
///
/// Operators fail fast: parameters are checked against the current buffer
/// state before any pixel is touched, so a failing step never leaves a
/// half-transformed buffer behind.
#[derive(Error, Debug)]
pub enum OperatorError {
    /// Bounds or target dimensions invalid relative to the current buffer
    #[error("invalid geometry: {detail} (buffer is {width}x{height})")]
    InvalidGeometry {
        detail: String,
        width: u32,
        height: u32,
    },

    /// Normal resize requested without a resampling kernel
    #[error("normal resize requires a sample filter")]
    MissingFilter,

    /// Filter step with no preset selected
    #[error("filter step has no preset selected")]
    MissingFilterPreset,

    /// Out-of-domain scalar parameter
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A spec entry with a missing or unrecognized operation tag (raised
    /// when decoding spec strings)
    #[error("spec entry has no recognized operation")]
    EmptyVariant,
}

impl OperatorError {
    /// Build an `InvalidGeometry` error carrying the current buffer size.
    pub(crate) fn geometry(detail: impl Into<String>, width: u32, height: u32) -> Self {
        Self::InvalidGeometry {
            detail: detail.into(),
            width,
            height,
        }
    }
}

/// A failed pipeline run: the first operator error, annotated with the
/// zero-based index of the offending spec and its kind.
///
/// Execution halts at the failing step; nothing after it is applied and no
/// partial image is surfaced.
#[derive(Error, Debug)]
#[error("step {index} ({kind}) failed: {source}")]
pub struct PipelineError {
    /// Zero-based index of the failing spec in the run
    pub index: usize,

    /// Which operation failed
    pub kind: SpecKind,

    /// The operator-level failure
    #[source]
    pub source: OperatorError,
}

impl PipelineError {
    pub(crate) fn at(index: usize, kind: SpecKind, source: OperatorError) -> Self {
        Self {
            index,
            kind,
            source,
        }
    }
}

/// Errors from unmarshalling spec strings.
#[derive(Error, Debug)]
pub enum SpecCodecError {
    /// The envelope is not valid URL-safe base64
    #[error("spec string is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The payload is not a JSON sequence of spec entries
    #[error("spec payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// An entry in the sequence failed validation (e.g. no operation tag)
    #[error("spec entry {index}: {source}")]
    Entry {
        index: usize,
        #[source]
        source: OperatorError,
    },
}

/// Convenience type alias for pixelmill results.
pub type Result<T> = std::result::Result<T, PixelmillError>;

/// Convenience type alias for pipeline-run results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
