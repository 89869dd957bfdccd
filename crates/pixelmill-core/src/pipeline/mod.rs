//! Image transform pipeline components.
//!
//! This module contains the operators a spec sequence can invoke and the
//! executor that drives them:
//! - **geometry**: crop and the two flips
//! - **resample**: kernel-based resizing for normal resizes
//! - **seam**: content-aware resizing by seam carving
//! - **contrast**: linear contrast adjustment
//! - **preset**: named color washes
//! - **watermark**: alpha-composited badge placement
//! - **executor**: dispatches specs in order and threads the buffer through

pub mod contrast;
pub mod executor;
pub mod geometry;
pub mod preset;
pub mod resample;
pub mod seam;
pub mod watermark;

// Re-exports for convenient access
pub use executor::Executor;
pub use watermark::WatermarkAsset;
