//! Command handlers for the pixelmill CLI.

pub mod apply;
pub mod config;
pub mod spec;
