//! Per-class scatter figures for labeled feature vectors.
//!
//! Samples are grouped by label into one marker trace per class, each with
//! its own display name and color. The resulting [`Figure`] can be handed to
//! a plotly-style renderer as JSON or rasterized to PNG.

pub mod config;
pub mod error;
pub mod plot;

pub use config::Config;
pub use error::{PlotError, PlotResult, ValidationError};
pub use plot::*;
