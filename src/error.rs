//! Error types for request validation and the rendering/config surfaces.

use thiserror::Error;

/// Input rejected while building a plot request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("features, labels and text are inconsistent: {features} features, {labels} labels, {text} text entries")]
    LengthMismatch {
        features: usize,
        labels: usize,
        text: usize,
    },

    #[error("names are inconsistent with labels: {classes} distinct classes, {names} names")]
    NameCountMismatch { classes: usize, names: usize },

    #[error("feature vector {index} has {found} components, expected {expected}")]
    RaggedFeatures {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("feature vector {index} contains a non-finite value")]
    NonFinite { index: usize },

    #[error("feature vectors need at least {required} components, got {found}")]
    Dimension { required: usize, found: usize },
}

/// Errors from everything around the core builders.
#[derive(Error, Debug)]
pub enum PlotError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("render error: {0}")]
    Render(String),

    #[error("PNG encode error: {0}")]
    Encode(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type PlotResult<T> = Result<T, PlotError>;
