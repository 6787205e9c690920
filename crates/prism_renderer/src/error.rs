//! Render errors.
//!
//! Tracing itself cannot fail; errors only come from configuration,
//! cancellation and writing images out.

use thiserror::Error;

/// Errors that can occur while rendering or saving images.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("Malformed PPM data: {0}")]
    Ppm(String),

    #[error("Render cancelled")]
    Cancelled,
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
