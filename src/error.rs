//! Error handling and custom error types
//!
//! Every failure is tagged by kind so callers can branch on the variant
//! instead of inspecting message text.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invariant violation: {0}")]
    Invariant(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Generation(format!("HTTP request failed: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
