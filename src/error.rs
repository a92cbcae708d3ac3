//! Error handling and custom error types
//!
//! Provides unified error handling across the extraction pipeline using thiserror.

use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to connect to Gemini API: {}", error_chain(.0))]
    Transport(#[source] reqwest::Error),

    #[error("Failed to read Gemini response body: {}", error_chain(.0))]
    ResponseBody(#[source] reqwest::Error),

    #[error("Gemini API error (status {status}): {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Failed to parse Gemini response: {0}")]
    ResponseParse(#[source] serde_json::Error),

    #[error("Unexpected Gemini response: {0}")]
    ResponseShape(ResponseShape),

    #[error("Invariant violation: {0}")]
    Invariant(String),
}

/// The link of the `candidates -> content -> parts` chain that was missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseShape {
    NoCandidates { block_reason: Option<String> },
    MissingContent,
    NoParts,
}

impl fmt::Display for ResponseShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseShape::NoCandidates {
                block_reason: Some(reason),
            } => write!(f, "no candidates returned (prompt blocked: {})", reason),
            ResponseShape::NoCandidates { block_reason: None } => {
                write!(f, "no candidates returned")
            }
            ResponseShape::MissingContent => write!(f, "first candidate has no content"),
            ResponseShape::NoParts => write!(f, "first candidate content has no parts"),
        }
    }
}

impl Error {
    /// True when the failure happened before any response was received.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// Follow-up advice shown under the error message.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Error::Transport(_) | Error::HttpStatus { .. } => {
                Some("Make sure you have an internet connection and a valid API key.")
            }
            Error::Config(_) => Some("Set GEMINI_API_KEY in the environment or a .env file."),
            Error::UnsupportedFormat(_) => Some("Upload a PNG or JPEG receipt image."),
            _ => None,
        }
    }
}

/// Render an error with all of its sources, outermost first.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

pub type Result<T> = std::result::Result<T, Error>;
