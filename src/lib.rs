//! Receipt OCR backed by the Gemini multimodal API
//!
//! Validates an uploaded receipt image, sends it inline to Gemini's
//! `generateContent` endpoint with a fixed extraction prompt, and returns the
//! text the model read from it.

pub mod ai;
pub mod app;
pub mod error;
pub mod image;
pub mod models;
pub mod prompts;

pub use error::{Error, Result};
