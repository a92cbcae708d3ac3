//! Receipt image validation and inline encoding
//!
//! Checks that an upload is a decodable PNG or JPEG and turns its original
//! bytes into the base64 payload embedded in the extraction request.

pub mod encoder;
pub mod mime;

pub use encoder::{encode, EncodedImage, SourceImage};
