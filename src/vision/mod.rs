//! Image intake for the operation endpoint.
//!
//! This module pulls the uploaded image out of the multipart form and turns
//! it into a Gemini `InlineData` part. The bytes are forwarded untouched and
//! always tagged as JPEG.
//!
//! # Submodules
//!
//! - `models`: Image formats, magic-byte sniffing and the field constants.
//! - `upload`: Multipart extraction and inline part construction.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod models;
pub mod upload;

pub use models::{detect_mime_type, ImageFormat, IMAGE_FIELD};
pub use upload::{jpeg_part, read_image_field};
