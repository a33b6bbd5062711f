//! Data models for the upstream Google Gemini API.
//!
//! This module contains the request/response bodies exchanged with
//! `generateContent` (`gemini`).

// Author: kelexine (https://github.com/kelexine)

pub mod gemini;

pub use gemini::{Content, GenerateContentRequest, GenerateContentResponse, InlineData, Part};
