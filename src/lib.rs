// gemini-relay - Single-endpoint image relay to the Gemini API
// Author: kelexine (https://github.com/kelexine)

pub mod cli;
pub mod config;
pub mod error;
pub mod gemini;
pub mod models;
pub mod server;
pub mod utils;
pub mod vision;
