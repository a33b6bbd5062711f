// CLI module for gemini-relay
// Author: kelexine (https://github.com/kelexine)

use clap::Parser;
use std::path::PathBuf;

/// gemini-relay - Sends uploaded images to Gemini and relays the answer
#[derive(Parser, Debug, Default, Clone)]
#[command(name = "gemini-relay", version, about, long_about = None)]
pub struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Address to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Gemini API key
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Path to a TOML config file (default: ~/.gemini-relay/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
