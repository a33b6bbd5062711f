// Configuration module
// Author: kelexine (https://github.com/kelexine)

mod models;

pub use models::*;

use crate::cli::Args;
use crate::error::{RelayError, Result};
use config::{Config, Environment, File, FileFormat};
use std::path::{Path, PathBuf};

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. CLI arguments and the `PORT` / `API_KEY` variables (highest)
    /// 2. `GEMINI_RELAY_*` environment variables
    /// 3. Config file
    /// 4. Defaults (lowest)
    pub fn load(args: &Args) -> Result<Self> {
        let path = args
            .config
            .clone()
            .unwrap_or_else(Self::default_config_path);

        Self::load_from(&path, args)
    }

    /// Same as [`AppConfig::load`] with an explicit config file path.
    pub fn load_from(path: &Path, args: &Args) -> Result<Self> {
        let config = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&Self::default())?)
            // Load from config file if it exists
            .add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(args.config.is_some()),
            )
            // Override with environment variables (e.g. GEMINI_RELAY_GEMINI__MODEL)
            .add_source(
                Environment::with_prefix("GEMINI_RELAY")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.host", args.host.clone())?
            .set_override_option("server.port", args.port.map(i64::from))?
            .set_override_option("gemini.api_key", args.api_key.clone())?
            .build()
            .map_err(|e| RelayError::Config(e.to_string()))?;

        let mut app_config: AppConfig = config
            .try_deserialize()
            .map_err(|e| RelayError::Config(e.to_string()))?;

        // Blank keys count as missing
        if app_config
            .gemini
            .api_key
            .as_ref()
            .is_some_and(ApiKey::is_empty)
        {
            app_config.gemini.api_key = None;
        }

        Ok(app_config)
    }

    fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".gemini-relay")
            .join("config.toml")
    }
}
