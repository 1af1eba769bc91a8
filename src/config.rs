use crate::constants;
use crate::error::{PipelineError, Result};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Environment variable that overrides the configured data directory
pub const DATA_DIR_ENV: &str = "FLIGHTMAP_DATA_DIR";

#[derive(Debug, Deserialize)]
pub struct Config {
    pub data: DataConfig,
}

/// Where the input files live. Loaders always receive explicit paths built
/// from this value; nothing in the pipeline resolves paths from the working
/// directory on its own.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    pub base_dir: PathBuf,
    pub airports_file: String,
    pub routes_file: String,
    pub airlines_file: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from("config.toml")
    }

    pub fn load_from(path: &str) -> Result<Self> {
        let config_content = fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!("Failed to read config file '{}': {}", path, e))
        })?;

        let mut config: Config = toml::from_str(&config_content)?;
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            if !dir.trim().is_empty() {
                config.data.base_dir = PathBuf::from(dir);
            }
        }
        Ok(config)
    }
}

impl DataConfig {
    /// Configuration rooted at an explicit directory, using the default
    /// file names.
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self {
            base_dir,
            airports_file: constants::AIRPORTS_FILE.to_string(),
            routes_file: constants::ROUTES_FILE.to_string(),
            airlines_file: constants::AIRLINES_FILE.to_string(),
        }
    }

    pub fn airports_path(&self) -> PathBuf {
        self.base_dir.join(&self.airports_file)
    }

    pub fn routes_path(&self) -> PathBuf {
        self.base_dir.join(&self.routes_file)
    }

    pub fn airlines_path(&self) -> PathBuf {
        self.base_dir.join(&self.airlines_file)
    }
}
