//! Server configuration.
//!
//! Resolution order:
//! 1. `SYSDASH_CONFIG` environment variable (path to a YAML file)
//! 2. `./sysdash.yaml` in the current directory
//! 3. Defaults
//!
//! `SYSDASH_ADDR` overrides `listen_addr` in every case.
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use sysdash_core::SysdashError;
use sysdash_stages::SourceLocations;

const CONFIG_ENV: &str = "SYSDASH_CONFIG";
const ADDR_ENV: &str = "SYSDASH_ADDR";
const DEFAULT_CONFIG_FILE: &str = "sysdash.yaml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// `<display-name>;<code>` per line
    #[serde(default = "default_countries_path")]
    pub countries_path: PathBuf,

    #[serde(flatten)]
    pub sources: SourceLocations,
}

fn default_listen_addr() -> String {
    "localhost:8282".to_string()
}

fn default_countries_path() -> PathBuf {
    PathBuf::from("data/countries.csv")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            countries_path: default_countries_path(),
            sources: SourceLocations::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_yaml(text: &str) -> Result<Self, SysdashError> {
        serde_yaml::from_str(text).map_err(|e| SysdashError::Config(e.to_string()))
    }

    pub fn from_file(path: &Path) -> Result<Self, SysdashError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| SysdashError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml(&text)
    }

    pub fn load() -> Result<Self, SysdashError> {
        let mut config = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            Err(_) => Self::default(),
        };

        if let Ok(addr) = std::env::var(ADDR_ENV) {
            config.listen_addr = addr;
        }

        Ok(config)
    }
}
