//! Optional YAML config file.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_CONFIG_FILE: &str = "release-keeper.yaml";

/// Settings that may be stored in `release-keeper.yaml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileConfig {
    /// API base URL (GitHub Enterprise etc.)
    #[serde(default)]
    pub api_url: Option<String>,

    /// Request timeout, e.g. "60s"
    #[serde(default)]
    pub timeout: Option<String>,

    /// Environment variable holding the auth token
    #[serde(default)]
    pub token_var: Option<String>,
}

impl FileConfig {
    /// Load the config file
    ///
    /// An explicit path must exist. Without one, `release-keeper.yaml` in
    /// the working directory is used when present.
    pub fn load(explicit: Option<&Path>) -> Result<Option<Self>, ConfigError> {
        let path = match explicit {
            Some(path) if !path.is_file() => {
                return Err(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            }
            Some(path) => path.to_path_buf(),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if !default.is_file() {
                    return Ok(None);
                }
                default.to_path_buf()
            }
        };

        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::ParseError {
            message: format!("{}: {}", path.display(), e),
        })?;
        Self::parse(&content)
            .map(Some)
            .map_err(|e| ConfigError::ParseError {
                message: format!("{}: {}", path.display(), e),
            })
    }

    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes as unit, not as a map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    pub fn timeout(&self) -> Result<Option<Duration>, ConfigError> {
        self.timeout.as_deref().map(super::parse_timeout).transpose()
    }
}
