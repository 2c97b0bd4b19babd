//! # Client Configuration
//!
//! Resolution order for every setting: CLI flag → environment variable →
//! config file → built-in default.
//!
//! ## Config File
//!
//! Optional YAML file, `release-keeper.yaml` in the working directory or the
//! path given with `--config`:
//!
//! ```yaml
//! api_url: https://github.example.com/api/v3
//! timeout: 90s
//! token_var: RELEASE_TOKEN
//! ```

mod credential;
mod file;

pub use credential::{validate_env_var_name, Credential};
pub use file::FileConfig;

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// `owner/repository` pair identifying the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub owner: String,
    pub repo: String,
}

impl FromStr for RepoSlug {
    type Err = ConfigError;

    /// Exactly one `/` with something on both sides
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
                Ok(Self {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                })
            }
            _ => Err(ConfigError::InvalidValue {
                field: "repo slug".to_string(),
                value: format!("\"{}\" (expected \"username/repository\")", s),
            }),
        }
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Everything an `ApiClient` needs; immutable once built
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub repo: RepoSlug,
    pub timeout: Duration,
    pub credential: Credential,
}

impl ClientConfig {
    /// Create a new client config with defaults
    pub fn new(repo: RepoSlug, credential: Credential) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            repo,
            timeout: DEFAULT_TIMEOUT,
            credential,
        }
    }

    /// Builder: set API base URL
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Builder: set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Apply config file values, then explicit overrides on top
    pub fn layered(
        repo: RepoSlug,
        credential: Credential,
        file: Option<&FileConfig>,
        api_url: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::new(repo, credential);
        if let Some(file) = file {
            if let Some(url) = &file.api_url {
                config = config.with_api_url(url.as_str());
            }
            if let Some(t) = file.timeout()? {
                config = config.with_timeout(t);
            }
        }
        if let Some(url) = api_url {
            config = config.with_api_url(url);
        }
        if let Some(t) = timeout {
            config = config.with_timeout(t);
        }
        Ok(config)
    }

    /// `{api_url}/repos/{owner}/{repo}/releases`
    pub fn releases_url(&self) -> String {
        format!("{}/repos/{}/releases", self.api_url, self.repo)
    }
}

/// Parse a humantime duration ("60s", "2m"), or bare seconds
pub fn parse_timeout(value: &str) -> Result<Duration, ConfigError> {
    let invalid = || ConfigError::InvalidValue {
        field: "timeout".to_string(),
        value: value.to_string(),
    };
    let duration = match value.trim().parse::<f64>() {
        Ok(secs) if secs.is_finite() && secs > 0.0 => {
            Duration::try_from_secs_f64(secs).map_err(|_| invalid())?
        }
        Ok(_) => return Err(invalid()),
        Err(_) => humantime::parse_duration(value.trim()).map_err(|_| invalid())?,
    };
    if duration.is_zero() {
        return Err(invalid());
    }
    Ok(duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slug() -> RepoSlug {
        "octo/tools".parse().unwrap()
    }

    #[test]
    fn test_repo_slug_parsing() {
        assert_eq!(slug().owner, "octo");
        assert_eq!(slug().repo, "tools");
        assert_eq!(slug().to_string(), "octo/tools");

        for bad in ["octo", "/tools", "octo/", "a/b/c", ""] {
            assert!(bad.parse::<RepoSlug>().is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout("60").unwrap(), Duration::from_secs(60));
        assert_eq!(parse_timeout("2.5").unwrap(), Duration::from_millis(2500));
        assert_eq!(parse_timeout("2m").unwrap(), Duration::from_secs(120));
        assert!(parse_timeout("0").is_err());
        assert!(parse_timeout("-3").is_err());
        assert!(parse_timeout("soon").is_err());
    }

    #[test]
    fn test_parse_timeout_out_of_range() {
        assert!(matches!(
            parse_timeout("1e30"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_layered_precedence() {
        let file = FileConfig {
            api_url: Some("https://ghe.example/api/v3/".to_string()),
            timeout: Some("10s".to_string()),
            token_var: None,
        };
        let config = ClientConfig::layered(
            slug(),
            Credential::new("t"),
            Some(&file),
            None,
            Some(Duration::from_secs(5)),
        )
        .unwrap();
        assert_eq!(config.api_url, "https://ghe.example/api/v3");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(
            config.releases_url(),
            "https://ghe.example/api/v3/repos/octo/tools/releases"
        );
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new(slug(), Credential::new("t"));
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }
}
