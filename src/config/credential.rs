//! Bearer credential resolution.

use regex::Regex;
use std::fmt;

use crate::error::ConfigError;

/// API token attached to every request; never persisted or logged
#[derive(Clone)]
pub struct Credential {
    token: String,
}

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Resolve from a literal token or an environment variable name
    ///
    /// Priority:
    /// 1. Literal token
    /// 2. Environment variable named by `token_var`
    pub fn resolve(token: Option<String>, token_var: Option<&str>) -> Result<Self, ConfigError> {
        Self::resolve_with(token, token_var, |name| std::env::var(name).ok())
    }

    /// Same as [`Credential::resolve`] with an injectable variable lookup
    pub fn resolve_with(
        token: Option<String>,
        token_var: Option<&str>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let token = match (token, token_var) {
            (Some(token), _) => token,
            (None, Some(name)) => lookup(name).ok_or_else(|| ConfigError::MissingEnvVar {
                name: name.to_string(),
            })?,
            (None, None) => return Err(ConfigError::NoToken),
        };
        if token.is_empty() {
            return Err(ConfigError::EmptyToken);
        }
        Ok(Self { token })
    }

    /// Value for the `Authorization` header
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Check that `name` can be an environment variable name
pub fn validate_env_var_name(name: &str) -> Result<String, ConfigError> {
    let pattern = Regex::new(r"^[^0-9=][^=]*$").map_err(|e| ConfigError::ParseError {
        message: e.to_string(),
    })?;
    if pattern.is_match(name) {
        Ok(name.to_string())
    } else {
        Err(ConfigError::InvalidValue {
            field: "auth token variable".to_string(),
            value: format!("\"{}\" is not a valid environment variable name", name),
        })
    }
}
