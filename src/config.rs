//! Runtime configuration
//!
//! Values come from the environment and may be overridden by command-line
//! flags in the binary.

use std::time::Duration;
use thiserror::Error;

pub const ENDPOINT_VAR: &str = "MYMEMORY_ENDPOINT";
pub const EMAIL_VAR: &str = "MYMEMORY_EMAIL";
pub const TIMEOUT_VAR: &str = "TRANSLATOR_TIMEOUT_SECS";
pub const SPEECH_PROGRAM_VAR: &str = "TRANSLATOR_SPEECH_PROGRAM";

pub const DEFAULT_ENDPOINT: &str = "https://api.mymemory.translated.net/get";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SPEECH_PROGRAM: &str = "espeak-ng";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} has invalid value {value:?}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// MyMemory `get` endpoint
    pub endpoint: String,
    /// Contact address sent as `de`; MyMemory grants a larger daily quota with it
    pub email: Option<String>,
    /// Client-side timeout for a single translation request
    pub timeout: Duration,
    /// External text-to-speech program, invoked as `<program> -v <lang> <text>`
    pub speech_program: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            email: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            speech_program: DEFAULT_SPEECH_PROGRAM.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from process environment variables
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(endpoint) = get(ENDPOINT_VAR) {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(ConfigError::InvalidValue {
                    key: ENDPOINT_VAR,
                    value: endpoint,
                    reason: "must be an http(s) URL".to_string(),
                });
            }
            config.endpoint = endpoint;
        }

        config.email = get(EMAIL_VAR);

        if let Some(raw) = get(TIMEOUT_VAR) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::InvalidValue {
                    key: TIMEOUT_VAR,
                    value: raw.clone(),
                    reason: e.to_string(),
                })?;
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    key: TIMEOUT_VAR,
                    value: raw,
                    reason: "must be greater than zero".to_string(),
                });
            }
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(program) = get(SPEECH_PROGRAM_VAR) {
            config.speech_program = program;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.email, None);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            (ENDPOINT_VAR, "http://localhost:8080/get"),
            (EMAIL_VAR, "me@example.org"),
            (TIMEOUT_VAR, "5"),
            (SPEECH_PROGRAM_VAR, "say"),
        ]))
        .unwrap();
        assert_eq!(config.endpoint, "http://localhost:8080/get");
        assert_eq!(config.email.as_deref(), Some("me@example.org"));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.speech_program, "say");
    }

    #[test]
    fn test_blank_values_are_unset() {
        let config = Config::from_lookup(lookup(&[(EMAIL_VAR, "  "), (TIMEOUT_VAR, "")])).unwrap();
        assert_eq!(config.email, None);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_invalid_timeout() {
        let err = Config::from_lookup(lookup(&[(TIMEOUT_VAR, "soon")])).unwrap_err();
        let ConfigError::InvalidValue { key, .. } = err;
        assert_eq!(key, TIMEOUT_VAR);

        assert!(Config::from_lookup(lookup(&[(TIMEOUT_VAR, "0")])).is_err());
    }

    #[test]
    fn test_invalid_endpoint() {
        let err = Config::from_lookup(lookup(&[(ENDPOINT_VAR, "ftp://x")])).unwrap_err();
        assert!(err.to_string().contains("http(s)"));
    }
}
