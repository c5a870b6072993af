use std::time::Duration;

use serde::{Deserialize, Deserializer};

use crate::error::Error;

/// Default range API endpoint. The 5-character prefix is appended as a path segment.
pub const DEFAULT_ENDPOINT: &str = "https://api.pwnedpasswords.com/range";

/// Default number of attempts per lookup, including the first one.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default fixed delay between two attempts.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Default timeout applied to each individual request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Default maximum accepted credential length in bytes.
pub const DEFAULT_MAX_CREDENTIAL_LEN: usize = 512;

/// Default User-Agent sent with each range query. The service rejects requests without one.
pub const DEFAULT_USER_AGENT: &str = concat!("breach-check/", env!("CARGO_PKG_VERSION"));

/// Environment variable overriding [`Config::endpoint`].
pub const ENDPOINT_ENV: &str = "BREACH_CHECK_ENDPOINT";
/// Environment variable overriding [`Config::max_attempts`].
pub const MAX_ATTEMPTS_ENV: &str = "BREACH_CHECK_MAX_ATTEMPTS";
/// Environment variable overriding [`Config::retry_delay`], in whole seconds.
pub const RETRY_DELAY_SECS_ENV: &str = "BREACH_CHECK_RETRY_DELAY_SECS";
/// Environment variable overriding [`Config::max_credential_len`].
pub const MAX_LENGTH_ENV: &str = "BREACH_CHECK_MAX_LENGTH";

/// How the target suffix is located in a range response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Find the suffix anywhere in the body, then read the count after the next `:`.
    #[default]
    Substring,
    /// Split the body into `SUFFIX:COUNT` lines and require an exact suffix match.
    Line,
}

/// Lookup settings. All fields have defaults, so a partial document deserializes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the range API, without the prefix.
    pub endpoint: String,
    /// Attempts per lookup before giving up. Must be at least 1.
    pub max_attempts: u32,
    /// Fixed wait between two consecutive attempts. Deserialized from seconds.
    #[serde(deserialize_with = "duration_secs")]
    pub retry_delay: Duration,
    /// Timeout for a single request. Deserialized from seconds.
    #[serde(deserialize_with = "duration_secs")]
    pub request_timeout: Duration,
    /// Credentials longer than this many bytes are rejected without a lookup.
    pub max_credential_len: usize,
    pub user_agent: String,
    pub match_mode: MatchMode,
    /// Ask the service to pad responses with zero-count entries.
    pub add_padding: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay: DEFAULT_RETRY_DELAY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_credential_len: DEFAULT_MAX_CREDENTIAL_LEN,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            match_mode: MatchMode::default(),
            add_padding: false,
        }
    }
}

impl Config {
    /// Returns the default configuration with any `BREACH_CHECK_*` environment
    /// variables applied on top, validated.
    pub fn from_env() -> Result<Self, Error> {
        let config = Self::default().with_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Applies any `BREACH_CHECK_*` environment variables on top of `self`.
    ///
    /// Only malformed numbers are rejected here. Call [`Config::validate`] once
    /// every other override has been applied.
    pub fn with_env(mut self) -> Result<Self, Error> {
        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            self.endpoint = endpoint;
        }
        if let Some(attempts) = parse_env(MAX_ATTEMPTS_ENV)? {
            self.max_attempts = attempts;
        }
        if let Some(secs) = parse_env(RETRY_DELAY_SECS_ENV)? {
            self.retry_delay = Duration::from_secs(secs);
        }
        if let Some(len) = parse_env(MAX_LENGTH_ENV)? {
            self.max_credential_len = len;
        }
        Ok(self)
    }

    /// Checks that the settings can drive a lookup.
    pub fn validate(&self) -> Result<(), Error> {
        if self.max_attempts == 0 {
            return Err(Error::InvalidConfig("max_attempts must be at least 1".to_string()));
        }
        if self.max_credential_len == 0 {
            return Err(Error::InvalidConfig("max_credential_len must be at least 1".to_string()));
        }
        let endpoint = self.endpoint.trim();
        if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
            return Err(Error::InvalidConfig(format!(
                "endpoint '{}' must be an http(s) URL",
                self.endpoint
            )));
        }
        Ok(())
    }
}

fn duration_secs<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    let secs = f64::deserialize(deserializer)?;
    Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Result<Option<T>, Error> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| Error::InvalidConfig(format!("{key}='{raw}' is not a valid number"))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    fn clear_env() {
        for key in [ENDPOINT_ENV, MAX_ATTEMPTS_ENV, RETRY_DELAY_SECS_ENV, MAX_LENGTH_ENV] {
            unsafe { std::env::remove_var(key) };
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.endpoint, "https://api.pwnedpasswords.com/range");
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.retry_delay, Duration::from_secs(2));
        assert_eq!(config.max_credential_len, 512);
        assert_eq!(config.match_mode, MatchMode::Substring);
        assert!(!config.add_padding);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        let config = Config { max_attempts: 0, ..Config::default() };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        let config = Config { max_credential_len: 0, ..Config::default() };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        let config = Config { endpoint: "ftp://example.com".to_string(), ..Config::default() };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_deserialize_partial_document() {
        let config: Config =
            serde_json::from_str(r#"{"max_attempts": 5, "match_mode": "line"}"#).unwrap();
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.match_mode, MatchMode::Line);
        assert_eq!(config.retry_delay, DEFAULT_RETRY_DELAY);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_deserialize_durations_as_seconds() {
        let config: Config =
            serde_json::from_str(r#"{"retry_delay": 2, "request_timeout": 0.5}"#).unwrap();
        assert_eq!(config.retry_delay, Duration::from_secs(2));
        assert_eq!(config.request_timeout, Duration::from_millis(500));

        assert!(serde_json::from_str::<Config>(r#"{"retry_delay": -1}"#).is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        unsafe {
            std::env::set_var(ENDPOINT_ENV, "http://localhost:9000/range");
            std::env::set_var(MAX_ATTEMPTS_ENV, "5");
            std::env::set_var(RETRY_DELAY_SECS_ENV, "0");
            std::env::set_var(MAX_LENGTH_ENV, "64");
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.endpoint, "http://localhost:9000/range");
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.retry_delay, Duration::ZERO);
        assert_eq!(config.max_credential_len, 64);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_garbage() {
        clear_env();
        unsafe { std::env::set_var(MAX_ATTEMPTS_ENV, "three") };
        assert!(matches!(Config::from_env(), Err(Error::InvalidConfig(_))));

        unsafe { std::env::set_var(MAX_ATTEMPTS_ENV, "0") };
        assert!(matches!(Config::from_env(), Err(Error::InvalidConfig(_))));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_with_env_leaves_validation_to_caller() {
        clear_env();
        unsafe { std::env::set_var(MAX_ATTEMPTS_ENV, "0") };

        let mut config = Config::default().with_env().unwrap();
        assert_eq!(config.max_attempts, 0);
        assert!(config.validate().is_err());

        config.max_attempts = 3;
        assert!(config.validate().is_ok());

        clear_env();
    }
}
