use std::env;
use std::time::Duration;

use url::Url;

use crate::errors::ConfigError;

const DEFAULT_NOTICE_TTL_SECS: u64 = 4;

/// Returns the value of the named environment variable if it exists.
pub fn get_variable(name: &str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::Missing(name.to_owned()))
}

/// Settings for talking to the profile service and reporting back to
/// the user.
#[derive(Clone, Debug)]
pub struct Config {
    /// Top-level URL of the profile service.
    pub api_base_url: Url,

    /// Bearer token sent with every request, if any.
    pub api_token: Option<String>,

    /// How long a notice stays visible before it expires.
    pub notice_ttl: Duration,
}

impl Config {
    pub fn new(api_base_url: Url, api_token: Option<String>, notice_ttl: Duration) -> Self {
        Self {
            api_base_url,
            api_token,
            notice_ttl,
        }
    }

    /// Reads `PROFILE_API_BASE_URL`, `PROFILE_API_TOKEN` and
    /// `PROFILE_NOTICE_TTL_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base = get_variable("PROFILE_API_BASE_URL")?;
        let api_base_url = Url::parse(&base).map_err(|e| ConfigError::Invalid {
            name: "PROFILE_API_BASE_URL".to_owned(),
            message: e.to_string(),
        })?;

        let api_token = get_variable("PROFILE_API_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());

        let notice_ttl = match get_variable("PROFILE_NOTICE_TTL_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|e| ConfigError::Invalid {
                    name: "PROFILE_NOTICE_TTL_SECS".to_owned(),
                    message: e.to_string(),
                })?,
            Err(_) => Duration::from_secs(DEFAULT_NOTICE_TTL_SECS),
        };

        Ok(Config::new(api_base_url, api_token, notice_ttl))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_variable_is_reported_by_name() {
        let result = get_variable("PROFILE_CORE_TEST_SURELY_UNSET");

        match result {
            Err(ConfigError::Missing(name)) => assert_eq!(name, "PROFILE_CORE_TEST_SURELY_UNSET"),
            other => panic!("expected missing variable, got {:?}", other),
        }
    }

    #[test]
    fn reads_settings_from_environment() {
        env::set_var("PROFILE_API_BASE_URL", "https://api.example.com/v1/");
        env::set_var("PROFILE_API_TOKEN", "secret");
        env::set_var("PROFILE_NOTICE_TTL_SECS", "7");

        let config = Config::from_env().expect("read config");

        assert_eq!(config.api_base_url.as_str(), "https://api.example.com/v1/");
        assert_eq!(config.api_token.as_deref(), Some("secret"));
        assert_eq!(config.notice_ttl, Duration::from_secs(7));
    }
}
