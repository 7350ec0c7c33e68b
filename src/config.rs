use std::{env, time::Duration};

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    /// Scheme and host of the events API; the path shape is fixed.
    pub api_base: String,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: default_user_agent(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(defaults.port);
        let api_base = lookup("GITHUB_API_BASE")
            .map(|value| value.trim().trim_end_matches('/').to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or(defaults.api_base);
        let request_timeout = lookup("HTTP_TIMEOUT_SECS")
            .and_then(|value| value.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);
        let user_agent = lookup("ACTIVITY_USER_AGENT")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(defaults.user_agent);

        Self {
            port,
            api_base,
            request_timeout,
            user_agent,
        }
    }
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config.port, 8080);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert!(config.user_agent.starts_with("activity_tally/"));
    }

    #[test]
    fn reads_overrides_and_ignores_garbage() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("PORT", "9191"),
            ("GITHUB_API_BASE", "http://127.0.0.1:4000/"),
            ("HTTP_TIMEOUT_SECS", "zero"),
        ]));
        assert_eq!(config.port, 9191);
        assert_eq!(config.api_base, "http://127.0.0.1:4000");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }
}
