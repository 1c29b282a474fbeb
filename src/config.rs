//! Application configuration loaded from environment variables.
//!
//! The Strava access token is the only required value. It is read once at
//! startup and passed explicitly to the Strava client.

use std::env;

const DEFAULT_STRAVA_API_URL: &str = "https://www.strava.com/api/v3";
const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_PER_PAGE: u32 = 200;
const DEFAULT_CACHE_TTL_SECS: i64 = 60 * 60;
/// Longest accepted cache lifetime, one week.
const MAX_CACHE_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Secrets ---
    /// Bearer token for the Strava API
    pub strava_access_token: String,

    // --- Environment Variables (non-sensitive) ---
    /// Strava API base URL (overridable for local stubs)
    pub strava_api_url: String,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Page size used when listing activities
    pub per_page: u32,
    /// How long a fetched activity list stays fresh
    pub cache_ttl_secs: i64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let strava_access_token = lookup("STRAVA_ACCESS_TOKEN")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("STRAVA_ACCESS_TOKEN"))?;

        let per_page = parse_or(&lookup, "STRAVA_PER_PAGE", DEFAULT_PER_PAGE)?;
        if per_page == 0 {
            return Err(ConfigError::Invalid {
                name: "STRAVA_PER_PAGE",
                value: "0".to_string(),
            });
        }

        let cache_ttl_secs = parse_or(&lookup, "CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)?;
        if !(1..=MAX_CACHE_TTL_SECS).contains(&cache_ttl_secs) {
            return Err(ConfigError::Invalid {
                name: "CACHE_TTL_SECS",
                value: cache_ttl_secs.to_string(),
            });
        }

        Ok(Self {
            strava_access_token,
            strava_api_url: lookup("STRAVA_API_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_STRAVA_API_URL.to_string()),
            frontend_url: lookup("FRONTEND_URL")
                .unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_string()),
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            per_page,
            cache_ttl_secs,
        })
    }

    /// Config with fake credentials, for tests only.
    pub fn test_default() -> Self {
        Self {
            strava_access_token: "test_access_token".to_string(),
            strava_api_url: "http://127.0.0.1:9".to_string(),
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
            port: DEFAULT_PORT,
            per_page: DEFAULT_PER_PAGE,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            value: raw.clone(),
        }),
        None => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_config_defaults() {
        let config = load(&[("STRAVA_ACCESS_TOKEN", " abc123 \n")]).expect("Config should load");

        assert_eq!(config.strava_access_token, "abc123");
        assert_eq!(config.strava_api_url, "https://www.strava.com/api/v3");
        assert_eq!(config.port, 8080);
        assert_eq!(config.per_page, 200);
        assert_eq!(config.cache_ttl_secs, 3600);
    }

    #[test]
    fn test_missing_token_fails_fast() {
        let err = load(&[("PORT", "9000")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("STRAVA_ACCESS_TOKEN")));
    }

    #[test]
    fn test_blank_token_is_missing() {
        let err = load(&[("STRAVA_ACCESS_TOKEN", "   ")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("STRAVA_ACCESS_TOKEN")));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("STRAVA_ACCESS_TOKEN", "tok"),
            ("STRAVA_API_URL", "http://localhost:4000/api/v3/"),
            ("PORT", "3000"),
            ("STRAVA_PER_PAGE", "50"),
            ("CACHE_TTL_SECS", "60"),
        ])
        .unwrap();

        assert_eq!(config.strava_api_url, "http://localhost:4000/api/v3");
        assert_eq!(config.port, 3000);
        assert_eq!(config.per_page, 50);
        assert_eq!(config.cache_ttl_secs, 60);
    }

    #[test]
    fn test_invalid_numbers_rejected() {
        let err = load(&[("STRAVA_ACCESS_TOKEN", "tok"), ("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "PORT", .. }));

        let err = load(&[("STRAVA_ACCESS_TOKEN", "tok"), ("STRAVA_PER_PAGE", "0")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                name: "STRAVA_PER_PAGE",
                ..
            }
        ));
    }

    #[test]
    fn test_cache_ttl_out_of_range_rejected() {
        for raw in ["0", "-60", "604801", "9223372036854775807"] {
            let err = load(&[("STRAVA_ACCESS_TOKEN", "tok"), ("CACHE_TTL_SECS", raw)]).unwrap_err();
            assert!(
                matches!(
                    err,
                    ConfigError::Invalid {
                        name: "CACHE_TTL_SECS",
                        ..
                    }
                ),
                "{}",
                raw
            );
        }

        let config = load(&[("STRAVA_ACCESS_TOKEN", "tok"), ("CACHE_TTL_SECS", "604800")]).unwrap();
        assert_eq!(config.cache_ttl_secs, 604800);
    }
}
