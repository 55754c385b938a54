use std::fmt;

use bevy::prelude::*;

// ---------------------------------------------------------------------------
// Shape generation
// ---------------------------------------------------------------------------

pub const SHAPE_CENTER: [f64; 2] = [200.0, 200.0];
pub const SHAPE_MIN_VERTICES: usize = 4;
pub const SHAPE_MAX_VERTICES: usize = 7;
pub const SHAPE_RADIUS_MIN: f64 = 100.0;
pub const SHAPE_RADIUS_MAX: f64 = 150.0;
pub const SHAPE_JITTER_MIN: f64 = 0.7;
pub const SHAPE_JITTER_MAX: f64 = 1.3;

// ---------------------------------------------------------------------------
// Working set
// ---------------------------------------------------------------------------

/// Records loaded at startup when `PARCEL_RECENT_LIMIT` is unset.
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// Seconds a user-facing notice stays on screen.
pub const NOTICE_SECONDS: f32 = 4.0;

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

pub const ENV_SERVICE_URL: &str = "SUPABASE_URL";
pub const ENV_ANON_KEY: &str = "SUPABASE_ANON_KEY";
pub const ENV_MAPS_KEY: &str = "GOOGLE_MAPS_API_KEY";
pub const ENV_RECENT_LIMIT: &str = "PARCEL_RECENT_LIMIT";

/// Connection settings for the hosted record store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Base URL of the service, without a trailing slash.
    pub service_url: String,
    /// Anonymous access key sent with every request.
    pub anon_key: String,
}

/// Everything the application reads from its environment at startup.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `None` when either required store value is missing.
    pub store: Option<StoreConfig>,
    /// Only needed by the map overlay.
    pub maps_api_key: Option<String>,
    pub recent_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store: None,
            maps_api_key: None,
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

/// Problems found while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable was unset or blank.
    Missing(&'static str),
    /// A variable was set but could not be parsed.
    Invalid { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(name) => write!(f, "missing required setting {name}"),
            ConfigError::Invalid { name, value } => {
                write!(f, "invalid value for {name}: {value:?}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl AppConfig {
    /// Read settings from the process environment, falling back to values
    /// baked in at build time. The browser build only has the latter.
    pub fn from_env() -> (Self, Vec<ConfigError>) {
        Self::from_lookup(|name| {
            std::env::var(name)
                .ok()
                .or_else(|| compiled_in(name).map(str::to_string))
        })
    }

    /// Build a config from an arbitrary key lookup.
    ///
    /// Problems are returned alongside a usable config rather than instead
    /// of one: a missing store URL leaves `store` empty, a bad limit falls
    /// back to the default.
    pub fn from_lookup<F>(lookup: F) -> (Self, Vec<ConfigError>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut errors = Vec::new();

        let url = get(ENV_SERVICE_URL);
        let key = get(ENV_ANON_KEY);
        if url.is_none() {
            errors.push(ConfigError::Missing(ENV_SERVICE_URL));
        }
        if key.is_none() {
            errors.push(ConfigError::Missing(ENV_ANON_KEY));
        }
        let store = match (url, key) {
            (Some(url), Some(anon_key)) => Some(StoreConfig {
                service_url: url.trim_end_matches('/').to_string(),
                anon_key,
            }),
            _ => None,
        };

        let recent_limit = match get(ENV_RECENT_LIMIT) {
            None => DEFAULT_RECENT_LIMIT,
            Some(raw) => match raw.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    errors.push(ConfigError::Invalid {
                        name: ENV_RECENT_LIMIT,
                        value: raw,
                    });
                    DEFAULT_RECENT_LIMIT
                }
            },
        };

        let config = Self {
            store,
            maps_api_key: get(ENV_MAPS_KEY),
            recent_limit,
        };
        (config, errors)
    }
}

fn compiled_in(name: &str) -> Option<&'static str> {
    match name {
        ENV_SERVICE_URL => option_env!("SUPABASE_URL"),
        ENV_ANON_KEY => option_env!("SUPABASE_ANON_KEY"),
        ENV_MAPS_KEY => option_env!("GOOGLE_MAPS_API_KEY"),
        ENV_RECENT_LIMIT => option_env!("PARCEL_RECENT_LIMIT"),
        _ => None,
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
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_complete_config() {
        let (config, errors) = AppConfig::from_lookup(lookup(&[
            (ENV_SERVICE_URL, "https://abc.supabase.co/"),
            (ENV_ANON_KEY, "anon"),
            (ENV_MAPS_KEY, "maps"),
            (ENV_RECENT_LIMIT, "25"),
        ]));
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        let store = config.store.expect("store config");
        assert_eq!(store.service_url, "https://abc.supabase.co");
        assert_eq!(store.anon_key, "anon");
        assert_eq!(config.maps_api_key.as_deref(), Some("maps"));
        assert_eq!(config.recent_limit, 25);
    }

    #[test]
    fn test_missing_key_leaves_store_unset() {
        let (config, errors) =
            AppConfig::from_lookup(lookup(&[(ENV_SERVICE_URL, "https://abc.supabase.co")]));
        assert!(config.store.is_none());
        assert_eq!(errors, vec![ConfigError::Missing(ENV_ANON_KEY)]);
    }

    #[test]
    fn test_blank_values_count_as_missing() {
        let (config, errors) =
            AppConfig::from_lookup(lookup(&[(ENV_SERVICE_URL, "  "), (ENV_ANON_KEY, "")]));
        assert!(config.store.is_none());
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_maps_key_is_optional() {
        let (config, errors) = AppConfig::from_lookup(lookup(&[
            (ENV_SERVICE_URL, "https://x"),
            (ENV_ANON_KEY, "k"),
        ]));
        assert!(errors.is_empty());
        assert!(config.maps_api_key.is_none());
        assert_eq!(config.recent_limit, DEFAULT_RECENT_LIMIT);
    }

    #[test]
    fn test_bad_limit_falls_back() {
        let (config, errors) = AppConfig::from_lookup(lookup(&[
            (ENV_SERVICE_URL, "https://x"),
            (ENV_ANON_KEY, "k"),
            (ENV_RECENT_LIMIT, "zero"),
        ]));
        assert_eq!(config.recent_limit, DEFAULT_RECENT_LIMIT);
        assert!(matches!(errors[0], ConfigError::Invalid { .. }));
        assert!(format!("{}", errors[0]).contains(ENV_RECENT_LIMIT));
    }
}
