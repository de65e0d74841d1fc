// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Server configuration loaded from environment variables.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable holding the Calendarific credential.
pub const API_KEY_VAR: &str = "CALENDARIFIC_API_KEY";

/// Default Calendarific holidays endpoint.
pub const DEFAULT_API_URL: &str = "https://calendarific.com/api/v2/holidays";

/// Where the provider credential comes from.
///
/// The environment variable is resolved on every request, so a missing key
/// surfaces as a per-request error rather than a startup failure.
#[derive(Clone)]
pub enum ApiKeySource {
    /// Read the named environment variable at request time.
    Env(String),
    /// A key fixed at construction time.
    #[cfg(test)]
    Fixed(Option<String>),
}

impl ApiKeySource {
    /// Resolve the current credential. Empty values count as missing.
    pub fn resolve(&self) -> Option<String> {
        let key = match self {
            ApiKeySource::Env(var) => std::env::var(var).ok(),
            #[cfg(test)]
            ApiKeySource::Fixed(key) => key.clone(),
        };
        key.filter(|key| !key.is_empty())
    }
}

impl std::fmt::Debug for ApiKeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiKeySource::Env(var) => f.debug_tuple("Env").field(var).finish(),
            #[cfg(test)]
            ApiKeySource::Fixed(Some(_)) => f.write_str("Fixed(<redacted>)"),
            #[cfg(test)]
            ApiKeySource::Fixed(None) => f.write_str("Fixed(None)"),
        }
    }
}

/// Load variables from a `.env` file into the process environment.
///
/// With no `path`, `.env` is searched for in the working directory and its
/// parents. Variables already set in the environment are not overridden.
/// Returns the file that was loaded, if any.
pub fn load_dotenv(path: Option<&Path>) -> Option<PathBuf> {
    match path {
        Some(path) => dotenvy::from_path(path).ok().map(|_| path.to_path_buf()),
        None => dotenvy::dotenv().ok(),
    }
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port to listen on.
    pub port: u16,
    /// Provider credential source.
    pub api_key: ApiKeySource,
    /// Calendarific holidays endpoint.
    pub api_url: String,
    /// Timeout for a single upstream call in seconds.
    pub upstream_timeout_secs: u64,
    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Maximum number of cached provider responses.
    pub cache_capacity: usize,
    /// Allowed CORS origins (comma-separated).
    pub cors_origins: Vec<String>,
    /// Emit JSON log lines instead of pretty output.
    pub log_json: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        fn parsed<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
            value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
        }

        Self {
            port: parsed(lookup("PORT"), 8000),
            api_key: ApiKeySource::Env(API_KEY_VAR.to_string()),
            api_url: lookup("CALENDARIFIC_API_URL")
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_API_URL.into()),
            upstream_timeout_secs: parsed(lookup("UPSTREAM_TIMEOUT_SECS"), 10),
            request_timeout_secs: parsed(lookup("REQUEST_TIMEOUT_SECS"), 30),
            cache_capacity: parsed(lookup("CACHE_CAPACITY"), 10),
            cors_origins: lookup("CORS_ORIGINS")
                // Default: the Vite and CRA dev servers
                .unwrap_or_else(|| "http://localhost:5173,http://localhost:3000".into())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            log_json: lookup("LOG_FORMAT").is_some_and(|f| f.eq_ignore_ascii_case("json")),
        }
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.cache_capacity, 10);
        assert_eq!(config.upstream_timeout(), Duration::from_secs(10));
        assert_eq!(
            config.cors_origins,
            vec!["http://localhost:5173", "http://localhost:3000"]
        );
        assert!(!config.log_json);
        assert!(matches!(config.api_key, ApiKeySource::Env(ref var) if var == API_KEY_VAR));
    }

    #[test]
    fn test_overrides_and_bad_values() {
        let config = config_with(&[
            ("PORT", "9090"),
            ("CACHE_CAPACITY", "not-a-number"),
            ("CORS_ORIGINS", " https://a.example , ,https://b.example"),
            ("LOG_FORMAT", "JSON"),
            ("CALENDARIFIC_API_URL", "http://127.0.0.1:1/holidays"),
        ]);
        assert_eq!(config.port, 9090);
        assert_eq!(config.cache_capacity, 10);
        assert_eq!(config.cors_origins, vec!["https://a.example", "https://b.example"]);
        assert!(config.log_json);
        assert_eq!(config.api_url, "http://127.0.0.1:1/holidays");
    }

    #[test]
    fn test_api_key_source() {
        assert_eq!(ApiKeySource::Fixed(None).resolve(), None);
        assert_eq!(ApiKeySource::Fixed(Some(String::new())).resolve(), None);
        assert_eq!(
            ApiKeySource::Fixed(Some("secret".into())).resolve().as_deref(),
            Some("secret")
        );
        assert_eq!(
            ApiKeySource::Env("HOLIDAYS_SERVER_TEST_UNSET_VARIABLE".into()).resolve(),
            None
        );

        let debug = format!("{:?}", ApiKeySource::Fixed(Some("secret".into())));
        assert!(!debug.contains("secret"));
    }

    #[test]
    fn test_dotenv_supplies_api_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(
            &path,
            "HOLIDAYS_SERVER_TEST_DOTENV_KEY=from-file\nHOLIDAYS_SERVER_TEST_DOTENV_PRESET=from-file\n",
        )
        .unwrap();
        std::env::set_var("HOLIDAYS_SERVER_TEST_DOTENV_PRESET", "from-process");

        assert_eq!(load_dotenv(Some(&path)), Some(path.clone()));

        let key = ApiKeySource::Env("HOLIDAYS_SERVER_TEST_DOTENV_KEY".into());
        assert_eq!(key.resolve().as_deref(), Some("from-file"));
        // The process environment wins over the file
        let preset = ApiKeySource::Env("HOLIDAYS_SERVER_TEST_DOTENV_PRESET".into());
        assert_eq!(preset.resolve().as_deref(), Some("from-process"));
    }

    #[test]
    fn test_missing_dotenv_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_dotenv(Some(&dir.path().join(".env"))), None);
    }
}
