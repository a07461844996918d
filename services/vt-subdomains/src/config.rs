//! Configuration types and loading
//!
//! Config precedence: env vars > config file > defaults.
//! API keys are read from VT_API_KEY, VT_API_KEY2 and VT_API_KEY3 only,
//! never from the TOML file, so secrets stay out of checked-in config.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use vt_client::{DEFAULT_BASE_URL, DEFAULT_PAGE_LIMIT, FetcherConfig};

/// Env vars holding API keys, in pool order
pub const API_KEY_VARS: [&str; 3] = ["VT_API_KEY", "VT_API_KEY2", "VT_API_KEY3"];

/// Config file looked up in the working directory when CONFIG_PATH is unset
pub const DEFAULT_CONFIG_PATH: &str = "vt-subdomains.toml";

/// Root configuration
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Upstream API settings
#[derive(Debug, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
    /// Absent means requests wait indefinitely
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Output behavior
#[derive(Debug, Default, Deserialize)]
pub struct OutputConfig {
    /// Print whatever was collected before a fatal error, then exit non-zero
    #[serde(default)]
    pub flush_partial_on_error: bool,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_page_limit() -> u32 {
    DEFAULT_PAGE_LIMIT
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_limit: default_page_limit(),
            timeout_secs: None,
        }
    }
}

impl Config {
    /// Load and validate configuration from a TOML file.
    pub fn load(path: &Path) -> common::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Find the config file: CONFIG_PATH if set, else `DEFAULT_CONFIG_PATH`.
    pub fn discover() -> common::Result<Self> {
        let env_path = std::env::var("CONFIG_PATH").ok();
        Self::discover_from(env_path.as_deref(), Path::new(DEFAULT_CONFIG_PATH))
    }

    /// An explicit path must exist. A missing default file yields defaults.
    pub fn discover_from(explicit: Option<&str>, default_path: &Path) -> common::Result<Self> {
        match explicit.filter(|p| !p.is_empty()) {
            Some(path) => Self::load(Path::new(path)),
            None if default_path.exists() => Self::load(default_path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> common::Result<()> {
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://")
        {
            return Err(common::Error::Config(format!(
                "base_url must start with http:// or https://, got: {}",
                self.api.base_url
            )));
        }

        if self.api.page_limit == 0 {
            return Err(common::Error::Config(
                "page_limit must be greater than 0".into(),
            ));
        }

        if self.api.timeout_secs == Some(0) {
            return Err(common::Error::Config(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    pub fn fetcher_config(&self) -> FetcherConfig {
        FetcherConfig {
            base_url: self.api.base_url.clone(),
            page_limit: self.api.page_limit,
            timeout: self.api.timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Collect API keys in `API_KEY_VARS` order, skipping unset or empty values.
pub fn api_keys_from<F>(lookup: F) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    API_KEY_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .filter(|key| !key.is_empty())
        .collect()
}

pub fn api_keys_from_env() -> Vec<String> {
    api_keys_from(|name| std::env::var(name).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Mutex to serialize tests that mutate environment variables, preventing
    /// data races when tests run in parallel.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// SAFETY: Callers must hold ENV_MUTEX to prevent concurrent env mutation.
    unsafe fn set_env(key: &str, val: &str) {
        unsafe { std::env::set_var(key, val) };
    }

    unsafe fn remove_env(key: &str) {
        unsafe { std::env::remove_var(key) };
    }

    fn full_toml() -> &'static str {
        r#"
[api]
base_url = "http://127.0.0.1:8089"
page_limit = 10
timeout_secs = 15

[output]
flush_partial_on_error = true
"#
    }

    fn write_config(dir: &tempfile::TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join("vt-subdomains.toml");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn load_full_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, full_toml());

        let config = Config::load(&path).unwrap();
        assert_eq!(config.api.base_url, "http://127.0.0.1:8089");
        assert_eq!(config.api.page_limit, 10);
        assert_eq!(config.api.timeout_secs, Some(15));
        assert!(config.output.flush_partial_on_error);

        let fetcher = config.fetcher_config();
        assert_eq!(fetcher.timeout, Some(Duration::from_secs(15)));
        assert_eq!(fetcher.page_limit, 10);
    }

    #[test]
    fn empty_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "");

        let config = Config::load(&path).unwrap();
        assert_eq!(config.api.base_url, "https://www.virustotal.com");
        assert_eq!(config.api.page_limit, 40);
        assert_eq!(config.api.timeout_secs, None);
        assert!(!config.output.flush_partial_on_error);
        assert_eq!(config.fetcher_config().timeout, None);
    }

    #[test]
    fn load_missing_file() {
        let result = Config::load(Path::new("/nonexistent/path/vt-subdomains.toml"));
        assert!(matches!(result, Err(common::Error::Io(_))));
    }

    #[test]
    fn load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "not valid {{{{ toml");

        let result = Config::load(&path);
        assert!(matches!(result, Err(common::Error::Toml(_))));
    }

    #[test]
    fn rejects_non_http_base_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[api]\nbase_url = \"ftp://www.virustotal.com\"\n");

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("base_url"), "got: {err}");
    }

    #[test]
    fn rejects_zero_page_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[api]\npage_limit = 0\n");

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("page_limit"), "got: {err}");
    }

    #[test]
    fn rejects_zero_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[api]\ntimeout_secs = 0\n");

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("timeout_secs"), "got: {err}");
    }

    #[test]
    fn discover_without_any_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config =
            Config::discover_from(None, &dir.path().join("vt-subdomains.toml")).unwrap();
        assert_eq!(config.api.page_limit, 40);
    }

    #[test]
    fn discover_reads_default_file_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, full_toml());

        let config = Config::discover_from(None, &path).unwrap();
        assert_eq!(config.api.page_limit, 10);
    }

    #[test]
    fn discover_explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");

        let result = Config::discover_from(
            Some(missing.to_str().unwrap()),
            &dir.path().join("vt-subdomains.toml"),
        );
        assert!(result.is_err());
    }

    #[test]
    fn discover_explicit_path_wins_over_default() {
        let dir = tempfile::tempdir().unwrap();
        let default_path = write_config(&dir, "[api]\npage_limit = 5\n");
        let explicit = dir.path().join("explicit.toml");
        std::fs::write(&explicit, "[api]\npage_limit = 7\n").unwrap();

        let config =
            Config::discover_from(Some(explicit.to_str().unwrap()), &default_path).unwrap();
        assert_eq!(config.api.page_limit, 7);
    }

    #[test]
    fn api_keys_keep_fixed_order_and_skip_blanks() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("VT_API_KEY3", "third"),
            ("VT_API_KEY", "first"),
            ("VT_API_KEY2", ""),
        ]);
        let keys = api_keys_from(|name| vars.get(name).map(|v| v.to_string()));
        assert_eq!(keys, vec!["first", "third"]);
    }

    #[test]
    fn api_keys_empty_when_nothing_set() {
        let keys = api_keys_from(|_| None);
        assert!(keys.is_empty());
    }

    #[test]
    fn api_keys_from_env_reads_all_three_vars() {
        let _lock = ENV_MUTEX.lock().unwrap();
        unsafe {
            set_env("VT_API_KEY", "env-one");
            set_env("VT_API_KEY2", "env-two");
            set_env("VT_API_KEY3", "env-three");
        }

        let keys = api_keys_from_env();
        assert_eq!(keys, vec!["env-one", "env-two", "env-three"]);

        unsafe {
            remove_env("VT_API_KEY");
            remove_env("VT_API_KEY2");
            remove_env("VT_API_KEY3");
        }
        assert!(api_keys_from_env().is_empty());
    }
}
