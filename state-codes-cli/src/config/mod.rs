//! Configuration for state code generation
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! environment variables, then command-line overrides applied by the caller.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Logical key of the sheet holding state and district details
pub const STATE_DISTRICT_DETAILS: &str = "STATE_DISTRICT_DETAILS";

/// File names inside the pages directory
pub const STATE_CODES_FILE: &str = "state_code_details.json";
pub const INDIA_FILE: &str = "india.json";

/// Destination object names in the bucket
pub const STATE_CODES_BLOB: &str = "sg-dashboard/state_code_details.json";
pub const INDIA_BLOB: &str = "sg-dashboard/india.json";

pub const BUCKET_NAME_ENV: &str = "BUCKET_NAME";
pub const ACCESS_TOKEN_ENV: &str = "GCS_ACCESS_TOKEN";
pub const ENDPOINT_ENV: &str = "GCS_ENDPOINT";

const DEFAULT_ENDPOINT: &str = "https://storage.googleapis.com";

/// Complete runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the generated and sibling JSON files
    pub pages_dir: PathBuf,
    /// Target bucket; uploads fail individually when unset
    pub bucket_name: Option<String>,
    /// Logical sheet key -> literal sheet title
    pub sheets: HashMap<String, String>,
    /// Logical sheet key -> expected header labels
    pub headers: HashMap<String, Vec<String>>,
    pub storage: StorageConfig,
}

/// Object storage connection settings
#[derive(Debug, Clone, PartialEq)]
pub struct StorageConfig {
    /// Base URL of the JSON API
    pub endpoint: String,
    /// Base URL public object links are built from
    pub public_base_url: String,
    /// Bearer token sent with uploads, if any
    pub access_token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            public_base_url: DEFAULT_ENDPOINT.to_string(),
            access_token: None,
            timeout_secs: 60,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut sheets = HashMap::new();
        sheets.insert(
            STATE_DISTRICT_DETAILS.to_string(),
            "State District Details".to_string(),
        );

        let mut headers = HashMap::new();
        headers.insert(
            STATE_DISTRICT_DETAILS.to_string(),
            ["state name", "state code", "district name", "district code"]
                .iter()
                .map(|h| h.to_string())
                .collect(),
        );

        Self {
            pages_dir: PathBuf::from("pages"),
            bucket_name: None,
            sheets,
            headers,
            storage: StorageConfig::default(),
        }
    }
}

/// On-disk form; every field is optional and overrides the default
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    pages_dir: Option<PathBuf>,
    bucket_name: Option<String>,
    #[serde(default)]
    sheets: HashMap<String, String>,
    #[serde(default)]
    headers: HashMap<String, Vec<String>>,
    #[serde(default)]
    storage: StorageFile,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct StorageFile {
    endpoint: Option<String>,
    public_base_url: Option<String>,
    access_token: Option<String>,
    timeout_secs: Option<u64>,
}

impl Config {
    /// Load defaults, the TOML file and the process environment.
    ///
    /// An explicit `path` must exist. Without one the file in the user config
    /// directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Config::default();

        let file = match path {
            Some(p) => Some(p.to_path_buf()),
            None => default_config_path().filter(|p| p.exists()),
        };

        if let Some(file) = file {
            log::debug!("Loading config from {}", file.display());
            let content = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read config file: {}", file.display()))?;
            config
                .merge_toml(&content)
                .with_context(|| format!("Failed to parse config file: {}", file.display()))?;
        }

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Overlay values from TOML text
    pub fn merge_toml(&mut self, content: &str) -> Result<()> {
        let file: ConfigFile = toml::from_str(content)?;

        if let Some(dir) = file.pages_dir {
            self.pages_dir = dir;
        }
        if let Some(bucket) = file.bucket_name {
            self.bucket_name = Some(bucket);
        }
        self.sheets.extend(file.sheets);
        self.headers.extend(file.headers);

        let storage = file.storage;
        if let Some(endpoint) = storage.endpoint {
            self.storage.endpoint = endpoint;
        }
        if let Some(base) = storage.public_base_url {
            self.storage.public_base_url = base;
        }
        if let Some(token) = storage.access_token {
            self.storage.access_token = Some(token);
        }
        if let Some(secs) = storage.timeout_secs {
            self.storage.timeout_secs = secs;
        }

        Ok(())
    }

    /// Overlay environment variables read through `lookup`.
    ///
    /// Empty values are treated as unset.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(bucket) = get(BUCKET_NAME_ENV) {
            self.bucket_name = Some(bucket);
        }
        if let Some(token) = get(ACCESS_TOKEN_ENV) {
            self.storage.access_token = Some(token);
        }
        if let Some(endpoint) = get(ENDPOINT_ENV) {
            self.storage.endpoint = endpoint;
        }
    }

    /// Literal sheet title for a logical key
    pub fn sheet_title(&self, key: &str) -> Option<&str> {
        self.sheets.get(key).map(|s| s.as_str())
    }

    /// Expected header labels for a logical key (empty when unconfigured)
    pub fn expected_headers(&self, key: &str) -> &[String] {
        self.headers.get(key).map(|h| h.as_slice()).unwrap_or(&[])
    }

    pub fn output_path(&self) -> PathBuf {
        self.pages_dir.join(STATE_CODES_FILE)
    }

    pub fn india_path(&self) -> PathBuf {
        self.pages_dir.join(INDIA_FILE)
    }
}

/// `<config dir>/state-codes/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("state-codes").join("config.toml"))
}
