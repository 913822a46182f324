use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Transfer options for the curl fetcher (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HttpConfig {
    /// User-Agent header sent with every request (None = libcurl default).
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Connect timeout in seconds. None = wait indefinitely.
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    /// Whole-transfer timeout in seconds. None = wait indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Maximum redirects followed per request.
    #[serde(default = "default_max_redirections")]
    pub max_redirections: u32,
}

fn default_max_redirections() -> u32 {
    10
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: None,
            connect_timeout_secs: None,
            timeout_secs: None,
            max_redirections: default_max_redirections(),
        }
    }
}

/// Global configuration loaded from `~/.config/igmedia/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Origin of the content pages and public endpoints.
    pub origin: String,
    /// Origin of the private story feed endpoint.
    pub private_api_origin: String,
    /// Application id sent as `x-ig-app-id` on story endpoints.
    pub app_id: String,
    /// Query hash of the shortcode GraphQL query.
    pub graphql_query_hash: String,
    /// Width story image URLs are rewritten to when they carry a smaller resolution suffix.
    pub story_target_width: u32,
    /// Optional transfer options; if missing, built-in defaults are used.
    #[serde(default)]
    pub http: Option<HttpConfig>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            origin: "https://www.instagram.com".to_string(),
            private_api_origin: "https://i.instagram.com".to_string(),
            app_id: "936619743392459".to_string(),
            graphql_query_hash: "b3055c01b4b222b8a47dc12b090e4e64".to_string(),
            story_target_width: 1080,
            http: None,
        }
    }
}

impl ResolverConfig {
    /// Effective transfer options (the `[http]` section or defaults).
    pub fn http(&self) -> HttpConfig {
        self.http.clone().unwrap_or_default()
    }

    /// Same configuration with both origins pointed at `origin` (local mirrors, tests).
    pub fn with_origin(mut self, origin: &str) -> Self {
        let origin = origin.trim_end_matches('/').to_string();
        self.private_api_origin = origin.clone();
        self.origin = origin;
        self
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("igmedia")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ResolverConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ResolverConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from an explicit file.
pub fn load_from(path: &Path) -> Result<ResolverConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let cfg: ResolverConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
