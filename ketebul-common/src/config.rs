//! Configuration loading and config file resolution
//!
//! Bootstrap configuration only: bind address, content store connection
//! parameters, image resolution settings, logging, contact details and the
//! locally maintained gallery, team and event lists.
//! A missing or unreadable file is never fatal; the site starts on defaults.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::image::{DEFAULT_CDN_BASE, FALLBACK_IMAGE_URL};
use crate::{Error, Result};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "KETEBUL_CONFIG";
/// Environment overrides for the content store connection
pub const PROJECT_ID_ENV_VAR: &str = "KETEBUL_CMS_PROJECT_ID";
pub const DATASET_ENV_VAR: &str = "KETEBUL_CMS_DATASET";
pub const REST_BASE_URL_ENV_VAR: &str = "KETEBUL_REST_BASE_URL";

/// Complete site configuration as read from TOML
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SiteConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub content_store: ContentStoreConfig,

    #[serde(default)]
    pub images: ImageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub contact: ContactConfig,

    /// Static gallery images, in display order
    #[serde(default)]
    pub gallery: Vec<GalleryEntry>,

    /// Team members, in display order
    #[serde(default)]
    pub team: Vec<TeamEntry>,

    /// Events, in display order
    #[serde(default)]
    pub events: Vec<EventEntry>,
}

/// HTTP listener settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory served for local image paths and other static files
    #[serde(default)]
    pub public_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_dir: None,
        }
    }
}

/// Which kind of content store backs the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Hosted CMS query API
    #[default]
    Cms,
    /// REST collection API
    Rest,
}

/// Content store connection parameters
#[derive(Debug, Clone, Deserialize)]
pub struct ContentStoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    /// CMS project identifier
    #[serde(default)]
    pub project_id: String,

    #[serde(default = "default_dataset")]
    pub dataset: String,

    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Query the CDN edge instead of the live API
    #[serde(default = "default_use_cdn")]
    pub use_cdn: bool,

    /// Override for the CMS API host (derived from project_id when absent)
    #[serde(default)]
    pub api_base: Option<String>,

    /// Base URL of the REST API
    #[serde(default = "default_rest_base_url")]
    pub base_url: String,

    /// Optional request timeout; no timeout is applied when unset
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for ContentStoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            project_id: String::new(),
            dataset: default_dataset(),
            api_version: default_api_version(),
            use_cdn: default_use_cdn(),
            api_base: None,
            base_url: default_rest_base_url(),
            request_timeout_secs: None,
        }
    }
}

impl ContentStoreConfig {
    /// Host the CMS query endpoint lives on
    pub fn cms_api_base(&self) -> String {
        if let Some(base) = &self.api_base {
            return base.trim_end_matches('/').to_string();
        }
        let host = if self.use_cdn { "apicdn" } else { "api" };
        format!("https://{}.{}.sanity.io", self.project_id, host)
    }
}

/// Image resolution settings
#[derive(Debug, Clone, Deserialize)]
pub struct ImageConfig {
    /// Prefix for local asset paths ("" serves them from the site root)
    #[serde(default)]
    pub static_root: String,

    #[serde(default = "default_cdn_base")]
    pub cdn_base: String,

    #[serde(default = "default_fallback_url")]
    pub fallback_url: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            static_root: String::new(),
            cdn_base: default_cdn_base(),
            fallback_url: default_fallback_url(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// One static gallery image
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct GalleryEntry {
    pub src: String,
    pub alt: String,
    #[serde(default)]
    pub category: Option<String>,
}

/// One team member
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TeamEntry {
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

/// One event; `date` is written as a quoted `YYYY-MM-DD` string
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct EventEntry {
    pub title: String,
    pub date: NaiveDate,
    pub location: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Details shown on the contact page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactConfig {
    #[serde(default = "default_contact_email")]
    pub email: String,

    #[serde(default = "default_contact_phone")]
    pub phone: String,

    #[serde(default = "default_contact_address")]
    pub address: String,

    /// Embedded map URL; no map is shown when unset
    #[serde(default)]
    pub map_embed_url: Option<String>,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            email: default_contact_email(),
            phone: default_contact_phone(),
            address: default_contact_address(),
            map_embed_url: None,
        }
    }
}

fn default_contact_email() -> String {
    "info@ketebulmusic.org".to_string()
}

fn default_contact_phone() -> String {
    "(+254) 20 675 1011".to_string()
}

fn default_contact_address() -> String {
    "Ketebul Music Studios, GoDown Arts Centre, Nairobi, Kenya".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_dataset() -> String {
    "production".to_string()
}

fn default_api_version() -> String {
    "2024-01-01".to_string()
}

fn default_use_cdn() -> bool {
    true
}

fn default_rest_base_url() -> String {
    "http://127.0.0.1:8000/api".to_string()
}

fn default_cdn_base() -> String {
    DEFAULT_CDN_BASE.to_string()
}

fn default_fallback_url() -> String {
    FALLBACK_IMAGE_URL.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl SiteConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid TOML: {}", e)))
    }

    /// Read and parse a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Apply environment overrides for the connection parameters
    pub fn apply_env_overrides(&mut self) {
        if let Ok(project_id) = std::env::var(PROJECT_ID_ENV_VAR) {
            self.content_store.project_id = project_id;
        }
        if let Ok(dataset) = std::env::var(DATASET_ENV_VAR) {
            self.content_store.dataset = dataset;
        }
        if let Ok(base_url) = std::env::var(REST_BASE_URL_ENV_VAR) {
            self.content_store.base_url = base_url;
        }
    }
}

/// Config file resolution, in priority order:
/// 1. Command-line argument (highest priority)
/// 2. `KETEBUL_CONFIG` environment variable
/// 3. User config file `<config_dir>/ketebul/config.toml`
/// 4. Compiled defaults (no file)
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    cli_path: Option<PathBuf>,
}

impl ConfigResolver {
    pub fn new(cli_path: Option<PathBuf>) -> Self {
        Self { cli_path }
    }

    /// Locate the config file to use, if any
    pub fn resolve_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.cli_path {
            return Some(path.clone());
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.is_empty() {
                return Some(PathBuf::from(path));
            }
        }

        dirs::config_dir()
            .map(|d| d.join("ketebul").join("config.toml"))
            .filter(|p| p.exists())
    }

    /// Load configuration with graceful degradation
    ///
    /// A missing file logs a warning and falls back to defaults. A file that
    /// exists but does not parse is an error.
    pub fn load(&self) -> Result<SiteConfig> {
        let mut config = match self.resolve_path() {
            Some(path) if path.exists() => {
                info!("Loading configuration from {}", path.display());
                SiteConfig::from_file(&path)?
            }
            Some(path) => {
                warn!(
                    "Config file {} not found, using compiled defaults",
                    path.display()
                );
                SiteConfig::default()
            }
            None => {
                info!("No config file found, using compiled defaults");
                SiteConfig::default()
            }
        };

        config.apply_env_overrides();
        Ok(config)
    }
}
