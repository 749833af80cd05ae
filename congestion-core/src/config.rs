use crate::error::Error;
use chrono_tz::Tz;
use figment::{Figment, providers::{Env, Format, Yaml}};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Where the congestion dataset lives and how to fetch it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    #[serde(default = "default_dataset_url")]
    pub url: String,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Append-only finding log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_path")]
    pub path: PathBuf,
    /// IANA zone used for entry timestamps.
    #[serde(default = "default_log_timezone")]
    pub timezone: String,
}

/// Report server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_addr")]
    pub addr: String,
}

// ── Defaults ──────────────────────────────────────────────────

fn default_dataset_url() -> String { "https://datos.vigo.org/data/trafico/treal_congestion.json".into() }
fn default_connect_timeout() -> u64 { 10 }
fn default_timeout() -> u64 { 20 }
fn default_user_agent() -> String { concat!("congestion/", env!("CARGO_PKG_VERSION")).into() }
fn default_log_path() -> PathBuf { PathBuf::from("log.txt") }
fn default_log_timezone() -> String { "Europe/Madrid".into() }
fn default_server_addr() -> String { "0.0.0.0:8080".into() }

// ── Impls ─────────────────────────────────────────────────────

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            url: default_dataset_url(),
            connect_timeout_secs: default_connect_timeout(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: default_log_path(),
            timezone: default_log_timezone(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { addr: default_server_addr() }
    }
}

impl AppConfig {
    /// Load configuration from YAML file + env overrides.
    ///
    /// Nested keys in the environment are separated by `__`, e.g.
    /// `CONGESTION_DATASET__URL`.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let config: AppConfig = Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed("CONGESTION_").split("__"))
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        self.dataset.validate()?;
        self.log.zone()?;
        Ok(())
    }
}

impl LogConfig {
    pub fn zone(&self) -> Result<Tz, Error> {
        self.timezone
            .trim()
            .parse::<Tz>()
            .map_err(|e| Error::Config(format!("Zona horaria no válida '{}': {e}", self.timezone)))
    }
}

impl DatasetConfig {
    /// The dataset URL is the one setting a run cannot do without.
    pub fn validate(&self) -> Result<(), Error> {
        if self.url.trim().is_empty() {
            return Err(Error::Config("La URL de la API no está configurada.".into()));
        }
        Ok(())
    }
}
