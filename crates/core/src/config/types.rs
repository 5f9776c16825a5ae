use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use crate::filter::FilterConfig;
use crate::metadata::TmdbConfig;
use crate::search::CloudSaverConfig;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub filter: FilterConfig,
    /// Search backend; acquisition is disabled without it.
    #[serde(default)]
    pub cloudsaver: Option<CloudSaverConfig>,
    /// Metadata backend; identities stay unresolved without it.
    #[serde(default)]
    pub tmdb: Option<TmdbConfig>,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("cloudsaver.db")
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub filter: SanitizedFilterConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloudsaver: Option<SanitizedCloudSaverConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tmdb: Option<SanitizedTmdbConfig>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedFilterConfig {
    pub enabled_cloud_types: Vec<String>,
    pub fallback_enabled: bool,
}

/// Sanitized CloudSaver config (token hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedCloudSaverConfig {
    pub base_url: String,
    pub token_configured: bool,
    pub timeout_secs: u32,
}

/// Sanitized TMDB config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedTmdbConfig {
    pub base_url: String,
    pub language: String,
    pub api_key_configured: bool,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            database: config.database.clone(),
            filter: SanitizedFilterConfig {
                enabled_cloud_types: config
                    .filter
                    .enabled_cloud_types
                    .iter()
                    .map(|t| t.name().to_string())
                    .collect(),
                fallback_enabled: config.filter.fallback_enabled,
            },
            cloudsaver: config
                .cloudsaver
                .as_ref()
                .map(|c| SanitizedCloudSaverConfig {
                    base_url: c.base_url.clone(),
                    token_configured: !c.token.is_empty(),
                    timeout_secs: c.timeout_secs,
                }),
            tmdb: config.tmdb.as_ref().map(|t| SanitizedTmdbConfig {
                base_url: t.base_url.clone(),
                language: t.language.clone(),
                api_key_configured: !t.api_key.is_empty(),
            }),
        }
    }
}
