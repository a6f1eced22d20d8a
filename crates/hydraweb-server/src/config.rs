// ABOUTME: Configuration loading and validation for a hydraweb server.
// ABOUTME: Reads HYDRA_* environment variables into a bind address, site config, and template directory.

use std::net::SocketAddr;
use std::path::PathBuf;

use hydraweb_core::{NavLink, SiteConfig};
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("HYDRA_BIND is not a valid socket address: {0}")]
    InvalidBind(String),

    #[error("HYDRA_ADMIN_TOKEN is not set; refusing to start without an admin secret")]
    MissingAdminToken,

    #[error("HYDRA_NAV entry {0:?} is not of the form Label=/path")]
    InvalidNav(String),
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub site: SiteConfig,
    pub templates_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// Load configuration from environment variables with sensible defaults.
    ///
    /// Environment variables:
    /// - HYDRA_BIND: socket address to bind (default: 127.0.0.1:8080)
    /// - HYDRA_PROJECT_NAME: full project name (default: HydraWeb)
    /// - HYDRA_BRAND_PREFIX / HYDRA_BRAND_SUFFIX: override the derived brand split
    /// - HYDRA_ADMIN_TOKEN: shared admin secret (required)
    /// - HYDRA_NAV: navigation links, `Label=/path,Label=/path` (optional)
    /// - HYDRA_TEMPLATES_DIR: directory holding project page templates (optional)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let bind_str = var("HYDRA_BIND").unwrap_or_else(|| "127.0.0.1:8080".to_string());
        let bind: SocketAddr = bind_str
            .parse()
            .map_err(|_| ConfigError::InvalidBind(bind_str))?;

        let admin_token = var("HYDRA_ADMIN_TOKEN").ok_or(ConfigError::MissingAdminToken)?;
        let project_name = var("HYDRA_PROJECT_NAME").unwrap_or_else(|| "HydraWeb".to_string());

        let mut site = SiteConfig::new(project_name, admin_token);
        if let Some(prefix) = var("HYDRA_BRAND_PREFIX") {
            let suffix = var("HYDRA_BRAND_SUFFIX").unwrap_or_default();
            site = site.with_brand(prefix, suffix);
        }
        if let Some(nav) = var("HYDRA_NAV") {
            site = site.with_nav_links(parse_nav(&nav)?);
        }

        let templates_dir = var("HYDRA_TEMPLATES_DIR").map(PathBuf::from);

        Ok(Self {
            bind,
            site,
            templates_dir,
        })
    }
}

/// Parse `Label=/path` entries separated by commas, keeping their order.
pub fn parse_nav(raw: &str) -> Result<Vec<NavLink>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.split_once('=') {
            Some((label, path)) if !label.trim().is_empty() && path.trim().starts_with('/') => {
                Ok(NavLink::new(label.trim(), path.trim()))
            }
            _ => Err(ConfigError::InvalidNav(entry.to_string())),
        })
        .collect()
}
