// ABOUTME: Site configuration consumed when building the shared web instance.
// ABOUTME: Holds the project name, brand parts, admin token, navigation links, and route paths.

use std::fmt;

use serde::Serialize;

use crate::brand::Brand;

/// Default path of the shared login page.
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// Default landing path after a successful login.
pub const DEFAULT_HOME_PATH: &str = "/admin";

/// A navigation entry shown in the header when logged in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub label: String,
    pub path: String,
}

impl NavLink {
    pub fn new(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
        }
    }
}

/// Configuration for one deployed admin application.
#[derive(Clone)]
pub struct SiteConfig {
    /// Full name, e.g. "HydraExperienceLibrary".
    pub project_name: String,
    /// Coloured part of the name, e.g. "Hydra".
    pub brand_prefix: String,
    /// Plain part of the name, e.g. "ExperienceLibrary".
    pub brand_suffix: String,
    /// Shared admin token.
    pub admin_token: String,
    /// Navigation links in display order.
    pub nav_links: Vec<NavLink>,
    pub login_path: String,
    pub home_path: String,
}

impl SiteConfig {
    /// Create a config whose brand is derived from the project name.
    pub fn new(project_name: impl Into<String>, admin_token: impl Into<String>) -> Self {
        let project_name = project_name.into();
        let brand = Brand::split(&project_name);
        Self {
            project_name,
            brand_prefix: brand.prefix,
            brand_suffix: brand.suffix,
            admin_token: admin_token.into(),
            nav_links: Vec::new(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            home_path: DEFAULT_HOME_PATH.to_string(),
        }
    }

    /// Override the derived brand split.
    pub fn with_brand(mut self, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        self.brand_prefix = prefix.into();
        self.brand_suffix = suffix.into();
        self
    }

    pub fn with_nav_links(mut self, nav_links: Vec<NavLink>) -> Self {
        self.nav_links = nav_links;
        self
    }

    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    pub fn with_home_path(mut self, path: impl Into<String>) -> Self {
        self.home_path = path.into();
        self
    }

    pub fn brand(&self) -> Brand {
        Brand::new(&self.brand_prefix, &self.brand_suffix)
    }
}

// The admin token never shows up in logs.
impl fmt::Debug for SiteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SiteConfig")
            .field("project_name", &self.project_name)
            .field("brand_prefix", &self.brand_prefix)
            .field("brand_suffix", &self.brand_suffix)
            .field("admin_token", &"<redacted>")
            .field("nav_links", &self.nav_links)
            .field("login_path", &self.login_path)
            .field("home_path", &self.home_path)
            .finish()
    }
}
