// ABOUTME: The shared per-application web instance: authenticator, brand, navigation, and renderer.
// ABOUTME: Answers the credential check and renders pages into HTTP responses.

use std::sync::Arc;

use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::CookieJar;
use hydraweb_core::{Authenticator, Brand, NavLink, PageEnvelope, SharedSecret, SiteConfig};
use serde::Serialize;

use crate::renderer::{Renderer, TemplateError};
use crate::session::SESSION_COOKIE;

/// Shared web infrastructure for one deployed admin application.
///
/// Built once at startup from a [`SiteConfig`] and a finished [`Renderer`],
/// then shared read-only between requests as [`SharedWeb`].
pub struct Web {
    authenticator: Arc<dyn Authenticator>,
    brand: Brand,
    nav_links: Vec<NavLink>,
    login_path: String,
    home_path: String,
    renderer: Renderer,
}

/// Type alias for the Arc-wrapped instance used with Axum's State extractor.
pub type SharedWeb = Arc<Web>;

impl Web {
    /// Create an instance that authenticates against the configured admin token.
    pub fn new(config: SiteConfig, renderer: Renderer) -> Self {
        let authenticator = Arc::new(SharedSecret::new(config.admin_token.clone()));
        Self::with_authenticator(config, authenticator, renderer)
    }

    /// Create an instance with a caller-supplied authenticator. The config's
    /// admin token is ignored.
    pub fn with_authenticator(
        config: SiteConfig,
        authenticator: Arc<dyn Authenticator>,
        renderer: Renderer,
    ) -> Self {
        Self {
            authenticator,
            brand: config.brand(),
            nav_links: config.nav_links,
            login_path: config.login_path,
            home_path: config.home_path,
            renderer,
        }
    }

    pub fn authenticator(&self) -> &dyn Authenticator {
        self.authenticator.as_ref()
    }

    pub fn brand(&self) -> &Brand {
        &self.brand
    }

    pub fn nav_links(&self) -> &[NavLink] {
        &self.nav_links
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn home_path(&self) -> &str {
        &self.home_path
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Check the request for a valid credential: the `Authorization` header
    /// first (a leading `Bearer ` is stripped once), then the session cookie.
    pub fn is_authenticated(&self, headers: &HeaderMap) -> bool {
        if let Some(value) = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
            let token = value.strip_prefix("Bearer ").unwrap_or(value);
            if self.authenticator.validate(token) {
                return true;
            }
        }

        CookieJar::from_headers(headers)
            .get(SESSION_COOKIE)
            .is_some_and(|cookie| self.authenticator.validate(cookie.value()))
    }

    /// Render `name` with `data` wrapped in the page envelope.
    ///
    /// An unregistered name yields a 500 naming the missing template. Render
    /// failures are logged and answered with a generic 500.
    pub fn render<T: Serialize>(
        &self,
        name: &str,
        data: T,
        logged_in: bool,
        error: Option<&str>,
    ) -> Response {
        let envelope = PageEnvelope::new(&self.brand, &self.nav_links, data)
            .logged_in(logged_in)
            .error(error);

        match self.renderer.render(name, &envelope) {
            Ok(html) => Html(html).into_response(),
            Err(err @ TemplateError::NotFound(_)) => {
                tracing::error!(page = name, "render requested for unregistered template");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
            }
            Err(err) => {
                tracing::error!(page = name, error = ?err, "template error");
                (StatusCode::INTERNAL_SERVER_ERROR, "template error").into_response()
            }
        }
    }
}
