// ABOUTME: Axum integration for hydraweb admin applications.
// ABOUTME: Exposes the shared Web instance, template registry, auth gates, request logger, and JSON helpers.

pub mod auth;
pub mod config;
pub mod logging;
pub mod renderer;
pub mod response;
pub mod routes;
pub mod session;
pub mod web;

pub use auth::AuthLayer;
pub use config::{ConfigError, ServerConfig};
pub use logging::log_request;
pub use renderer::{DirSource, LOGIN_PAGE, MemorySource, Renderer, TemplateError, TemplateSource};
pub use response::{ApiError, write_error, write_json};
pub use routes::create_router;
pub use web::{SharedWeb, Web};
