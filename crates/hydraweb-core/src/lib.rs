// ABOUTME: Core library for hydraweb, containing site configuration, branding, and page data types.
// ABOUTME: Also holds the shared-secret authenticator and the markdown converter used by the server crate.

pub mod auth;
pub mod brand;
pub mod config;
pub mod markdown;
pub mod page;

pub use auth::{Authenticator, SharedSecret};
pub use brand::Brand;
pub use config::{NavLink, SiteConfig};
pub use markdown::{MarkdownError, TrustedHtml, markdown_to_html, render_markdown};
pub use page::PageEnvelope;
