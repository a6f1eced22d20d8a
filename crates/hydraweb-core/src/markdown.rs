// ABOUTME: Markdown to HTML conversion with the table extension enabled.
// ABOUTME: Raw HTML and dangerous link schemes are stripped so the output can be embedded directly.

use std::fmt;

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html};
use serde::Serialize;
use thiserror::Error;

const RAW_HTML_OMITTED: &str = "<!-- raw HTML omitted -->";

/// Errors from markdown conversion.
#[derive(Debug, Error)]
pub enum MarkdownError {
    #[error("markdown input is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// An HTML fragment that is safe to embed without further escaping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TrustedHtml(String);

impl TrustedHtml {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for TrustedHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Convert raw markdown bytes to a trusted HTML fragment.
pub fn render_markdown(src: &[u8]) -> Result<TrustedHtml, MarkdownError> {
    let text = std::str::from_utf8(src).inspect_err(|e| {
        tracing::debug!(error = %e, "rejecting non-UTF-8 markdown input");
    })?;
    Ok(TrustedHtml(markdown_to_html(text)))
}

/// Convert markdown text to sanitized HTML.
///
/// Only the table extension is enabled. Raw HTML blocks and inline tags are
/// replaced by a placeholder comment, and links or images pointing at a
/// script-capable scheme lose their destination.
pub fn markdown_to_html(text: &str) -> String {
    let mut in_html_block = false;
    let events = Parser::new_ext(text, Options::ENABLE_TABLES).filter_map(move |event| {
        match event {
            Event::Start(Tag::HtmlBlock) => {
                in_html_block = true;
                Some(Event::Html(CowStr::Borrowed("<!-- raw HTML omitted -->\n")))
            }
            Event::End(TagEnd::HtmlBlock) => {
                in_html_block = false;
                None
            }
            Event::Html(_) if in_html_block => None,
            Event::Html(_) => Some(Event::Html(CowStr::Borrowed(RAW_HTML_OMITTED))),
            Event::InlineHtml(_) => Some(Event::InlineHtml(CowStr::Borrowed(RAW_HTML_OMITTED))),
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                id,
            }) => Some(Event::Start(Tag::Link {
                link_type,
                dest_url: strip_dangerous(dest_url),
                title,
                id,
            })),
            Event::Start(Tag::Image {
                link_type,
                dest_url,
                title,
                id,
            }) => Some(Event::Start(Tag::Image {
                link_type,
                dest_url: strip_dangerous(dest_url),
                title,
                id,
            })),
            other => Some(other),
        }
    });

    let mut output = String::with_capacity(text.len() * 2);
    html::push_html(&mut output, events);
    output
}

fn strip_dangerous(url: CowStr<'_>) -> CowStr<'_> {
    if is_dangerous_url(&url) {
        CowStr::Borrowed("")
    } else {
        url
    }
}

/// Schemes that can execute script or read local files when followed.
/// Inline raster images are the one allowed `data:` form.
fn is_dangerous_url(url: &str) -> bool {
    let url = url.trim_start().to_ascii_lowercase();
    if url.starts_with("data:") {
        return ![
            "data:image/png",
            "data:image/gif",
            "data:image/jpeg",
            "data:image/webp",
        ]
        .iter()
        .any(|allowed| url.starts_with(allowed));
    }
    ["javascript:", "vbscript:", "file:"]
        .iter()
        .any(|scheme| url.starts_with(scheme))
}
