// ABOUTME: Page envelope wrapping page-specific data with the shared layout fields.
// ABOUTME: Generic over the page data type so each route keeps its own concrete shape.

use serde::Serialize;

use crate::brand::Brand;
use crate::config::NavLink;

/// Data passed to every rendered page: title, login state, brand, navigation,
/// an optional error message, and the page's own payload under `data`.
#[derive(Debug, Serialize)]
pub struct PageEnvelope<'a, T> {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'a str>,
    pub logged_in: bool,
    pub brand: &'a Brand,
    pub nav: &'a [NavLink],
    pub data: T,
}

impl<'a, T> PageEnvelope<'a, T> {
    pub fn new(brand: &'a Brand, nav: &'a [NavLink], data: T) -> Self {
        Self {
            title: brand.title(),
            error: None,
            logged_in: false,
            brand,
            nav,
            data,
        }
    }

    pub fn logged_in(mut self, logged_in: bool) -> Self {
        self.logged_in = logged_in;
        self
    }

    pub fn error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }
}
