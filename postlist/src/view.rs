//! Stateless HTML rendering of a prepared listing

use askama::Template;

use crate::error::{Error, Result};
use crate::listing::PostListing;

/// The listing page. All dynamic text is escaped by askama except
/// `preview_html`, which arrives pre-escaped from the listing layer.
#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate<'a> {
    listing: &'a PostListing,
}

/// Connection-failure page: short and human-readable, no stack trace.
#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate;

/// Render the listing page.
pub fn render_listing(listing: &PostListing) -> Result<String> {
    IndexTemplate { listing }
        .render()
        .map_err(|e| Error::Render(e.to_string()))
}

/// Render the connection-failure page.
pub fn render_error() -> Result<String> {
    ErrorTemplate
        .render()
        .map_err(|e| Error::Render(e.to_string()))
}
