//! Turning listing hrefs into absolute URLs.
//!
//! The `list` pipeline keeps the historical behaviour of prefixing the site
//! origin onto the raw href. The `download` pipeline resolves the href
//! properly against the origin, which also handles links that are already
//! absolute.

use crate::error::ScrapeError;
use url::Url;

/// Prefix `base` onto `href` verbatim.
///
/// Listing hrefs are root-relative (`/Out/...`), so plain concatenation yields
/// an absolute URL on the site origin.
pub fn join_link(base: &str, href: &str) -> String {
    format!("{base}{href}")
}

/// Parse the origin relative links are resolved against.
pub fn parse_base(base: &str) -> Result<Url, ScrapeError> {
    Url::parse(base).map_err(|source| ScrapeError::InvalidUrl {
        input: base.to_string(),
        source,
    })
}

/// Resolve `href` against `base` per RFC 3986.
pub fn resolve_link(base: &Url, href: &str) -> Result<Url, ScrapeError> {
    base.join(href).map_err(|source| ScrapeError::InvalidUrl {
        input: href.to_string(),
        source,
    })
}

/// True when the URL ends in `.pdf`, ignoring case.
pub fn is_pdf(url: &Url) -> bool {
    url.as_str().to_ascii_lowercase().ends_with(".pdf")
}
