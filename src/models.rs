//! Data models for scraped circulars and their output records.
//!
//! - [`ListingRow`]: one data row of the listing table, as parsed
//! - [`ListedCircular`]: output record of the `list` pipeline
//! - [`DownloadedCircular`]: output record of the `download` pipeline
//!
//! Both record types serialize with the field names the JSON file has always
//! used, so downstream consumers do not need to care which binary wrote it.

use serde::Serialize;

/// Placeholder written to `link` when a row carries no hyperlink.
pub const NO_LINK: &str = "N/A";

/// A single data row of the circulars table.
///
/// # Fields
///
/// * `date` - Text of the first cell, trimmed
/// * `title` - Text of the second cell, trimmed
/// * `href` - Raw `href` of the first anchor in the title cell, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRow {
    pub date: String,
    pub title: String,
    /// `None` when the anchor is missing or its `href` is blank.
    pub href: Option<String>,
}

/// A circular as listed on the page, with an absolute link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListedCircular {
    pub date: String,
    pub title: String,
    /// Absolute URL, or [`NO_LINK`].
    pub link: String,
}

/// A circular whose PDF has been saved locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadedCircular {
    pub date: String,
    pub title: String,
    /// The resolved PDF URL the file was fetched from.
    pub original_url: String,
    /// Absolute path of the saved file.
    pub local_path: String,
}
