//! JSON output of scraped records.
//!
//! The whole record list is serialized as one array with 4-space indentation
//! and written in a single call, replacing whatever file was there before.
//! There is no temp-file-and-rename step.

use crate::error::ScrapeError;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Render `records` as a 4-space indented JSON array.
pub fn to_pretty_json<T: Serialize>(records: &[T]) -> Result<Vec<u8>, ScrapeError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    records.serialize(&mut ser)?;
    Ok(buf)
}

/// Write `records` to `path` as UTF-8 JSON.
///
/// # Output Path
///
/// Parent directories are created when missing.
#[instrument(level = "info", skip_all, fields(path = %path.display(), count = records.len()))]
pub async fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<(), ScrapeError> {
    let json = to_pretty_json(records)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| ScrapeError::io(parent, e))?;
    }

    fs::write(path, json)
        .await
        .map_err(|e| ScrapeError::io(path, e))?;
    info!("Wrote JSON records");
    Ok(())
}
