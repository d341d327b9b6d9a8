//! Streaming PDF downloads.
//!
//! Files are named after the last path segment of their URL with spaces
//! replaced by underscores, e.g. `.../My Circular 2024.pdf` is saved as
//! `My_Circular_2024.pdf`. Existing files are overwritten on every run.

use crate::error::ScrapeError;
use futures::StreamExt;
use reqwest::{Client, StatusCode};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, instrument, warn};
use url::Url;

/// Write buffer size for downloaded bodies.
pub const DOWNLOAD_CHUNK_SIZE: usize = 8192;

/// Derive the local file name for `url`.
///
/// Returns `None` when the URL has no usable final segment.
pub fn local_file_name(url: &Url) -> Option<String> {
    let segment = url.path_segments()?.next_back()?;
    let decoded = urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string());

    let name: String = decoded
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            other => other,
        })
        .collect();

    match name.as_str() {
        "" | "." | ".." => None,
        _ => Some(name),
    }
}

/// Stream `url` into `dest`, replacing any existing file.
///
/// Only `200 OK` counts as success. A body that fails halfway leaves no file
/// behind.
///
/// # Returns
///
/// The absolute path of the written file.
#[instrument(level = "info", skip_all, fields(%url, dest = %dest.display()))]
pub async fn download_pdf(client: &Client, url: &Url, dest: &Path) -> Result<PathBuf, ScrapeError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| ScrapeError::network(url.as_str(), e))?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(ScrapeError::Status {
            url: url.to_string(),
            status,
        });
    }

    let file = fs::File::create(dest)
        .await
        .map_err(|e| ScrapeError::io(dest, e))?;

    if let Err(e) = stream_body(response, url, dest, file).await {
        if let Err(rm) = fs::remove_file(dest).await {
            warn!(error = %rm, "Could not remove partial download");
        }
        return Err(e);
    }

    std::path::absolute(dest).map_err(|e| ScrapeError::io(dest, e))
}

async fn stream_body(
    response: reqwest::Response,
    url: &Url,
    dest: &Path,
    file: fs::File,
) -> Result<(), ScrapeError> {
    let mut writer = BufWriter::with_capacity(DOWNLOAD_CHUNK_SIZE, file);
    let mut written: u64 = 0;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| ScrapeError::network(url.as_str(), e))?;
        writer
            .write_all(&chunk)
            .await
            .map_err(|e| ScrapeError::io(dest, e))?;
        written += chunk.len() as u64;
    }
    writer.flush().await.map_err(|e| ScrapeError::io(dest, e))?;
    debug!(bytes = written, "Wrote PDF");
    Ok(())
}
