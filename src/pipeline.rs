//! The two scraping runs.
//!
//! - [`run_listing`]: fetch the listing, write `{date, title, link}` records
//! - [`run_download`]: fetch the listing, download every linked PDF, write
//!   `{date, title, original_url, local_path}` records
//!
//! Both write the JSON file exactly once, after every row has been handled.
//! Fatal errors return before anything is written.

use crate::config::Settings;
use crate::download::{download_pdf, local_file_name};
use crate::error::ScrapeError;
use crate::fetch::fetch_page;
use crate::links::{is_pdf, join_link, parse_base, resolve_link};
use crate::models::{DownloadedCircular, ListedCircular, ListingRow, NO_LINK};
use crate::outputs::json::write_records;
use crate::scrapers::cbn::parse_listing;
use reqwest::Client;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Counters reported at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Data rows found in the listing table.
    pub rows: usize,
    /// Records written to the JSON file.
    pub records: usize,
    /// Rows dropped without a request (no link, not a PDF, bad URL).
    pub skipped: usize,
    /// Rows whose download failed.
    pub failed: usize,
    pub output: PathBuf,
}

/// List every circular on the page.
///
/// A page without a table yields an empty array. Rows without a link get
/// [`NO_LINK`], unless `settings.strict_links` is set, in which case the run
/// stops with [`ScrapeError::MissingAnchor`] and nothing is written.
#[instrument(level = "info", skip_all, fields(source = %settings.source_url))]
pub async fn run_listing(client: &Client, settings: &Settings) -> Result<RunSummary, ScrapeError> {
    let html = fetch_page(client, &settings.source_url).await?;
    let rows = parse_listing(&html).unwrap_or_else(|| {
        warn!("No table on listing page; writing an empty list");
        Vec::new()
    });

    let records = rows
        .iter()
        .enumerate()
        .map(|(i, row)| listed(row, i + 1, settings))
        .collect::<Result<Vec<_>, _>>()?;

    write_records(&settings.output, &records).await?;

    let summary = RunSummary {
        rows: rows.len(),
        records: records.len(),
        skipped: 0,
        failed: 0,
        output: settings.output.clone(),
    };
    info!(
        count = summary.records,
        path = %summary.output.display(),
        "Extracted circulars"
    );
    Ok(summary)
}

fn listed(row: &ListingRow, index: usize, settings: &Settings) -> Result<ListedCircular, ScrapeError> {
    let link = match &row.href {
        Some(href) => join_link(&settings.base_url, href),
        None if settings.strict_links => {
            return Err(ScrapeError::MissingAnchor {
                row: index,
                title: row.title.clone(),
            });
        }
        None => NO_LINK.to_string(),
    };
    Ok(ListedCircular {
        date: row.date.clone(),
        title: row.title.clone(),
        link,
    })
}

/// Download every PDF linked from the page and record where it was saved.
///
/// The download directory is created before the listing is fetched. A page
/// without a table is fatal. Individual download failures are logged and the
/// row is dropped.
#[instrument(level = "info", skip_all, fields(source = %settings.source_url))]
pub async fn run_download(client: &Client, settings: &Settings) -> Result<RunSummary, ScrapeError> {
    let base = parse_base(&settings.base_url)?;
    let dir = &settings.download_dir;
    if !fs::try_exists(dir).await.unwrap_or(false) {
        fs::create_dir_all(dir)
            .await
            .map_err(|e| ScrapeError::io(dir, e))?;
        info!(path = %dir.display(), "Created directory");
    }

    let html = fetch_page(client, &settings.source_url).await?;
    let rows = parse_listing(&html).ok_or(ScrapeError::TableNotFound)?;
    info!(count = rows.len(), "Found potential circulars; starting download");

    let mut records = Vec::new();
    let mut skipped = 0;
    let mut failed = 0;

    for row in &rows {
        let Some(target) = pdf_target(row, &base, &settings.download_dir) else {
            skipped += 1;
            continue;
        };

        match download_pdf(client, &target.url, &target.dest).await {
            Ok(path) => {
                info!(file = %target.file_name, "Downloaded");
                records.push(DownloadedCircular {
                    date: row.date.clone(),
                    title: row.title.clone(),
                    original_url: target.url.to_string(),
                    local_path: path.to_string_lossy().into_owned(),
                });
            }
            Err(e) => {
                warn!(url = %target.url, kind = ?e.kind(), error = %e, "Failed to download");
                failed += 1;
            }
        }
    }

    write_records(&settings.output, &records).await?;

    let summary = RunSummary {
        rows: rows.len(),
        records: records.len(),
        skipped,
        failed,
        output: settings.output.clone(),
    };
    info!(
        rows = summary.rows,
        downloaded = summary.records,
        skipped = summary.skipped,
        failed = summary.failed,
        path = %summary.output.display(),
        "Download run complete"
    );
    Ok(summary)
}

struct PdfTarget {
    url: Url,
    file_name: String,
    dest: PathBuf,
}

/// Resolve a row to a PDF URL and local destination, or `None` to skip it.
fn pdf_target(row: &ListingRow, base: &Url, download_dir: &Path) -> Option<PdfTarget> {
    let Some(href) = row.href.as_deref() else {
        debug!(title = %row.title, "Row has no link");
        return None;
    };

    let url = match resolve_link(base, href) {
        Ok(url) => url,
        Err(e) => {
            debug!(%href, error = %e, "Unresolvable link");
            return None;
        }
    };
    if !is_pdf(&url) {
        debug!(%url, "Not a PDF link");
        return None;
    }

    let Some(file_name) = local_file_name(&url) else {
        debug!(%url, "No usable file name");
        return None;
    };
    let dest = download_dir.join(&file_name);
    Some(PdfTarget {
        url,
        file_name,
        dest,
    })
}
