//! Run settings.
//!
//! Settings are layered: built-in defaults for the CBN circulars page, then an
//! optional YAML file, then whatever the command line (or its environment
//! variables) provides.
//!
//! ```yaml
//! source_url: https://www.cbn.gov.ng/Documents/circulars.html
//! base_url: https://www.cbn.gov.ng
//! output: cbn_circulars.json
//! download_dir: downloaded_pdfs
//! ```

use crate::error::ScrapeError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

pub const DEFAULT_SOURCE_URL: &str = "https://www.cbn.gov.ng/Documents/circulars.html";
pub const DEFAULT_BASE_URL: &str = "https://www.cbn.gov.ng";
pub const DEFAULT_OUTPUT: &str = "cbn_circulars.json";
pub const DEFAULT_DOWNLOAD_DIR: &str = "downloaded_pdfs";

/// Desktop browser identification; the site answers 403 to default clients.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Effective configuration of a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Listing page to scrape.
    pub source_url: String,
    /// Origin that relative links are joined onto.
    pub base_url: String,
    pub user_agent: String,
    /// JSON file written at the end of the run.
    pub output: PathBuf,
    /// Directory PDFs are saved into (`download` only).
    pub download_dir: PathBuf,
    /// Abort `list` on a row without a link instead of writing [`crate::models::NO_LINK`].
    pub strict_links: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            download_dir: PathBuf::from(DEFAULT_DOWNLOAD_DIR),
            strict_links: false,
        }
    }
}

/// On-disk shape of the YAML config; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileSettings {
    pub source_url: Option<String>,
    pub base_url: Option<String>,
    pub user_agent: Option<String>,
    pub output: Option<PathBuf>,
    pub download_dir: Option<PathBuf>,
    pub strict_links: Option<bool>,
}

impl Settings {
    /// Overlay the keys present in `file` onto `self`.
    pub fn merge_file(mut self, file: FileSettings) -> Self {
        if let Some(v) = file.source_url {
            self.source_url = v;
        }
        if let Some(v) = file.base_url {
            self.base_url = v;
        }
        if let Some(v) = file.user_agent {
            self.user_agent = v;
        }
        if let Some(v) = file.output {
            self.output = v;
        }
        if let Some(v) = file.download_dir {
            self.download_dir = v;
        }
        if let Some(v) = file.strict_links {
            self.strict_links = v;
        }
        self
    }
}

/// Read and parse a YAML settings file.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn load_file(path: &Path) -> Result<FileSettings, ScrapeError> {
    let raw = std::fs::read_to_string(path).map_err(|e| ScrapeError::Config {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let parsed: FileSettings = serde_yaml::from_str(&raw).map_err(|e| ScrapeError::Config {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    info!("Loaded configuration file");
    Ok(parsed)
}
