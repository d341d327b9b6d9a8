//! Command-line interface definitions.
//!
//! Every global option except `--fail-on-error` can also come from an
//! environment variable, and all of them override values loaded from
//! `--config`.

use crate::config::{self, Settings};
use crate::error::ScrapeError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Write the listing to cbn_circulars.json
/// cbn_circulars list
///
/// # Mirror every PDF into ./pdfs and record local paths
/// cbn_circulars download --download-dir ./pdfs
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML settings file
    #[arg(short, long, env = "CBN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Listing page to scrape
    #[arg(long, env = "CBN_SOURCE_URL")]
    pub source_url: Option<String>,

    /// Origin used to absolutize relative links
    #[arg(long, env = "CBN_BASE_URL")]
    pub base_url: Option<String>,

    /// JSON file to write
    #[arg(short, long, env = "CBN_OUTPUT")]
    pub output: Option<PathBuf>,

    /// User-Agent header sent on every request
    #[arg(long, env = "CBN_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Exit with a failure status when the run fails (default: log and exit 0)
    #[arg(long)]
    pub fail_on_error: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Extract date, title and link of every circular into JSON
    List {
        /// Fail the run when a row has no link instead of writing "N/A"
        #[arg(long)]
        strict_links: bool,
    },
    /// Download every linked PDF and record where it was saved
    Download {
        /// Directory the PDFs are written to
        #[arg(short, long, env = "CBN_DOWNLOAD_DIR")]
        download_dir: Option<PathBuf>,
    },
}

impl Cli {
    /// Resolve defaults, the optional config file and the flags into [`Settings`].
    pub fn settings(&self) -> Result<Settings, ScrapeError> {
        let mut settings = Settings::default();
        if let Some(path) = &self.config {
            settings = settings.merge_file(config::load_file(path)?);
        }

        if let Some(v) = &self.source_url {
            settings.source_url = v.clone();
        }
        if let Some(v) = &self.base_url {
            settings.base_url = v.clone();
        }
        if let Some(v) = &self.output {
            settings.output = v.clone();
        }
        if let Some(v) = &self.user_agent {
            settings.user_agent = v.clone();
        }
        match &self.command {
            Command::List { strict_links } => {
                settings.strict_links |= *strict_links;
            }
            Command::Download { download_dir } => {
                if let Some(v) = download_dir {
                    settings.download_dir = v.clone();
                }
            }
        }
        Ok(settings)
    }
}
