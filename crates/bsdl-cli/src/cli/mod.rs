//! CLI for the BSDL Bedrock server downloader.

mod commands;
mod progress;

use anyhow::Result;
use bsdl_core::cache::CatalogCache;
use bsdl_core::catalog::{Build, CatalogSource, HtmlSource, PageSource};
use bsdl_core::config::{self, BsdlConfig};
use bsdl_core::snapshot::SNAPSHOT_FILE;
use bsdl_core::BsdlError;
use clap::Parser;
use std::path::{Path, PathBuf};

use commands::{run_download, run_info, run_latest, run_snapshot};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "bsdl", version)]
#[command(about = "Find and download the latest Minecraft Bedrock dedicated server builds", long_about = None)]
pub struct Cli {
    /// Build to download: WINDOWS, LINUX, WIN-PREVIEW or LINUX-PREVIEW.
    #[arg(long = "type", value_name = "BUILD")]
    pub build_type: Option<String>,

    /// Destination folder for the download (default from config: cwd or exe dir).
    #[arg(long, value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// Show gathered links and latest versions.
    #[arg(short = 'i', long)]
    pub info: bool,

    /// Write versions.json to the working directory.
    #[arg(short = 'v', long)]
    pub versions: bool,

    /// Print the latest release version.
    #[arg(long)]
    pub latest: bool,

    /// With --latest, print the preview version instead.
    #[arg(long, requires = "latest")]
    pub preview: bool,

    /// Read a saved copy of the download page instead of fetching it.
    #[arg(long, value_name = "FILE")]
    pub from_html: Option<PathBuf>,

    /// Config file to use instead of ~/.config/bsdl/config.toml.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        Cli::parse().run()
    }

    /// Runs the requested operations; `versions.json` lands in the working directory.
    pub fn run(self) -> Result<()> {
        let cwd = std::env::current_dir()?;
        self.run_in(&cwd)
    }

    /// Like `run`, writing `versions.json` into `snapshot_dir`.
    pub fn run_in(self, snapshot_dir: &Path) -> Result<()> {
        let cfg = match &self.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);

        let build = self.build();
        if !self.versions && !self.info && !self.latest && build.is_none() {
            tracing::debug!("nothing requested");
            return Ok(());
        }

        match &self.from_html {
            Some(path) => {
                let source = HtmlSource::from_file(path, &cfg)?;
                self.dispatch(&cfg, CatalogCache::new(source), build, snapshot_dir)
            }
            None => {
                let cache = CatalogCache::new(PageSource::from_config(&cfg));
                self.dispatch(&cfg, cache, build, snapshot_dir)
            }
        }
    }

    /// Selected build; an unknown name is reported and ignored.
    fn build(&self) -> Option<Build> {
        let name = self.build_type.as_deref()?;
        match name.parse::<Build>() {
            Ok(b) => Some(b),
            Err(e) => {
                tracing::warn!("{}", e);
                println!("No or misspelled arguments were given: {name}");
                None
            }
        }
    }

    /// Each requested operation runs even if an earlier one failed; failures are
    /// reported as they happen and turn into a single error at the end.
    fn dispatch<S: CatalogSource>(
        &self,
        cfg: &BsdlConfig,
        cache: CatalogCache<S>,
        build: Option<Build>,
        snapshot_dir: &Path,
    ) -> Result<()> {
        if !cache.ensure_populated() {
            eprintln!("Couldn't request data from {}", cfg.page_url);
            return Err(BsdlError::CatalogUnavailable.into());
        }

        let mut failed: Vec<&str> = Vec::new();
        let mut check = |operation: &'static str, result: Result<()>| {
            if let Err(err) = result {
                tracing::warn!(operation, "failed: {:#}", err);
                eprintln!("{operation} failed: {err:#}");
                failed.push(operation);
            }
        };

        if self.versions {
            check("versions", run_snapshot(&cache, &snapshot_dir.join(SNAPSHOT_FILE)));
        }
        if self.info {
            check("info", run_info(&cache));
        }
        if self.latest {
            check("latest", run_latest(&cache, self.preview));
        }
        if let Some(build) = build {
            check("download", run_download(&cache, cfg, build, self.path.as_deref()));
        }

        if failed.is_empty() {
            Ok(())
        } else {
            anyhow::bail!("{} operation(s) failed: {}", failed.len(), failed.join(", "))
        }
    }
}
