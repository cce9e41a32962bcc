//! `bsdl --type <BUILD> [--path <DIR>]` – download one build.

use anyhow::Result;
use bsdl_core::cache::CatalogCache;
use bsdl_core::catalog::{Build, CatalogSource};
use bsdl_core::config::BsdlConfig;
use bsdl_core::downloader::{resolve_destination, DownloadOptions};
use std::path::Path;

use crate::cli::progress::BarProgress;

pub fn run_download<S: CatalogSource>(
    cache: &CatalogCache<S>,
    cfg: &BsdlConfig,
    build: Build,
    dir: Option<&Path>,
) -> Result<()> {
    let opts = DownloadOptions::from_config(cfg);
    let dir = resolve_destination(dir, opts.destination)?;
    println!("Starting downloading build type {}", build.name());
    println!("Destination folder will be {}", dir.display());

    let progress = BarProgress::new();
    let path = cache.download(build, Some(&dir), &opts, &progress)?;
    println!("{}", path.display());
    println!("Download complete!");
    Ok(())
}
