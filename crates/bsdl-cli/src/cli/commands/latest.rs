//! `bsdl --latest [--preview]` – print one version string.

use anyhow::Result;
use bsdl_core::cache::CatalogCache;
use bsdl_core::catalog::CatalogSource;

pub fn run_latest<S: CatalogSource>(cache: &CatalogCache<S>, preview: bool) -> Result<()> {
    println!("{}", cache.latest_version(preview)?);
    Ok(())
}
