//! `bsdl -i` – show gathered links and latest versions.
//!
//! Links are printed first; a version that cannot be resolved is reported on
//! its own line without hiding the rest.

use anyhow::Result;
use bsdl_core::cache::CatalogCache;
use bsdl_core::catalog::{Catalog, CatalogSource};

/// Shown in place of a version that could not be resolved.
const UNAVAILABLE: &str = "unavailable";

pub fn run_info<S: CatalogSource>(cache: &CatalogCache<S>) -> Result<()> {
    let catalog = cache.catalog()?;
    let version = cache.latest_version(false);
    let preview = cache.latest_version(true);
    for line in format_info(
        &catalog,
        version.as_deref().ok(),
        preview.as_deref().ok(),
    ) {
        println!("{line}");
    }
    // The release error wins if both are missing; both lines already say "unavailable".
    version?;
    preview?;
    Ok(())
}

pub(crate) fn format_info(
    catalog: &Catalog,
    version: Option<&str>,
    preview: Option<&str>,
) -> Vec<String> {
    let mut lines: Vec<String> = catalog
        .iter()
        .map(|(build, url)| format!("Gathered: {:>13} | {}", build.key(), url))
        .collect();
    lines.push(format!(
        "Latest version: {:>18}",
        version.unwrap_or(UNAVAILABLE)
    ));
    lines.push(format!(
        "Latest preview version: {:>10}",
        preview.unwrap_or(UNAVAILABLE)
    ));
    lines
}
