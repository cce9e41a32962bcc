//! `bsdl -v` – write versions.json.

use anyhow::Result;
use bsdl_core::cache::CatalogCache;
use bsdl_core::catalog::CatalogSource;
use std::path::Path;

pub fn run_snapshot<S: CatalogSource>(cache: &CatalogCache<S>, path: &Path) -> Result<()> {
    let snapshot = cache.versions_snapshot()?;
    snapshot.write_to(path)?;
    println!("Wrote {}", path.display());
    Ok(())
}
