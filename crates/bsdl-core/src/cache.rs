//! Fetch-once cache: the catalog is extracted at most once per resolver.
//!
//! Every operation goes through `ensure_populated` first. The gate is a plain
//! presence check: an empty catalog (failed or linkless fetch) is retried on
//! the next call, a populated one is reused until `refresh`.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::catalog::{Build, Catalog, CatalogSource};
use crate::downloader::{self, DownloadOptions};
use crate::error::{BsdlError, Result};
use crate::progress::ProgressReporter;
use crate::snapshot::VersionsSnapshot;
use crate::version;

/// Owns a catalog source and the catalog it produced.
pub struct CatalogCache<S> {
    source: S,
    catalog: Mutex<Catalog>,
}

impl<S: CatalogSource> CatalogCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            catalog: Mutex::new(Catalog::new()),
        }
    }

    #[cfg(test)]
    fn source(&self) -> &S {
        &self.source
    }

    fn lock(&self) -> MutexGuard<'_, Catalog> {
        self.catalog.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// True once a non-empty catalog is available, extracting it if needed.
    /// The lock is held across extraction so concurrent callers fetch only once.
    pub fn ensure_populated(&self) -> bool {
        let mut catalog = self.lock();
        if !catalog.is_empty() {
            return true;
        }
        Self::populate(&self.source, &mut catalog)
    }

    /// Re-extracts unconditionally, replacing the whole catalog.
    pub fn refresh(&self) -> bool {
        let mut catalog = self.lock();
        *catalog = Catalog::new();
        Self::populate(&self.source, &mut catalog)
    }

    fn populate(source: &S, catalog: &mut Catalog) -> bool {
        match source.extract() {
            Ok(fresh) if !fresh.is_empty() => {
                tracing::info!(builds = fresh.len(), "download catalog ready");
                *catalog = fresh;
                true
            }
            Ok(_) => {
                tracing::warn!("no build links found on the download page");
                false
            }
            Err(e) => {
                tracing::warn!("could not build download catalog: {}", e);
                false
            }
        }
    }

    /// Copy of the gated catalog.
    pub fn catalog(&self) -> Result<Catalog> {
        self.gate()?;
        Ok(self.lock().clone())
    }

    fn gate(&self) -> Result<()> {
        if self.ensure_populated() {
            Ok(())
        } else {
            Err(BsdlError::CatalogUnavailable)
        }
    }

    /// Latest release (`preview = false`) or preview version.
    pub fn latest_version(&self, preview: bool) -> Result<String> {
        self.gate()?;
        version::latest_version(&self.lock(), preview)
    }

    /// Catalog plus resolved versions, ready for `versions.json`.
    pub fn versions_snapshot(&self) -> Result<VersionsSnapshot> {
        self.gate()?;
        VersionsSnapshot::build(&self.lock())
    }

    /// Downloads `build`; see [`downloader::download_build`].
    /// The catalog lock is released before any network I/O.
    pub fn download(
        &self,
        build: Build,
        dest_dir: Option<&Path>,
        opts: &DownloadOptions,
        progress: &dyn ProgressReporter,
    ) -> Result<PathBuf> {
        let catalog = self.catalog()?;
        downloader::download_build(&catalog, build, dest_dir, opts, progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{HtmlSource, LinkFilter};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const CDN: &str = "https://minecraft.azureedge.net/";

    /// Counts extractions and fails on demand.
    struct CountingSource {
        inner: HtmlSource,
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingSource {
        fn new(html: &str, fail: bool) -> Self {
            Self {
                inner: HtmlSource::new(html, CDN, LinkFilter::AllAnchors),
                calls: AtomicUsize::new(0),
                fail,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl CatalogSource for CountingSource {
        fn extract(&self) -> Result<Catalog> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(BsdlError::Http {
                    url: "https://minecraft.net/".to_string(),
                    status: 403,
                });
            }
            self.inner.extract()
        }
    }

    fn page() -> String {
        format!(
            r#"<a href="{CDN}bin-win/bedrock-server-1.20.10.01.zip">w</a>
               <a href="{CDN}bin-linux/bedrock-server-1.20.10.01.zip">l</a>
               <a href="{CDN}bin-win-preview/bedrock-server-1.20.10.21.zip">wp</a>
               <a href="{CDN}bin-linux-preview/bedrock-server-1.20.10.21.zip">lp</a>"#
        )
    }

    #[test]
    fn extracts_only_once() {
        let cache = CatalogCache::new(CountingSource::new(&page(), false));
        assert!(cache.ensure_populated());
        assert!(cache.ensure_populated());
        assert_eq!(cache.latest_version(false).unwrap(), "1.20.10.01");
        assert_eq!(cache.latest_version(true).unwrap(), "1.20.10.21");
        assert_eq!(cache.catalog().unwrap().len(), 4);
        assert_eq!(cache.source().calls(), 1);
    }

    #[test]
    fn refresh_forces_extraction() {
        let cache = CatalogCache::new(CountingSource::new(&page(), false));
        assert!(cache.ensure_populated());
        assert!(cache.refresh());
        assert_eq!(cache.source().calls(), 2);
    }

    #[test]
    fn failed_fetch_gates_every_operation() {
        let cache = CatalogCache::new(CountingSource::new(&page(), true));
        assert!(!cache.ensure_populated());
        assert!(matches!(
            cache.latest_version(false),
            Err(BsdlError::CatalogUnavailable)
        ));
        assert!(matches!(
            cache.versions_snapshot(),
            Err(BsdlError::CatalogUnavailable)
        ));
        assert!(matches!(
            cache.download(
                Build::Linux,
                None,
                &DownloadOptions::default(),
                &crate::progress::NoopProgress
            ),
            Err(BsdlError::CatalogUnavailable)
        ));
        // No "attempted" state is kept: each gated call retries.
        assert_eq!(cache.source().calls(), 4);
    }

    #[test]
    fn page_without_links_is_not_ready() {
        let cache = CatalogCache::new(CountingSource::new("<p>Down for maintenance</p>", false));
        assert!(!cache.ensure_populated());
        assert!(matches!(cache.catalog(), Err(BsdlError::CatalogUnavailable)));
    }

    #[test]
    fn concurrent_callers_share_one_extraction() {
        let cache = Arc::new(CatalogCache::new(CountingSource::new(&page(), false)));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || cache.ensure_populated())
            })
            .collect();
        for h in handles {
            assert!(h.join().unwrap());
        }
        assert_eq!(cache.source().calls(), 1);
    }

    #[test]
    fn snapshot_through_cache() {
        let cache = CatalogCache::new(CountingSource::new(&page(), false));
        let snap = cache.versions_snapshot().unwrap();
        assert_eq!(snap.len(), 6);
        assert_eq!(snap.get("version"), Some("1.20.10.01"));
    }
}
