//! Assign CDN links to build categories by substring matching.

use super::{Build, Catalog};

/// Builds a catalog from CDN links.
///
/// The four checks are independent, not an if/else chain: a link may satisfy
/// several of them, and a later link for the same build replaces an earlier one.
pub fn classify<S: AsRef<str>>(links: &[S]) -> Catalog {
    let mut catalog = Catalog::new();
    for link in links {
        let link = link.as_ref();
        let win = link.contains("bin-win");
        let linux = link.contains("bin-linux");
        let preview = link.contains("preview");
        if win && !preview {
            catalog.insert(Build::Windows, link);
        }
        if linux && !preview {
            catalog.insert(Build::Linux, link);
        }
        if win && preview {
            catalog.insert(Build::WinPreview, link);
        }
        if linux && preview {
            catalog.insert(Build::LinuxPreview, link);
        }
    }
    tracing::debug!(links = links.len(), builds = catalog.len(), "classified links");
    catalog
}
