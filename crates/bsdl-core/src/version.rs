//! Version Resolver: derive the server version from a build URL.
//!
//! Vendor file names embed the version right before `.zip`, starting with the
//! digit `1` (e.g. `bedrock-server-1.20.10.01.zip`). The heuristic is kept as-is:
//! cut at the last `.zip`, then keep everything from the first `1`.

use crate::catalog::{Build, Catalog};
use crate::error::{BsdlError, Result};

/// Extracts the version string from a download URL.
pub fn version_from_url(url: &str) -> Result<String> {
    let unrecognized = || BsdlError::UnrecognizedVersion(url.to_string());
    let end = url.rfind(".zip").ok_or_else(unrecognized)?;
    let head = &url[..end];
    let start = head.find('1').ok_or_else(unrecognized)?;
    Ok(head[start..].to_string())
}

/// Latest release (`linux`) or preview (`linux-preview`) version in the catalog.
pub fn latest_version(catalog: &Catalog, preview: bool) -> Result<String> {
    let build = if preview {
        Build::LinuxPreview
    } else {
        Build::Linux
    };
    version_from_url(catalog.url(build)?)
}
