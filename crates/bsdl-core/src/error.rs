//! Error taxonomy shared by every core operation.
//!
//! Network and HTTP failures come from the page fetch or the download stream;
//! missing keys and version heuristics come from catalog lookups; I/O covers
//! the destination file.

use std::path::PathBuf;

use crate::catalog::Build;

pub type Result<T> = std::result::Result<T, BsdlError>;

#[derive(Debug, thiserror::Error)]
pub enum BsdlError {
    /// libcurl reported a transport failure (DNS, connect, TLS, dropped stream, timeout).
    #[error("network error: {0}")]
    Network(#[from] curl::Error),

    /// The server answered with a non-2xx status.
    #[error("GET {url} returned HTTP {status}")]
    Http { url: String, status: u32 },

    /// The page could not be read as markup.
    #[error("could not parse download page: {0}")]
    Parse(String),

    /// The fetch-once gate could not produce a catalog.
    #[error("download catalog is unavailable (page fetch failed or found no links)")]
    CatalogUnavailable,

    /// The page did not list a link for this build.
    #[error("no download link found for {}", .0.key())]
    MissingKey(Build),

    /// The URL does not follow the `...1.x.y.z.zip` naming convention.
    #[error("cannot derive a version from {0}")]
    UnrecognizedVersion(String),

    /// The URL has no usable final path segment to name the file after.
    #[error("cannot derive a file name from {0}")]
    InvalidUrl(String),

    /// Writing the response body to the destination failed mid-stream.
    #[error("write to destination failed: {0}")]
    Write(#[source] std::io::Error),

    /// Creating, renaming or removing a destination file failed.
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("snapshot serialization failed: {0}")]
    Snapshot(#[from] serde_json::Error),
}

impl BsdlError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BsdlError::Io {
            path: path.into(),
            source,
        }
    }
}
