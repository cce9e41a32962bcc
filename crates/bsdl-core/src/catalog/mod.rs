//! Download catalog: which build flavours the vendor page currently links to.
//!
//! The page is fetched once, anchors are filtered by the CDN prefix and each
//! surviving link is classified into one of the four build categories.

mod classify;
mod extract;
mod selector;
mod source;

pub use classify::classify;
pub use extract::{extract_links, LinkFilter};
pub use selector::{Build, UnknownBuild};
pub use source::{CatalogSource, HtmlSource, PageSource};

use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::{BsdlError, Result};

/// Resolved build → download URL mapping. Keys are absent when the page had no matching link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: BTreeMap<Build, String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the URL for `build`, replacing any previous one.
    pub fn insert(&mut self, build: Build, url: impl Into<String>) {
        self.entries.insert(build, url.into());
    }

    pub fn get(&self, build: Build) -> Option<&str> {
        self.entries.get(&build).map(String::as_str)
    }

    /// Like `get`, but a missing link is an error.
    pub fn url(&self, build: Build) -> Result<&str> {
        self.get(build).ok_or(BsdlError::MissingKey(build))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries in classification order (win, linux, win-preview, linux-preview).
    pub fn iter(&self) -> impl Iterator<Item = (Build, &str)> {
        self.entries.iter().map(|(b, u)| (*b, u.as_str()))
    }
}
