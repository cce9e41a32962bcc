//! Catalog sources: the live vendor page, or fixed markup.
//!
//! The cache only depends on `CatalogSource`; it does not know whether the
//! markup came from the network or from a file.

use crate::config::BsdlConfig;
use crate::error::{BsdlError, Result};
use crate::http::{self, RequestOptions};

use super::{classify, extract_links, Catalog, LinkFilter};

/// Anything that can produce a fresh catalog.
pub trait CatalogSource {
    fn extract(&self) -> Result<Catalog>;
}

/// Scrapes the vendor download page over HTTP.
#[derive(Debug, Clone)]
pub struct PageSource {
    pub page_url: String,
    pub cdn_prefix: String,
    pub filter: LinkFilter,
    pub request: RequestOptions,
}

impl PageSource {
    pub fn from_config(cfg: &BsdlConfig) -> Self {
        Self {
            page_url: cfg.page_url.clone(),
            cdn_prefix: cfg.cdn_prefix.clone(),
            filter: LinkFilter::from_class(cfg.link_class.as_deref()),
            request: RequestOptions::from_config(cfg),
        }
    }
}

impl CatalogSource for PageSource {
    fn extract(&self) -> Result<Catalog> {
        tracing::info!(url = %self.page_url, "fetching download page");
        let body = http::fetch_page(&self.page_url, &self.request)?;
        let links = extract_links(&body, &self.filter, &self.cdn_prefix)?;
        if links.is_empty() {
            tracing::warn!(prefix = %self.cdn_prefix, "page contained no CDN download links");
        }
        Ok(classify(&links))
    }
}

/// Markup that is already in hand (a saved page, a test fixture).
#[derive(Debug, Clone)]
pub struct HtmlSource {
    pub html: String,
    pub cdn_prefix: String,
    pub filter: LinkFilter,
}

impl HtmlSource {
    pub fn new(html: impl Into<String>, cdn_prefix: impl Into<String>, filter: LinkFilter) -> Self {
        Self {
            html: html.into(),
            cdn_prefix: cdn_prefix.into(),
            filter,
        }
    }

    /// Reads a saved page from disk, filtering as configured.
    pub fn from_file(path: &std::path::Path, cfg: &BsdlConfig) -> Result<Self> {
        let html = std::fs::read_to_string(path).map_err(|e| BsdlError::io(path, e))?;
        Ok(Self::new(
            html,
            cfg.cdn_prefix.clone(),
            LinkFilter::from_class(cfg.link_class.as_deref()),
        ))
    }
}

impl CatalogSource for HtmlSource {
    fn extract(&self) -> Result<Catalog> {
        let links = extract_links(&self.html, &self.filter, &self.cdn_prefix)?;
        Ok(classify(&links))
    }
}
