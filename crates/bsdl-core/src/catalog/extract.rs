//! Anchor extraction from the vendor page markup.

use scraper::{Html, Selector};

use crate::error::{BsdlError, Result};

/// Which anchors are scanned for download links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkFilter {
    /// Every `<a href>` on the page.
    AllAnchors,
    /// Only anchors carrying every whitespace-separated class in the signature.
    Class(String),
}

impl LinkFilter {
    /// `Some(signature)` selects class filtering; `None` or a blank signature scans all anchors.
    pub fn from_class(signature: Option<&str>) -> Self {
        match signature.map(str::trim) {
            Some(s) if !s.is_empty() => LinkFilter::Class(s.to_string()),
            _ => LinkFilter::AllAnchors,
        }
    }
}

/// Returns the `href` of every matching anchor that contains `cdn_prefix`, in document order.
pub fn extract_links(html: &str, filter: &LinkFilter, cdn_prefix: &str) -> Result<Vec<String>> {
    let selector = Selector::parse("a[href]")
        .map_err(|e| BsdlError::Parse(format!("anchor selector: {e:?}")))?;
    let document = Html::parse_document(html);

    let required: Vec<&str> = match filter {
        LinkFilter::AllAnchors => Vec::new(),
        LinkFilter::Class(signature) => signature.split_whitespace().collect(),
    };

    let mut anchors = 0usize;
    let mut links = Vec::new();
    for element in document.select(&selector) {
        let el = element.value();
        if !required.iter().all(|class| el.classes().any(|c| c == *class)) {
            continue;
        }
        anchors += 1;
        if let Some(href) = el.attr("href") {
            if href.contains(cdn_prefix) {
                links.push(href.to_string());
            }
        }
    }
    tracing::debug!(anchors, links = links.len(), ?filter, "extracted links");
    Ok(links)
}
