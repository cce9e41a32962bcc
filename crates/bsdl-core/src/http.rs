//! Blocking page fetch over libcurl.
//!
//! The vendor page serves different markup depending on client headers, so the
//! request always carries a browser-like `Accept`, `Accept-Encoding` and `User-Agent`.

use std::time::Duration;

use crate::config::BsdlConfig;
use crate::error::{BsdlError, Result};

/// Header set and timeouts for the page request.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub user_agent: String,
    pub accept: String,
    pub accept_encoding: String,
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

impl RequestOptions {
    pub fn from_config(cfg: &BsdlConfig) -> Self {
        Self {
            user_agent: cfg.user_agent.clone(),
            accept: cfg.accept.clone(),
            accept_encoding: cfg.accept_encoding.clone(),
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            timeout: Duration::from_secs(cfg.page_timeout_secs),
        }
    }
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::from_config(&BsdlConfig::default())
    }
}

/// GETs `url` and returns the decoded body as text.
///
/// Follows redirects. Runs in the current thread.
pub fn fetch_page(url: &str, opts: &RequestOptions) -> Result<String> {
    let mut body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(opts.connect_timeout)?;
    easy.timeout(opts.timeout)?;
    easy.useragent(&opts.user_agent)?;
    // Sends Accept-Encoding and lets libcurl decompress.
    easy.accept_encoding(&opts.accept_encoding)?;

    let mut list = curl::easy::List::new();
    list.append(&format!("Accept: {}", opts.accept.trim()))?;
    easy.http_headers(list)?;

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let status = easy.response_code()?;
    if !(200..300).contains(&status) {
        return Err(BsdlError::Http {
            url: url.to_string(),
            status,
        });
    }
    tracing::debug!(url, status, bytes = body.len(), "page fetched");

    String::from_utf8(body).map_err(|e| BsdlError::Parse(format!("page is not UTF-8: {e}")))
}
