use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Vendor page listing the dedicated server downloads.
pub const DEFAULT_PAGE_URL: &str = "https://minecraft.net/en-us/download/server/bedrock";
/// Only links under this CDN host are treated as build downloads.
pub const DEFAULT_CDN_PREFIX: &str = "https://minecraft.azureedge.net/";
/// Class signature of the download buttons on the vendor page.
pub const DEFAULT_LINK_CLASS: &str = "btn btn-disabled-outline mt-4 downloadlink";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:109.0) Gecko/20100101 Firefox/109.0";
pub const DEFAULT_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";
pub const DEFAULT_ACCEPT_ENCODING: &str = "gzip, deflate";

/// Where a download lands when no destination directory is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DestinationDefault {
    /// The process working directory.
    #[default]
    Cwd,
    /// The directory containing the running executable.
    ExeDir,
}

/// Global configuration loaded from `~/.config/bsdl/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BsdlConfig {
    /// Page scraped for download links.
    pub page_url: String,
    /// Substring a link must contain to be considered a build download.
    pub cdn_prefix: String,
    /// Only anchors carrying all of these classes are scanned. Unset = every anchor.
    pub link_class: Option<String>,
    pub user_agent: String,
    pub accept: String,
    /// Sent as `Accept-Encoding`; libcurl decodes the response transparently.
    pub accept_encoding: String,
    pub destination: DestinationDefault,
    pub connect_timeout_secs: u64,
    /// Whole-request timeout for the page fetch.
    pub page_timeout_secs: u64,
    /// A download slower than 1 KiB/s for this long is aborted.
    pub download_low_speed_secs: u64,
}

impl Default for BsdlConfig {
    fn default() -> Self {
        Self {
            page_url: DEFAULT_PAGE_URL.to_string(),
            cdn_prefix: DEFAULT_CDN_PREFIX.to_string(),
            link_class: Some(DEFAULT_LINK_CLASS.to_string()),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept: DEFAULT_ACCEPT.to_string(),
            accept_encoding: DEFAULT_ACCEPT_ENCODING.to_string(),
            destination: DestinationDefault::Cwd,
            connect_timeout_secs: 15,
            page_timeout_secs: 30,
            download_low_speed_secs: 60,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("bsdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<BsdlConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = BsdlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load configuration from an explicit path. The file must exist.
pub fn load_from(path: &Path) -> Result<BsdlConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg: BsdlConfig =
        toml::from_str(&data).with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}
