//! Download Manager: resolve a build to its URL and stream it to disk.
//!
//! The body goes to `<name>.part` in the destination directory and is renamed
//! into place only after the whole transfer succeeded. Any failure removes the
//! temp file and is returned as an error, never as a path.

mod stream;

pub use stream::{fetch_to_writer, CHUNK_SIZE};

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::catalog::{Build, Catalog};
use crate::config::{BsdlConfig, DestinationDefault};
use crate::error::{BsdlError, Result};
use crate::progress::ProgressReporter;
use crate::storage::{self, StorageWriter};
use crate::url_model;

/// Per-download transfer settings.
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    pub user_agent: String,
    pub connect_timeout: Duration,
    /// Abort when the rate stays under 1 KiB/s for this long.
    pub low_speed_time: Duration,
    /// Directory used when the caller gives none.
    pub destination: DestinationDefault,
}

impl DownloadOptions {
    pub fn from_config(cfg: &BsdlConfig) -> Self {
        Self {
            user_agent: cfg.user_agent.clone(),
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            low_speed_time: Duration::from_secs(cfg.download_low_speed_secs),
            destination: cfg.destination,
        }
    }
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self::from_config(&BsdlConfig::default())
    }
}

/// Absolute destination directory: `dir` if given, else the configured default.
pub fn resolve_destination(dir: Option<&Path>, default: DestinationDefault) -> Result<PathBuf> {
    let cwd = || std::env::current_dir().map_err(|e| BsdlError::io(".", e));
    match dir {
        Some(d) if d.is_absolute() => Ok(d.to_path_buf()),
        Some(d) => Ok(cwd()?.join(d)),
        None => match default {
            DestinationDefault::Cwd => cwd(),
            DestinationDefault::ExeDir => {
                let exe = std::env::current_exe().map_err(|e| BsdlError::io("<current exe>", e))?;
                exe.parent().map(Path::to_path_buf).ok_or_else(|| {
                    BsdlError::io(
                        &exe,
                        std::io::Error::new(
                            std::io::ErrorKind::NotFound,
                            "executable has no parent directory",
                        ),
                    )
                })
            }
        },
    }
}

/// Downloads `build` from the catalog into `dest_dir` (or the configured default).
/// Returns the absolute path of the written file.
pub fn download_build(
    catalog: &Catalog,
    build: Build,
    dest_dir: Option<&Path>,
    opts: &DownloadOptions,
    progress: &dyn ProgressReporter,
) -> Result<PathBuf> {
    let url = catalog.url(build)?;
    let name =
        url_model::file_name_from_url(url).ok_or_else(|| BsdlError::InvalidUrl(url.to_string()))?;
    let dir = resolve_destination(dest_dir, opts.destination)?;
    let final_path = dir.join(&name);
    tracing::info!(build = %build, url, dest = %final_path.display(), "starting download");

    let mut writer = StorageWriter::create(&storage::temp_path(&final_path))?;
    match fetch_to_writer(url, &mut writer, opts, progress) {
        Ok(bytes) => {
            if let Err(e) = writer.finalize(&final_path) {
                progress.fail("Download failed!");
                return Err(e);
            }
            progress.finish("Download complete!");
            tracing::info!(bytes, path = %final_path.display(), "download complete");
            Ok(final_path)
        }
        Err(e) => {
            tracing::warn!(build = %build, "download failed: {}", e);
            writer.discard();
            progress.fail("Download failed!");
            Err(e)
        }
    }
}
