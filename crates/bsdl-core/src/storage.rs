//! Destination file lifecycle.
//!
//! The body is written to `<final>.part`; on success the temp file is synced
//! and renamed over the final name, on failure it is removed so a half-written
//! build is never mistaken for a complete one.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{BsdlError, Result};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Sequential writer for one download. The file handle is closed on every exit path.
pub struct StorageWriter {
    file: File,
    temp_path: PathBuf,
}

impl StorageWriter {
    /// Create (or truncate) the temp file at `temp_path`.
    pub fn create(temp_path: &Path) -> Result<Self> {
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(temp_path)
            .map_err(|e| BsdlError::io(temp_path, e))?;
        Ok(StorageWriter {
            file,
            temp_path: temp_path.to_path_buf(),
        })
    }

    /// Sync to disk and atomically rename to `final_path`. Consumes the writer and closes the file.
    /// On any error the temp file is removed.
    pub fn finalize(self, final_path: &Path) -> Result<()> {
        let temp_path = self.temp_path;
        let synced = self.file.sync_all();
        drop(self.file);

        let result = match synced {
            Err(e) => Err(BsdlError::io(&temp_path, e)),
            Ok(()) => std::fs::rename(&temp_path, final_path)
                .map_err(|e| BsdlError::io(final_path, e)),
        };
        if result.is_err() {
            remove_partial(&temp_path);
        }
        result
    }

    /// Close and delete the temp file.
    pub fn discard(self) {
        let temp_path = self.temp_path;
        drop(self.file);
        remove_partial(&temp_path);
    }
}

fn remove_partial(temp_path: &Path) {
    if let Err(e) = std::fs::remove_file(temp_path) {
        tracing::warn!(path = %temp_path.display(), "failed to remove partial file: {}", e);
    }
}

impl Write for StorageWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

/// Path for the temp file: appends `.part` to the final path (e.g. `server.zip` → `server.zip.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}
