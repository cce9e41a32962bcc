//! `versions.json`: catalog links plus the resolved release and preview versions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::catalog::Catalog;
use crate::error::{BsdlError, Result};
use crate::version::latest_version;

/// File name the snapshot is written under (in the working directory).
pub const SNAPSHOT_FILE: &str = "versions.json";
pub const VERSION_KEY: &str = "version";
pub const PREVIEW_VERSION_KEY: &str = "version-preview";

/// Flat string map: every catalog key → URL, plus `version` and `version-preview`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionsSnapshot {
    entries: BTreeMap<String, String>,
}

impl VersionsSnapshot {
    /// Fails if either version cannot be resolved from the catalog.
    pub fn build(catalog: &Catalog) -> Result<Self> {
        let mut entries: BTreeMap<String, String> = catalog
            .iter()
            .map(|(b, url)| (b.key().to_string(), url.to_string()))
            .collect();
        entries.insert(VERSION_KEY.to_string(), latest_version(catalog, false)?);
        entries.insert(
            PREVIEW_VERSION_KEY.to_string(),
            latest_version(catalog, true)?,
        );
        Ok(Self { entries })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Never zero: both version keys are always present.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.entries)?)
    }

    /// Overwrites `path` with the JSON object.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|e| BsdlError::io(path, e))?;
        tracing::info!(path = %path.display(), entries = self.len(), "wrote versions snapshot");
        Ok(())
    }

    pub fn read_from(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|e| BsdlError::io(path, e))?;
        Ok(serde_json::from_str(&data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Build;

    fn full_catalog() -> Catalog {
        let mut c = Catalog::new();
        let cdn = "https://minecraft.azureedge.net";
        c.insert(Build::Windows, format!("{cdn}/bin-win/bedrock-server-1.20.10.01.zip"));
        c.insert(Build::Linux, format!("{cdn}/bin-linux/bedrock-server-1.20.10.01.zip"));
        c.insert(
            Build::WinPreview,
            format!("{cdn}/bin-win-preview/bedrock-server-1.20.10.21.zip"),
        );
        c.insert(
            Build::LinuxPreview,
            format!("{cdn}/bin-linux-preview/bedrock-server-1.20.10.21.zip"),
        );
        c
    }

    #[test]
    fn snapshot_round_trips_through_file() {
        let catalog = full_catalog();
        let snap = VersionsSnapshot::build(&catalog).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SNAPSHOT_FILE);
        snap.write_to(&path).unwrap();

        let raw: BTreeMap<String, String> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let mut expected: Vec<&str> = Build::ALL.iter().map(|b| b.key()).collect();
        expected.extend([VERSION_KEY, PREVIEW_VERSION_KEY]);
        expected.sort_unstable();
        let got: Vec<&str> = raw.keys().map(String::as_str).collect();
        assert_eq!(got, expected);

        for (build, url) in catalog.iter() {
            assert_eq!(raw[build.key()], url);
        }
        assert_eq!(raw[VERSION_KEY], "1.20.10.01");
        assert_eq!(raw[PREVIEW_VERSION_KEY], "1.20.10.21");
        assert_eq!(VersionsSnapshot::read_from(&path).unwrap(), snap);
    }

    #[test]
    fn partial_catalog_keeps_only_found_keys() {
        let mut c = Catalog::new();
        c.insert(Build::Linux, "https://cdn.test/bin-linux/s-1.1.zip");
        c.insert(Build::LinuxPreview, "https://cdn.test/bin-linux-preview/s-1.2.zip");
        let snap = VersionsSnapshot::build(&c).unwrap();
        assert_eq!(snap.len(), 4);
        assert!(snap.get("win").is_none());
        assert_eq!(snap.get(VERSION_KEY), Some("1.1"));
        assert_eq!(snap.get(PREVIEW_VERSION_KEY), Some("1.2"));
    }

    #[test]
    fn missing_preview_fails() {
        let mut c = Catalog::new();
        c.insert(Build::Linux, "https://cdn.test/bin-linux/s-1.1.zip");
        assert!(matches!(
            VersionsSnapshot::build(&c),
            Err(BsdlError::MissingKey(Build::LinuxPreview))
        ));
    }
}
