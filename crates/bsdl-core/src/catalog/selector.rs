//! Build selector: the four vendor binary flavours.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// One of the four server builds offered by the vendor page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Build {
    #[serde(rename = "win")]
    Windows,
    #[serde(rename = "linux")]
    Linux,
    #[serde(rename = "win-preview")]
    WinPreview,
    #[serde(rename = "linux-preview")]
    LinuxPreview,
}

impl Build {
    /// All builds, in classification order.
    pub const ALL: [Build; 4] = [
        Build::Windows,
        Build::Linux,
        Build::WinPreview,
        Build::LinuxPreview,
    ];

    /// Catalog / snapshot key.
    pub fn key(self) -> &'static str {
        match self {
            Build::Windows => "win",
            Build::Linux => "linux",
            Build::WinPreview => "win-preview",
            Build::LinuxPreview => "linux-preview",
        }
    }

    /// Name accepted on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Build::Windows => "WINDOWS",
            Build::Linux => "LINUX",
            Build::WinPreview => "WIN-PREVIEW",
            Build::LinuxPreview => "LINUX-PREVIEW",
        }
    }
}

impl fmt::Display for Build {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A build name that is not one of `WINDOWS`, `LINUX`, `WIN-PREVIEW`, `LINUX-PREVIEW`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown build type {0:?} (expected WINDOWS, LINUX, WIN-PREVIEW or LINUX-PREVIEW)")]
pub struct UnknownBuild(pub String);

impl FromStr for Build {
    type Err = UnknownBuild;

    /// Case-sensitive exact match on the command-line names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Build::ALL
            .into_iter()
            .find(|b| b.name() == s)
            .ok_or_else(|| UnknownBuild(s.to_string()))
    }
}
