//! Tracing setup. Events go to `~/.local/state/bsdl/bsdl.log`; when that file
//! cannot be opened they go to stderr instead, so logging never stops the CLI.

use std::fmt;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,bsdl=debug,bsdl_core=debug";
const LOG_FILE: &str = "bsdl.log";

/// Where log events ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    File(PathBuf),
    /// The log file was unavailable; carries the reason.
    Stderr(String),
}

impl fmt::Display for LogSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogSink::File(path) => write!(f, "{}", path.display()),
            LogSink::Stderr(reason) => write!(f, "stderr ({reason})"),
        }
    }
}

/// Install the global subscriber. Safe to call more than once; later calls
/// leave the first subscriber in place.
pub fn init_logging() -> LogSink {
    let filter = build_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref());
    let opened = xdg::BaseDirectories::with_prefix("bsdl")
        .context("no XDG base directories")
        .and_then(|dirs| {
            let path = dirs
                .place_state_file(LOG_FILE)
                .context("create log dir")?;
            let file = open_log_file(&path)?;
            Ok((path, file))
        });

    match opened {
        Ok((path, file)) => {
            install(filter, Mutex::new(file));
            tracing::info!(path = %path.display(), "bsdl logging initialized");
            LogSink::File(path)
        }
        Err(err) => {
            install(filter, io::stderr);
            let reason = format!("{err:#}");
            tracing::warn!("file logging unavailable, using stderr: {}", reason);
            LogSink::Stderr(reason)
        }
    }
}

fn install<W>(filter: EnvFilter, writer: W)
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init();
}

/// Open `path` for appending, creating its directory first.
fn open_log_file(path: &Path) -> anyhow::Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create log dir {}", dir.display()))?;
    }
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))
}

/// `RUST_LOG` when it parses, the crate default otherwise.
fn build_filter(env: Option<&str>) -> EnvFilter {
    env.filter(|s| !s.trim().is_empty())
        .and_then(|s| EnvFilter::try_new(s).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}
