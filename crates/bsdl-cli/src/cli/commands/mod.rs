//! CLI command handlers, one per operation.

mod download;
mod info;
mod latest;
mod snapshot;

pub use download::run_download;
pub use info::run_info;
pub use latest::run_latest;
pub use snapshot::run_snapshot;

#[cfg(test)]
pub(crate) use info::format_info;
