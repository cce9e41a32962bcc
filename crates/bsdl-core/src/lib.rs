pub mod config;
pub mod logging;

pub mod cache;
pub mod catalog;
pub mod downloader;
pub mod error;
pub mod http;
pub mod progress;
pub mod snapshot;
pub mod storage;
pub mod url_model;
pub mod version;

pub use error::{BsdlError, Result};
