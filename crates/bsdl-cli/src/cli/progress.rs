//! Terminal progress for downloads (indicatif).
//!
//! A byte bar when the server announced `Content-Length`, a spinner otherwise.

use bsdl_core::progress::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

pub struct BarProgress {
    bar: Mutex<Option<ProgressBar>>,
}

impl BarProgress {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn sized(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        if let Ok(style) = ProgressStyle::with_template(
            "{msg} [{bar:40.green/white}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})",
        ) {
            pb.set_style(style.progress_chars("=> "));
        }
        pb
    }

    fn spinner() -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg} {bytes} ({bytes_per_sec})") {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(120));
        pb
    }

    fn take(&self) -> Option<ProgressBar> {
        self.bar.lock().unwrap_or_else(|e| e.into_inner()).take()
    }
}

impl Default for BarProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for BarProgress {
    fn start(&self, label: &str, total: Option<u64>) {
        let pb = match total {
            Some(n) => Self::sized(n),
            None => Self::spinner(),
        };
        pb.set_message(format!("Downloading {label}"));
        *self.bar.lock().unwrap_or_else(|e| e.into_inner()) = Some(pb);
    }

    fn advance(&self, bytes: u64) {
        if let Some(pb) = self.bar.lock().unwrap_or_else(|e| e.into_inner()).as_ref() {
            pb.inc(bytes);
        }
    }

    fn finish(&self, message: &str) {
        if let Some(pb) = self.take() {
            pb.finish_with_message(message.to_string());
        }
    }

    fn fail(&self, message: &str) {
        match self.take() {
            Some(pb) => pb.abandon_with_message(message.to_string()),
            None => eprintln!("{message}"),
        }
    }
}
