//! Streaming GET: response body → writer in fixed-size chunks.

use std::io::{self, Write};
use std::str;

use crate::error::{BsdlError, Result};
use crate::progress::ProgressReporter;

use super::DownloadOptions;

/// Body bytes are written and reported in chunks of this size.
pub const CHUNK_SIZE: usize = 1024;

/// Easy2 handler that collects the final response's headers and streams the body.
struct BodyHandler<'a, W: Write> {
    writer: W,
    progress: &'a dyn ProgressReporter,
    label: &'a str,
    response_headers: Vec<String>,
    /// None = body not started; Some(false) = non-2xx, body refused.
    status_ok: Option<bool>,
    content_length: Option<u64>,
    written: u64,
    write_error: Option<io::Error>,
}

impl<W: Write> curl::easy::Handler for BodyHandler<'_, W> {
    fn header(&mut self, data: &[u8]) -> bool {
        if let Ok(s) = str::from_utf8(data) {
            let line = s.trim_end();
            // A new status line starts a new response (redirects).
            if line.starts_with("HTTP/") {
                self.response_headers.clear();
            }
            if !line.is_empty() {
                self.response_headers.push(line.to_string());
            }
        }
        true
    }

    fn write(&mut self, data: &[u8]) -> std::result::Result<usize, curl::easy::WriteError> {
        if self.status_ok.is_none() {
            let ok = parse_status(&self.response_headers)
                .map(|code| (200..300).contains(&code))
                .unwrap_or(false);
            self.status_ok = Some(ok);
            if ok {
                self.content_length = parse_content_length(&self.response_headers);
                self.progress.start(self.label, self.content_length);
            }
        }
        if self.status_ok == Some(false) {
            return Ok(0);
        }
        for chunk in data.chunks(CHUNK_SIZE) {
            if let Err(e) = self.writer.write_all(chunk) {
                tracing::warn!("download write failed: {}", e);
                self.write_error = Some(e);
                return Ok(0); // abort transfer
            }
            self.written += chunk.len() as u64;
            self.progress.advance(chunk.len() as u64);
        }
        Ok(data.len())
    }
}

/// Downloads `url` into `writer`, reporting progress per written chunk.
/// Returns the number of bytes written.
///
/// The transfer fails if the server answers non-2xx, the stream drops, the body
/// is shorter than the announced `Content-Length`, or the writer errors.
pub fn fetch_to_writer<W: Write>(
    url: &str,
    writer: W,
    opts: &DownloadOptions,
    progress: &dyn ProgressReporter,
) -> Result<u64> {
    let handler = BodyHandler {
        writer,
        progress,
        label: url.rsplit('/').next().unwrap_or(url),
        response_headers: Vec::new(),
        status_ok: None,
        content_length: None,
        written: 0,
        write_error: None,
    };
    let mut easy = curl::easy::Easy2::new(handler);
    easy.url(url)?;
    easy.get(true)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.useragent(&opts.user_agent)?;
    easy.connect_timeout(opts.connect_timeout)?;
    easy.low_speed_limit(1024)?;
    easy.low_speed_time(opts.low_speed_time)?;

    let performed = easy.perform();

    // 0 when no response arrived at all.
    let status = easy.response_code().unwrap_or(0);
    let http_error = || BsdlError::Http {
        url: url.to_string(),
        status,
    };
    let handler = easy.get_mut();
    if let Some(e) = handler.write_error.take() {
        return Err(BsdlError::Write(e));
    }
    if let Err(e) = performed {
        if handler.status_ok == Some(false) {
            return Err(http_error());
        }
        return Err(e.into());
    }
    if !(200..300).contains(&status) {
        return Err(http_error());
    }

    handler.writer.flush().map_err(BsdlError::Write)?;
    if handler.status_ok.is_none() {
        // Empty body: the write callback never ran.
        handler.content_length = parse_content_length(&handler.response_headers);
        progress.start(handler.label, handler.content_length);
    }
    if let Some(expected) = handler.content_length {
        if handler.written != expected {
            return Err(BsdlError::Write(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("partial transfer: wrote {} of {} bytes", handler.written, expected),
            )));
        }
    }
    Ok(handler.written)
}

/// Status code from the first header line (`HTTP/1.1 200 OK`).
fn parse_status(lines: &[String]) -> Option<u32> {
    lines
        .first()?
        .split_whitespace()
        .nth(1)?
        .parse()
        .ok()
}

fn parse_content_length(lines: &[String]) -> Option<u64> {
    lines.iter().find_map(|line| {
        let (name, value) = line.split_once(':')?;
        if name.trim().eq_ignore_ascii_case("content-length") {
            value.trim().parse().ok()
        } else {
            None
        }
    })
}
