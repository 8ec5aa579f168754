//! An [`io::Write`] sink for handlers and middleware that build their response piecemeal.

use http::{HeaderMap, StatusCode};
use lux_event::Response;
use std::io;

/// Collects a status, headers and body written by a handler or middleware.
///
/// The first status written wins; writing body bytes without a status implies `200 OK`.
#[derive(Debug, Default)]
pub struct ResponseWriter {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl ResponseWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    pub fn write_status(&mut self, status: StatusCode) {
        self.status.get_or_insert(status);
    }

    /// Returns `true` once a status or any body bytes have been written, headers alone do not count
    pub fn is_written(&self) -> bool {
        self.status.is_some() || !self.body.is_empty()
    }

    pub fn into_response(self) -> Response {
        let body = String::from_utf8(self.body).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned());

        let mut response = Response::new(self.status.unwrap_or(StatusCode::OK), body);
        *response.headers_mut() = self.headers;
        response
    }
}

impl io::Write for ResponseWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.body.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
