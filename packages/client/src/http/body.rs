//! Request and response payloads
//!
//! Request bodies expose a repeatability capability that gates authentication
//! retries; response bodies track whether they have been drained and released,
//! which gates connection reuse.

use std::io::{self, Read};

use bytes::Bytes;

/// An outbound request payload.
///
/// `Bytes`, `Text` and `Json` payloads can be regenerated for a retry.
/// `Stream` payloads can be sent once; after the underlying reader has been
/// taken the body counts as consumed and the request can no longer be
/// replayed.
pub enum RequestBody {
    /// Raw bytes
    Bytes(Bytes),
    /// Text content
    Text(String),
    /// JSON data
    Json(serde_json::Value),
    /// One-shot streaming body
    Stream(StreamBody),
}

impl RequestBody {
    /// Whether this payload can be regenerated for a retry.
    #[must_use]
    pub fn is_repeatable(&self) -> bool {
        !matches!(self, RequestBody::Stream(_))
    }

    /// Whether a one-shot payload has already been handed to the transport.
    ///
    /// Repeatable payloads never count as consumed.
    #[must_use]
    pub fn is_consumed(&self) -> bool {
        match self {
            RequestBody::Stream(stream) => stream.is_consumed(),
            _ => false,
        }
    }

    /// Materialize a repeatable payload. Returns `None` for streaming bodies.
    #[must_use]
    pub fn as_bytes(&self) -> Option<Bytes> {
        match self {
            RequestBody::Bytes(bytes) => Some(bytes.clone()),
            RequestBody::Text(text) => Some(Bytes::copy_from_slice(text.as_bytes())),
            RequestBody::Json(value) => Some(Bytes::from(value.to_string())),
            RequestBody::Stream(_) => None,
        }
    }
}

impl std::fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestBody::Bytes(bytes) => f
                .debug_tuple("Bytes")
                .field(&format!("{} bytes", bytes.len()))
                .finish(),
            RequestBody::Text(text) => f
                .debug_tuple("Text")
                .field(&format!("{} chars", text.len()))
                .finish(),
            RequestBody::Json(value) => f.debug_tuple("Json").field(value).finish(),
            RequestBody::Stream(stream) => f
                .debug_tuple("Stream")
                .field(&if stream.is_consumed() { "consumed" } else { "pending" })
                .finish(),
        }
    }
}

impl From<Bytes> for RequestBody {
    fn from(bytes: Bytes) -> Self {
        RequestBody::Bytes(bytes)
    }
}

impl From<String> for RequestBody {
    fn from(text: String) -> Self {
        RequestBody::Text(text)
    }
}

impl From<&str> for RequestBody {
    fn from(text: &str) -> Self {
        RequestBody::Text(text.to_owned())
    }
}

impl From<serde_json::Value> for RequestBody {
    fn from(value: serde_json::Value) -> Self {
        RequestBody::Json(value)
    }
}

/// One-shot streaming request payload.
pub struct StreamBody {
    reader: Option<Box<dyn Read + Send>>,
}

impl StreamBody {
    pub fn new(reader: Box<dyn Read + Send>) -> Self {
        Self {
            reader: Some(reader),
        }
    }

    /// Hand the underlying reader to the transport, marking the body consumed.
    pub fn take_reader(&mut self) -> Option<Box<dyn Read + Send>> {
        self.reader.take()
    }

    #[must_use]
    pub fn is_consumed(&self) -> bool {
        self.reader.is_none()
    }
}

/// An inbound response payload.
///
/// The execution layer fully drains and releases a body it does not hand back
/// to the caller; the body returned with the final response is left open.
pub struct ResponseBody {
    source: Option<BodySource>,
}

enum BodySource {
    Bytes(Bytes),
    Reader(Box<dyn Read + Send>),
}

impl ResponseBody {
    /// A body with no content. It still counts as open until drained.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_bytes(Bytes::new())
    }

    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        Self {
            source: Some(BodySource::Bytes(bytes.into())),
        }
    }

    pub fn from_reader(reader: Box<dyn Read + Send>) -> Self {
        Self {
            source: Some(BodySource::Reader(reader)),
        }
    }

    /// Whether the body content is still available to the caller.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.source.is_some()
    }

    /// Read the remaining content to the end and release the source.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the source cannot be read to the
    /// end, in which case the connection that produced it must not be reused.
    pub fn drain(&mut self) -> io::Result<()> {
        match self.source.take() {
            None | Some(BodySource::Bytes(_)) => Ok(()),
            Some(BodySource::Reader(mut reader)) => {
                let mut sink = [0u8; 4096];
                loop {
                    if reader.read(&mut sink)? == 0 {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Consume the body into memory, releasing the source.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the source cannot be read.
    pub fn into_bytes(mut self) -> io::Result<Bytes> {
        match self.source.take() {
            None => Ok(Bytes::new()),
            Some(BodySource::Bytes(bytes)) => Ok(bytes),
            Some(BodySource::Reader(mut reader)) => {
                let mut buf = Vec::new();
                reader.read_to_end(&mut buf)?;
                Ok(Bytes::from(buf))
            }
        }
    }
}

impl Read for ResponseBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.source {
            None => Ok(0),
            Some(BodySource::Bytes(ref mut bytes)) => {
                let n = bytes.len().min(buf.len());
                buf[..n].copy_from_slice(&bytes.split_to(n));
                Ok(n)
            }
            Some(BodySource::Reader(ref mut reader)) => reader.read(buf),
        }
    }
}

impl std::fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self.source {
            None => "drained",
            Some(BodySource::Bytes(_)) => "bytes",
            Some(BodySource::Reader(_)) => "streaming",
        };
        f.debug_tuple("ResponseBody").field(&state).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    struct EofFlagReader {
        data: io::Cursor<Vec<u8>>,
        eof_seen: Arc<AtomicBool>,
    }

    impl Read for EofFlagReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.data.read(buf)?;
            if n == 0 {
                self.eof_seen.store(true, Ordering::SeqCst);
            }
            Ok(n)
        }
    }

    #[test]
    fn drain_reads_reader_to_end_and_releases() {
        let eof_seen = Arc::new(AtomicBool::new(false));
        let mut body = ResponseBody::from_reader(Box::new(EofFlagReader {
            data: io::Cursor::new(vec![1, 2, 3]),
            eof_seen: Arc::clone(&eof_seen),
        }));

        assert!(body.is_open());
        body.drain().expect("drain should succeed");
        assert!(!body.is_open());
        assert!(eof_seen.load(Ordering::SeqCst));
    }

    #[test]
    fn stream_request_body_is_consumed_once_taken() {
        let stream = StreamBody::new(Box::new(io::Cursor::new(vec![1, 2, 3])));
        let mut body = RequestBody::Stream(stream);
        assert!(!body.is_repeatable());
        assert!(!body.is_consumed());

        if let RequestBody::Stream(ref mut inner) = body {
            assert!(inner.take_reader().is_some());
            assert!(inner.take_reader().is_none());
        }
        assert!(body.is_consumed());
    }

    #[test]
    fn repeatable_bodies_materialize() {
        let body = RequestBody::from("payload");
        assert!(body.is_repeatable());
        assert_eq!(body.as_bytes().expect("text is repeatable"), "payload");
    }
}
