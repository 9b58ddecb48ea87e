use std::error::Error as StdError;
use std::fmt;

/// A Result alias where the Err case is `parley_client::Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents errors that can occur while executing a request.
pub struct Error {
    inner: Box<Inner>,
}

struct Inner {
    kind: Kind,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

/// Failure classification for request execution.
///
/// `Protocol`, `Io` and `Unexpected` are the kinds collaborators raise and
/// that the execution layer propagates unchanged; `Builder` and `Body` are
/// produced locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Invalid configuration or request construction
    Builder,
    /// HTTP protocol violation reported by message processing
    Protocol,
    /// Transport failure while sending, receiving or draining
    Io,
    /// Request or response body error
    Body,
    /// Unclassified fault raised by a collaborator
    Unexpected,
}

impl Error {
    pub fn new(kind: Kind) -> Error {
        Error {
            inner: Box::new(Inner { kind, source: None }),
        }
    }

    #[must_use = "Error builder methods return a new Error and should be used"]
    pub fn with<E: Into<Box<dyn StdError + Send + Sync>>>(mut self, source: E) -> Error {
        self.inner.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.inner.kind
    }

    /// True if this error carries a protocol violation.
    #[must_use]
    pub fn is_protocol(&self) -> bool {
        matches!(self.inner.kind, Kind::Protocol)
    }

    /// True if this error carries a transport failure.
    #[must_use]
    pub fn is_io(&self) -> bool {
        matches!(self.inner.kind, Kind::Io)
    }

    /// True if this error carries an unclassified collaborator fault.
    #[must_use]
    pub fn is_unexpected(&self) -> bool {
        matches!(self.inner.kind, Kind::Unexpected)
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_struct("parley::Error");

        f.field("kind", &self.inner.kind);

        if let Some(ref source) = self.inner.source {
            f.field("source", source);
        }

        f.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.kind {
            Kind::Builder => f.write_str("builder error"),
            Kind::Protocol => f.write_str("HTTP protocol violation"),
            Kind::Io => f.write_str("I/O error during request execution"),
            Kind::Body => f.write_str("request or response body error"),
            Kind::Unexpected => f.write_str("unexpected execution fault"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner
            .source
            .as_ref()
            .map(|err| &**err as &(dyn StdError + 'static))
    }
}
