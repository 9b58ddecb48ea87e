use super::types::{Error, Kind};

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Creates an `Error` for a builder error.
pub fn builder<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Builder).with(e.into())
}

/// Creates an `Error` for an HTTP protocol violation.
pub fn protocol<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Protocol).with(e.into())
}

/// Creates an `Error` for a transport failure.
pub fn io<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Io).with(e.into())
}

/// Creates an `Error` for a body error.
pub fn body<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Body).with(e.into())
}

/// Creates an `Error` for an unclassified collaborator fault.
pub fn unexpected<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Unexpected).with(e.into())
}
