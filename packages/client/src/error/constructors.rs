use std::path::Path;

use super::types::{Error, Kind};

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Creates an `Error` for a builder error.
pub fn builder<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Builder).with(e.into())
}

/// Creates an `Error` for an attachment that could not be read.
pub fn attachment<E: Into<BoxError>>(e: E, path: &Path) -> Error {
    Error::new(Kind::Attachment).with(e.into()).with_path(path)
}

/// Creates an `Error` for a payload that could not be encoded.
pub fn encode<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Encode).with(e.into())
}

/// Creates an `Error` for a local file that could not be written.
pub fn io<E: Into<BoxError>>(e: E, path: &Path) -> Error {
    Error::new(Kind::Io).with(e.into()).with_path(path)
}

pub fn missing_url() -> Error {
    builder("no target URL configured")
}
