use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;

/// A Result alias where the Err case is `cekmutasi_client::Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// Local failures raised while preparing or finishing a request.
///
/// Network failures are not represented here: they are reported as data on
/// [`RawTransportResponse`](crate::RawTransportResponse).
pub struct Error {
    pub inner: Box<Inner>,
}

pub struct Inner {
    pub kind: Kind,
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Kind {
    /// Missing or unusable request configuration
    #[error("builder error")]
    Builder,
    /// Multipart attachment could not be read or described
    #[error("attachment error")]
    Attachment,
    /// Payload could not be encoded for the wire
    #[error("payload encoding error")]
    Encode,
    /// Local file could not be written (download target, debug log, cookie jar)
    #[error("i/o error")]
    Io,
}

impl Error {
    pub fn new(kind: Kind) -> Error {
        Error {
            inner: Box::new(Inner {
                kind,
                source: None,
                path: None,
            }),
        }
    }

    #[must_use = "Error builder methods return a new Error and should be used"]
    pub fn with<E: Into<Box<dyn StdError + Send + Sync>>>(mut self, source: E) -> Error {
        self.inner.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.inner.path = Some(path.into());
        self
    }

    #[must_use]
    pub fn kind(&self) -> &Kind {
        &self.inner.kind
    }

    /// Get the local file associated with this error, if any
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        self.inner.path.as_deref()
    }

    #[must_use]
    pub fn is_builder(&self) -> bool {
        self.inner.kind == Kind::Builder
    }

    #[must_use]
    pub fn is_attachment(&self) -> bool {
        self.inner.kind == Kind::Attachment
    }

    #[must_use]
    pub fn is_io(&self) -> bool {
        self.inner.kind == Kind::Io
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_struct("cekmutasi_client::Error");

        f.field("kind", &self.inner.kind);

        if let Some(ref source) = self.inner.source {
            f.field("source", source);
        }

        if let Some(ref path) = self.inner.path {
            f.field("path", path);
        }

        f.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner.kind, f)?;

        if let Some(ref path) = self.inner.path {
            write!(f, " ({})", path.display())?;
        }

        if let Some(ref source) = self.inner.source {
            write!(f, ": {source}")?;
        }

        Ok(())
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
