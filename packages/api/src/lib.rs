//! # cekmutasi
//!
//! Blocking HTTP client for the cekmutasi bank and payment mutation API,
//! built on a fluent request builder.
//!
//! ## Features
//!
//! - **Fluent builder**: chain configuration calls, finish with a terminal
//!   method (`get`, `post`, `put`, `patch`, `delete`, `head`, `download`)
//! - **Form, JSON and multipart bodies**
//! - **Structured results**: status, content type, headers and transport
//!   errors reported as data
//! - **Cookie files, proxies, debug traces**
//! - **Bank wrapper** for account management and mutation search
//!
//! ## Examples
//!
//! ```no_run
//! use cekmutasi::RequestBuilder;
//!
//! let result = RequestBuilder::new()
//!     .to("https://api.example.com/users")
//!     .with_data([("page", 1)])
//!     .as_json_response(false)
//!     .return_response_object()
//!     .get()?
//!     .into_object();
//! # Ok::<(), cekmutasi::Error>(())
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod bank;
pub mod builder;
pub mod response;

pub use bank::{AddAccount, Bank, BankConfig, BankSearch, DateRange, PaypalSearch, UpdateAccount};
pub use builder::*;
pub use response::{Content, Response, StructuredResult};

// Re-export the transport types that appear in the builder's API
pub use cekmutasi_client::{
    Error, FileAttachment, HeaderFields, HeaderValue, JsonDecode, Kind, Payload, ProxyScheme, Result,
    TransportConfig, TransportOption,
};

/// Entry point providing static builder constructors
pub struct Http;

impl Http {
    /// Create a new builder with transport defaults
    ///
    /// Shorthand for `RequestBuilder::new()`
    #[must_use]
    pub fn request() -> RequestBuilder {
        RequestBuilder::new()
    }

    /// Create a builder that sends and decodes JSON
    ///
    /// Shorthand for `RequestBuilder::new().as_json(false)`
    #[must_use]
    pub fn json() -> RequestBuilder {
        RequestBuilder::new().as_json(false)
    }
}

/// Create a new builder with transport defaults
#[must_use]
pub fn request() -> RequestBuilder {
    Http::request()
}

/// Create a builder that sends and decodes JSON
#[must_use]
pub fn json() -> RequestBuilder {
    Http::json()
}
