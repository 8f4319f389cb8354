//! # cekmutasi transport layer
//!
//! Blocking HTTP transport used by the `cekmutasi` request builder. It owns
//! the strongly typed request configuration, the wire encodings of request
//! payloads, and the execution of exactly one HTTP transaction per call.
//!
//! ## Features
//!
//! - **Typed transport options** instead of name-based option lookup
//! - **Form, JSON and multipart bodies** with ordered fields
//! - **Raw header capture** with repeated-header folding
//! - **Cookie file / cookie jar** persistence between requests
//! - **Verbose protocol trace** written to a per-request log file
//! - **No exceptions for network failures**: they are reported as data

#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod body;
pub mod client;
pub mod config;
pub mod cookie;
pub mod error;
pub mod headers;
pub mod proxy;
pub mod response;
pub mod trace;

pub use body::{FileAttachment, MultipartBody, Payload, RequestBody, encode_body};
pub use client::{HttpClient, execute};
pub use config::{BehaviorConfig, JsonDecode, TransportConfig, TransportOption};
pub use error::{Error, Kind, Result};
pub use headers::{HeaderFields, HeaderValue, parse_header_block};
pub use proxy::{ProxyConfig, ProxyScheme};
pub use response::RawTransportResponse;
pub use trace::DebugTrace;
