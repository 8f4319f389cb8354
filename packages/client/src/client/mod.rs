//! Blocking HTTP execution
//!
//! Turns a [`TransportConfig`](crate::TransportConfig) into exactly one HTTP
//! transaction and reports what happened as a
//! [`RawTransportResponse`](crate::RawTransportResponse).

pub mod core;

pub use self::core::{HttpClient, execute};
