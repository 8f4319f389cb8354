//! Fluent request builder
//!
//! Configuration calls accumulate transport and behavior settings on an
//! owned [`RequestBuilder`]; a terminal method consumes it and performs one
//! HTTP transaction.

pub mod auth;
pub mod body;
pub mod core;
pub mod headers;
pub mod methods;

pub use self::core::*;
pub use headers::*;
