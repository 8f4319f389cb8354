//! Cookie file and cookie jar persistence
//!
//! Cookies are read from the configured cookie file before a request and
//! written to the configured cookie jar after it, using `cookie_store`'s JSON
//! format.

pub mod core;

pub use self::core::Jar;
