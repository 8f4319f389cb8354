//! Request configuration
//!
//! [`TransportConfig`] holds what the transport needs to perform one HTTP
//! transaction. [`BehaviorConfig`] holds how the payload is encoded and how
//! the response is decoded and shaped. [`TransportOption`] is the closed set
//! of low-level options that can be applied to a transport config by name.

pub mod behavior;
pub mod options;
pub mod transport;

pub use behavior::{BehaviorConfig, JsonDecode};
pub use options::TransportOption;
pub use transport::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_TIMEOUT, TransportConfig};
