//! Proxy configuration
//!
//! A proxy is described by a host plus optional port, scheme and
//! credentials. Optional parts are only set when the caller provides them,
//! so an empty port or scheme leaves the transport default in place.

use std::fmt;

use url::Url;

use crate::error::{self, Result};

/// Proxy protocol spoken to the proxy host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyScheme {
    Http,
    Https,
    Socks5,
    /// SOCKS5 with hostname resolution on the proxy side
    Socks5h,
}

impl ProxyScheme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ProxyScheme::Http => "http",
            ProxyScheme::Https => "https",
            ProxyScheme::Socks5 => "socks5",
            ProxyScheme::Socks5h => "socks5h",
        }
    }
}

impl fmt::Display for ProxyScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProxyScheme {
    type Err = error::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "http" => Ok(ProxyScheme::Http),
            "https" => Ok(ProxyScheme::Https),
            "socks5" => Ok(ProxyScheme::Socks5),
            "socks5h" => Ok(ProxyScheme::Socks5h),
            other => Err(error::builder(format!("unsupported proxy scheme '{other}'"))),
        }
    }
}

/// Proxy settings accumulated by the builder
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ProxyConfig {
    pub host: String,
    pub port: Option<u16>,
    pub scheme: Option<ProxyScheme>,
    pub credentials: Option<(String, String)>,
}

impl ProxyConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn port(mut self, port: Option<u16>) -> Self {
        if let Some(port) = port.filter(|p| *p != 0) {
            self.port = Some(port);
        }
        self
    }

    #[must_use]
    pub fn scheme(mut self, scheme: Option<ProxyScheme>) -> Self {
        if scheme.is_some() {
            self.scheme = scheme;
        }
        self
    }

    /// Credentials are kept only when both user and password are non-empty
    #[must_use]
    pub fn credentials(mut self, user: &str, password: &str) -> Self {
        if !user.is_empty() && !password.is_empty() {
            self.credentials = Some((user.to_string(), password.to_string()));
        }
        self
    }

    /// Resolve into the proxy URL handed to the transport.
    ///
    /// A host given as `scheme://host[:port]` keeps its own scheme unless an
    /// explicit scheme was configured.
    pub fn to_url(&self) -> Result<Url> {
        let (embedded_scheme, authority) = match self.host.split_once("://") {
            Some((scheme, rest)) => (Some(scheme), rest),
            None => (None, self.host.as_str()),
        };

        let scheme = self
            .scheme
            .map(ProxyScheme::as_str)
            .or(embedded_scheme)
            .unwrap_or("http");

        let mut url = Url::parse(&format!("{scheme}://{authority}"))
            .map_err(error::builder)?;

        if let Some(port) = self.port {
            url.set_port(Some(port))
                .map_err(|()| error::builder(format!("cannot set port on proxy '{}'", self.host)))?;
        }

        if let Some((user, password)) = &self.credentials {
            url.set_username(user)
                .and_then(|()| url.set_password(Some(password)))
                .map_err(|()| error::builder(format!("cannot set credentials on proxy '{}'", self.host)))?;
        }

        Ok(url)
    }
}

impl fmt::Debug for ProxyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("scheme", &self.scheme)
            .field("credentials", &self.credentials.as_ref().map(|(user, _)| (user, "***")))
            .finish()
    }
}
