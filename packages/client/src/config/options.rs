use std::path::PathBuf;
use std::time::Duration;

use http::Method;

use crate::body::RequestBody;
use crate::proxy::ProxyScheme;

/// Low-level transport option, applied with [`TransportConfig::apply`].
///
/// This is the complete set of options the transport understands; anything
/// not listed here cannot be configured.
///
/// [`TransportConfig::apply`]: crate::TransportConfig::apply
#[derive(Debug, Clone, PartialEq)]
pub enum TransportOption {
    Url(String),
    /// Request method, including custom verbs
    Method(Method),
    PostFields(RequestBody),
    /// Replace the whole header line list
    HttpHeader(Vec<String>),
    ConnectTimeout(Duration),
    Timeout(Duration),
    SslVerifyPeer(bool),
    FollowLocation(bool),
    UserAgent(String),
    CookieFile(PathBuf),
    CookieJar(PathBuf),
    Proxy(String),
    ProxyPort(u16),
    ProxyType(ProxyScheme),
    ProxyUserPwd { user: String, password: String },
    /// Capture the raw response header block
    Header(bool),
    NoBody(bool),
    Verbose(bool),
}

impl TransportOption {
    /// Conventional option name, used in debug output
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            TransportOption::Url(_) => "URL",
            TransportOption::Method(_) => "CUSTOMREQUEST",
            TransportOption::PostFields(_) => "POSTFIELDS",
            TransportOption::HttpHeader(_) => "HTTPHEADER",
            TransportOption::ConnectTimeout(_) => "CONNECTTIMEOUT_MS",
            TransportOption::Timeout(_) => "TIMEOUT_MS",
            TransportOption::SslVerifyPeer(_) => "SSL_VERIFYPEER",
            TransportOption::FollowLocation(_) => "FOLLOWLOCATION",
            TransportOption::UserAgent(_) => "USERAGENT",
            TransportOption::CookieFile(_) => "COOKIEFILE",
            TransportOption::CookieJar(_) => "COOKIEJAR",
            TransportOption::Proxy(_) => "PROXY",
            TransportOption::ProxyPort(_) => "PROXYPORT",
            TransportOption::ProxyType(_) => "PROXYTYPE",
            TransportOption::ProxyUserPwd { .. } => "PROXYUSERPWD",
            TransportOption::Header(_) => "HEADER",
            TransportOption::NoBody(_) => "NOBODY",
            TransportOption::Verbose(_) => "VERBOSE",
        }
    }
}
