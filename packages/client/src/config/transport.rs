use std::path::PathBuf;
use std::time::Duration;

use http::Method;

use crate::body::RequestBody;
use crate::proxy::ProxyConfig;

/// Default total timeout for a transaction
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connect timeout
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything the transport reads when it performs a request.
///
/// Owned by exactly one builder and read once at execution time.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub url: String,
    pub method: Method,
    /// `"Name: Value"` lines in insertion order, duplicates allowed
    pub headers: Vec<String>,
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub verify_peer: bool,
    pub follow_redirects: bool,
    pub user_agent: Option<String>,
    pub cookie_file: Option<PathBuf>,
    pub cookie_jar: Option<PathBuf>,
    pub proxy: Option<ProxyConfig>,
    pub body: Option<RequestBody>,
    /// Keep the raw response header block
    pub capture_headers: bool,
    /// Do not transfer a response body
    pub no_body: bool,
    /// Write a protocol trace while the request runs
    pub verbose: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            method: Method::GET,
            headers: Vec::new(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            timeout: DEFAULT_TIMEOUT,
            verify_peer: false,
            follow_redirects: false,
            user_agent: None,
            cookie_file: None,
            cookie_jar: None,
            proxy: None,
            body: None,
            capture_headers: false,
            no_body: false,
            verbose: false,
        }
    }
}

impl TransportConfig {
    /// Method actually put on the wire: a body-less transfer of a GET is a HEAD
    #[must_use]
    pub fn effective_method(&self) -> Method {
        if self.no_body && self.method == Method::GET {
            Method::HEAD
        } else {
            self.method.clone()
        }
    }

    fn proxy_mut(&mut self) -> &mut ProxyConfig {
        self.proxy.get_or_insert_with(ProxyConfig::default)
    }

    /// Apply one low-level option.
    pub fn apply(&mut self, option: crate::TransportOption) {
        use crate::TransportOption as Opt;

        match option {
            Opt::Url(url) => self.url = url,
            Opt::Method(method) => self.method = method,
            Opt::PostFields(body) => self.body = Some(body),
            Opt::HttpHeader(lines) => self.headers = lines,
            Opt::ConnectTimeout(timeout) => self.connect_timeout = timeout,
            Opt::Timeout(timeout) => self.timeout = timeout,
            Opt::SslVerifyPeer(verify) => self.verify_peer = verify,
            Opt::FollowLocation(follow) => self.follow_redirects = follow,
            Opt::UserAgent(agent) => self.user_agent = Some(agent),
            Opt::CookieFile(path) => self.cookie_file = Some(path),
            Opt::CookieJar(path) => self.cookie_jar = Some(path),
            Opt::Proxy(host) => self.proxy_mut().host = host,
            Opt::ProxyPort(port) => self.proxy_mut().port = Some(port),
            Opt::ProxyType(scheme) => self.proxy_mut().scheme = Some(scheme),
            Opt::ProxyUserPwd { user, password } => {
                self.proxy_mut().credentials = Some((user, password));
            }
            Opt::Header(capture) => self.capture_headers = capture,
            Opt::NoBody(no_body) => self.no_body = no_body,
            Opt::Verbose(verbose) => self.verbose = verbose,
        }
    }
}
