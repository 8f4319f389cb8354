//! Core `RequestBuilder` structure and transport/behavior configuration calls

use std::path::PathBuf;
use std::time::Duration;

use cekmutasi_client::{BehaviorConfig, JsonDecode, ProxyConfig, ProxyScheme, TransportConfig, TransportOption};

/// Session name used by [`RequestBuilder::enable_xdebug_default`]
pub const DEFAULT_XDEBUG_SESSION: &str = "session_1";

/// Owned, chainable request configuration.
///
/// Every configuration call takes the builder by value and hands it back, so
/// a builder is configured by exactly one owner. Terminal methods consume it;
/// keep a configured template around with `.clone()` when several requests
/// share settings. Builders are `Send` and can be moved to worker threads,
/// one builder per in-flight request.
#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    pub(crate) transport: TransportConfig,
    pub(crate) behavior: BehaviorConfig,
}

impl RequestBuilder {
    /// Start with transport defaults: 30 s timeouts, no redirects
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport settings accumulated so far
    #[must_use]
    pub fn transport(&self) -> &TransportConfig {
        &self.transport
    }

    /// Encoding and result-shaping settings accumulated so far
    #[must_use]
    pub fn behavior(&self) -> &BehaviorConfig {
        &self.behavior
    }

    pub(crate) fn debug_enabled(&self) -> bool {
        self.transport.verbose || self.behavior.debug_log.is_some()
    }

    /// Set the target URL
    ///
    /// # Examples
    /// ```no_run
    /// use cekmutasi::RequestBuilder;
    ///
    /// let response = RequestBuilder::new()
    ///     .to("https://api.example.com/users")
    ///     .get();
    /// ```
    #[must_use]
    pub fn to(mut self, url: &str) -> Self {
        self.transport.url = url.to_string();
        self
    }

    /// Set the total timeout in (fractional) seconds
    #[must_use]
    pub fn with_timeout(mut self, seconds: f64) -> Self {
        self.transport.timeout = seconds_to_duration(seconds);
        self
    }

    /// Set the connect timeout in (fractional) seconds
    #[must_use]
    pub fn with_connect_timeout(mut self, seconds: f64) -> Self {
        self.transport.connect_timeout = seconds_to_duration(seconds);
        self
    }

    /// Follow HTTP redirects; they are not followed by default
    #[must_use]
    pub fn allow_redirect(mut self) -> Self {
        self.transport.follow_redirects = true;
        self
    }

    /// Toggle TLS peer verification (off by default)
    #[must_use]
    pub fn verify_peer(mut self, verify: bool) -> Self {
        self.transport.verify_peer = verify;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, agent: &str) -> Self {
        self.transport.user_agent = Some(agent.to_string());
        self
    }

    /// Send the payload as a JSON document and add `Content-Type: application/json`
    #[must_use]
    pub fn as_json_request(mut self) -> Self {
        self.behavior.json_request = true;
        self
    }

    /// Decode the response body as JSON.
    ///
    /// `as_map` selects a string-keyed map instead of a dynamic JSON value.
    /// A body that is not valid JSON decodes to
    /// [`Content::None`](crate::Content::None).
    #[must_use]
    pub fn as_json_response(mut self, as_map: bool) -> Self {
        self.behavior.json_response = Some(if as_map { JsonDecode::Map } else { JsonDecode::Object });
        self
    }

    /// Shorthand for [`as_json_request`](Self::as_json_request) plus
    /// [`as_json_response`](Self::as_json_response)
    #[must_use]
    pub fn as_json(self, as_map: bool) -> Self {
        self.as_json_request().as_json_response(as_map)
    }

    /// Capture the response headers into the structured result
    #[must_use]
    pub fn with_response_headers(mut self) -> Self {
        self.transport.capture_headers = true;
        self
    }

    /// Return a [`StructuredResult`](crate::StructuredResult); takes precedence
    /// over [`return_response_array`](Self::return_response_array)
    #[must_use]
    pub fn return_response_object(mut self) -> Self {
        self.behavior.response_object = true;
        self
    }

    /// Return the structured result as a JSON map
    #[must_use]
    pub fn return_response_array(mut self) -> Self {
        self.behavior.response_array = true;
        self
    }

    /// Write a verbose protocol trace to `log_file`, truncated on every request
    #[must_use]
    pub fn enable_debug(mut self, log_file: impl Into<PathBuf>) -> Self {
        self.behavior.debug_log = Some(log_file.into());
        self.transport.verbose = true;
        self
    }

    /// Route the request through a proxy.
    ///
    /// Port, scheme and credentials are only applied when given; credentials
    /// need both a non-empty user and password.
    #[must_use]
    pub fn with_proxy(
        mut self,
        host: &str,
        port: Option<u16>,
        scheme: Option<ProxyScheme>,
        credentials: Option<(&str, &str)>,
    ) -> Self {
        let mut proxy = ProxyConfig::new(host).port(port).scheme(scheme);
        if let Some((user, password)) = credentials {
            proxy = proxy.credentials(user, password);
        }
        self.transport.proxy = Some(proxy);
        self
    }

    /// Read cookies sent with the request from `path`
    #[must_use]
    pub fn set_cookie_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.transport.cookie_file = Some(path.into());
        self
    }

    /// Write cookies held after the request to `path`
    #[must_use]
    pub fn set_cookie_jar(mut self, path: impl Into<PathBuf>) -> Self {
        self.transport.cookie_jar = Some(path.into());
        self
    }

    /// Add `XDEBUG_SESSION_START=<session>` to the URL when the request is sent
    #[must_use]
    pub fn enable_xdebug(mut self, session: &str) -> Self {
        self.behavior.xdebug_session = Some(session.to_string());
        self
    }

    #[must_use]
    pub fn enable_xdebug_default(self) -> Self {
        self.enable_xdebug(DEFAULT_XDEBUG_SESSION)
    }

    /// Set a low-level transport option
    ///
    /// # Examples
    /// ```no_run
    /// use cekmutasi::{RequestBuilder, TransportOption};
    ///
    /// let builder = RequestBuilder::new()
    ///     .with_option(TransportOption::UserAgent("cekmutasi/0.1".to_string()));
    /// ```
    #[must_use]
    pub fn with_option(mut self, option: TransportOption) -> Self {
        if self.debug_enabled() {
            log::debug!("cekmutasi builder: set option {}", option.name());
        }
        self.transport.apply(option);
        self
    }
}

fn seconds_to_duration(seconds: f64) -> Duration {
    Duration::try_from_secs_f64(seconds).unwrap_or_else(|_| {
        log::warn!("cekmutasi builder: invalid timeout {seconds}s, using zero");
        Duration::ZERO
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractional_timeouts_keep_millisecond_precision() {
        let builder = RequestBuilder::new().with_timeout(1.5).with_connect_timeout(0.25);
        assert_eq!(builder.transport().timeout, Duration::from_millis(1500));
        assert_eq!(builder.transport().connect_timeout, Duration::from_millis(250));
    }

    #[test]
    fn negative_timeout_is_zero() {
        let builder = RequestBuilder::new().with_timeout(-1.0);
        assert_eq!(builder.transport().timeout, Duration::ZERO);
    }

    #[test]
    fn json_shorthand_sets_both_flags() {
        let builder = RequestBuilder::new().as_json(true);
        assert!(builder.behavior().json_request);
        assert_eq!(builder.behavior().json_response, Some(JsonDecode::Map));
    }

    #[test]
    fn debug_turns_on_verbose_trace() {
        let builder = RequestBuilder::new().enable_debug("/tmp/debug.txt");
        assert!(builder.transport().verbose);
        assert_eq!(builder.behavior().debug_log, Some(PathBuf::from("/tmp/debug.txt")));
    }
}
