//! One-shot blocking transport over `reqwest`

use std::error::Error as StdError;

use bytes::{Bytes, BytesMut};
use http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Version};
use reqwest::blocking::{Client, RequestBuilder, multipart};
use reqwest::redirect::Policy;
use tracing::Span;
use url::Url;

use crate::body::{MultipartBody, RequestBody};
use crate::config::TransportConfig;
use crate::cookie::Jar;
use crate::error::{self, Result};
use crate::headers::{canonical_name, header_line, split_header_line};
use crate::response::RawTransportResponse;
use crate::trace::DebugTrace;

/// Redirect hops followed when redirects are allowed
const MAX_REDIRECTS: usize = 10;

/// Transport handle for a single request.
///
/// Built from one [`TransportConfig`] and dropped when the request is done,
/// so nothing is pooled or shared between requests.
#[derive(Debug)]
pub struct HttpClient {
    inner: Client,
}

impl HttpClient {
    /// Build the transport handle.
    ///
    /// # Errors
    ///
    /// Returns a builder error when the proxy settings or the TLS backend
    /// cannot be turned into a client.
    pub fn from_config(config: &TransportConfig) -> Result<Self> {
        let redirect = if config.follow_redirects {
            Policy::limited(MAX_REDIRECTS)
        } else {
            Policy::none()
        };

        let mut builder = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .redirect(redirect)
            .danger_accept_invalid_certs(!config.verify_peer)
            .pool_max_idle_per_host(0);

        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.as_str());
        }

        if let Some(proxy) = config.proxy.as_ref().filter(|proxy| !proxy.host.is_empty()) {
            let proxy_url = proxy.to_url()?;
            builder = builder.proxy(reqwest::Proxy::all(proxy_url.as_str()).map_err(error::builder)?);
        }

        let inner = builder.build().map_err(error::builder)?;
        Ok(Self { inner })
    }

    /// Perform the transaction.
    ///
    /// Network failures are reported through [`RawTransportResponse::error`];
    /// `Err` is reserved for local problems such as a missing URL, an
    /// unreadable attachment or an unwritable cookie jar.
    #[tracing::instrument(
        name = "http_transaction",
        skip_all,
        fields(
            http.method = %config.effective_method(),
            http.url = %config.url,
            http.status_code = tracing::field::Empty,
        )
    )]
    pub fn execute(&self, config: &TransportConfig, trace: &mut DebugTrace) -> Result<RawTransportResponse> {
        if config.url.is_empty() {
            return Err(error::missing_url());
        }

        let url = match Url::parse(&config.url) {
            Ok(url) => url,
            Err(e) => {
                let message = format!("malformed URL '{}': {e}", config.url);
                trace.info(&message);
                return Ok(RawTransportResponse::failed(message));
            }
        };

        let mut headers = HeaderMap::new();
        for line in &config.headers {
            match parse_request_header(line) {
                Some((name, value)) => {
                    headers.append(name, value);
                }
                None => log::warn!("cekmutasi client: skipping malformed header line '{line}'"),
            }
        }

        let mut jar = config.cookie_file.as_deref().map(Jar::load).unwrap_or_default();
        if let Some(cookie) = jar.header_for(&url) {
            headers.append(COOKIE, cookie);
        }

        let method = config.effective_method();
        let has_content_type = headers.contains_key(CONTENT_TYPE);
        trace_request(trace, &method, &url, &headers);

        let mut request = self.inner.request(method.clone(), url.clone()).headers(headers);
        if let Some(body) = &config.body {
            request = attach_body(request, body, has_content_type)?;
        }

        let response = match request.send() {
            Ok(response) => response,
            Err(e) => {
                let message = error_chain(&e);
                trace.info(&message);
                log::debug!("cekmutasi client: {method} {url} failed: {message}");
                return Ok(RawTransportResponse::failed(message));
            }
        };

        let status = response.status();
        let version = response.version();
        let final_url = response.url().clone();
        let response_headers = response.headers().clone();
        Span::current().record("http.status_code", status.as_u16());

        trace.received(&status_line(version, status));
        for (name, value) in &response_headers {
            trace.received(&header_line(&canonical_name(name.as_str()), &lossy(value)));
        }

        let content_type = response_headers.get(CONTENT_TYPE).map(lossy);

        // Cookies arrive with the headers and are kept even if the body transfer fails
        jar.store_response(response_headers.get_all(SET_COOKIE).iter(), &final_url);
        if let Some(path) = &config.cookie_jar {
            jar.save(path)?;
        }

        let body = if config.no_body || method == Method::HEAD {
            Bytes::new()
        } else {
            match response.bytes() {
                Ok(body) => body,
                Err(e) => {
                    let message = error_chain(&e);
                    trace.info(&message);
                    return Ok(RawTransportResponse {
                        status: status.as_u16(),
                        content_type,
                        error: Some(message),
                        ..RawTransportResponse::default()
                    });
                }
            }
        };
        trace.info(&format!("received {} body bytes", body.len()));

        let (data, header_size) = if config.capture_headers {
            let block = header_block(version, status, &response_headers);
            let mut data = BytesMut::with_capacity(block.len() + body.len());
            data.extend_from_slice(block.as_bytes());
            data.extend_from_slice(&body);
            (data.freeze(), block.len())
        } else {
            (body, 0)
        };

        Ok(RawTransportResponse {
            data,
            header_size,
            status: status.as_u16(),
            content_type,
            error: None,
        })
    }
}

/// Build a transport handle for `config` and perform the transaction.
///
/// A configuration the transport rejects (bad proxy, unusable TLS setup)
/// is reported like any other transport failure.
pub fn execute(config: &TransportConfig, trace: &mut DebugTrace) -> Result<RawTransportResponse> {
    let client = match HttpClient::from_config(config) {
        Ok(client) => client,
        Err(e) if e.is_builder() => {
            let message = e.to_string();
            trace.info(&message);
            return Ok(RawTransportResponse::failed(message));
        }
        Err(e) => return Err(e),
    };

    client.execute(config, trace)
}

fn parse_request_header(line: &str) -> Option<(HeaderName, HeaderValue)> {
    let (name, value) = split_header_line(line)?;
    let name = HeaderName::from_bytes(name.as_bytes()).ok()?;
    let value = HeaderValue::from_str(value).ok()?;
    Some((name, value))
}

fn attach_body(request: RequestBuilder, body: &RequestBody, has_content_type: bool) -> Result<RequestBuilder> {
    let with_default_type = |request: RequestBuilder, content_type: &'static str| {
        if has_content_type {
            request
        } else {
            request.header(CONTENT_TYPE, content_type)
        }
    };

    Ok(match body {
        RequestBody::Form(text) | RequestBody::Raw(text) => {
            with_default_type(request, "application/x-www-form-urlencoded").body(text.clone())
        }
        RequestBody::Json(document) => with_default_type(request, "application/json").body(document.clone()),
        RequestBody::Multipart(form) => request.multipart(multipart_form(form)?),
    })
}

fn multipart_form(body: &MultipartBody) -> Result<multipart::Form> {
    let mut form = multipart::Form::new();

    for (name, value) in &body.fields {
        form = form.text(name.clone(), value.clone());
    }

    for file in &body.files {
        let mut part = multipart::Part::file(&file.path).map_err(|e| error::attachment(e, &file.path))?;

        if let Some(mime) = file.mime_type.as_deref().filter(|mime| !mime.is_empty()) {
            part = part.mime_str(mime).map_err(|e| error::attachment(e, &file.path))?;
        }

        if let Some(name) = file.file_name.as_deref().filter(|name| !name.is_empty()) {
            part = part.file_name(name.to_string());
        }

        form = form.part(file.key.clone(), part);
    }

    Ok(form)
}

fn trace_request(trace: &mut DebugTrace, method: &Method, url: &Url, headers: &HeaderMap) {
    if !trace.is_enabled() {
        return;
    }

    let target = match url.query() {
        Some(query) => format!("{}?{query}", url.path()),
        None => url.path().to_string(),
    };

    trace.info(&format!("connecting to {}", url.host_str().unwrap_or_default()));
    trace.sent(&format!("{method} {target} HTTP/1.1"));
    for (name, value) in headers {
        trace.sent(&header_line(&canonical_name(name.as_str()), &lossy(value)));
    }
}

fn status_line(version: Version, status: StatusCode) -> String {
    format!(
        "{version:?} {} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or_default()
    )
}

/// Raw header block as the server would have sent it, terminated by a blank line
fn header_block(version: Version, status: StatusCode, headers: &HeaderMap) -> String {
    let mut block = status_line(version, status);
    block.push_str("\r\n");
    for (name, value) in headers {
        block.push_str(&header_line(&canonical_name(name.as_str()), &lossy(value)));
        block.push_str("\r\n");
    }
    block.push_str("\r\n");
    block
}

fn lossy(value: &HeaderValue) -> String {
    String::from_utf8_lossy(value.as_bytes()).into_owned()
}

fn error_chain(e: &reqwest::Error) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
