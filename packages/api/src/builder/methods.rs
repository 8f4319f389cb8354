//! HTTP method implementations
//!
//! Terminal methods consume the builder, perform exactly one transaction and
//! shape the result according to the builder's response settings.

use std::io::Write;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use cekmutasi_client::headers::header_line;
use cekmutasi_client::{DebugTrace, Result, TransportOption, encode_body, error, execute};
use http::Method;
use tempfile::NamedTempFile;

use crate::builder::core::RequestBuilder;
use crate::builder::headers::header;
use crate::response::{Content, Response, decode_json, shape};

impl RequestBuilder {
    /// Execute a GET request; field data is appended to the URL as a query string
    ///
    /// # Errors
    ///
    /// Fails when no URL was set, the payload cannot be encoded, or the debug
    /// log cannot be opened. Network failures are reported in the response.
    ///
    /// # Examples
    /// ```no_run
    /// use cekmutasi::RequestBuilder;
    ///
    /// let response = RequestBuilder::new()
    ///     .to("https://api.example.com/users")
    ///     .with_data([("page", 1)])
    ///     .get()?;
    /// # Ok::<(), cekmutasi::Error>(())
    /// ```
    pub fn get(mut self) -> Result<Response> {
        self.append_data_to_url()?;
        self.send()
    }

    /// Execute a POST request with the payload as its body
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get).
    pub fn post(mut self) -> Result<Response> {
        self.set_post_parameters()?;
        self.send()
    }

    /// Execute a PUT request; the payload is encoded as for POST
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get).
    pub fn put(self) -> Result<Response> {
        self.send_with_body(Method::PUT)
    }

    /// Execute a PATCH request; the payload is encoded as for POST
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get).
    pub fn patch(self) -> Result<Response> {
        self.send_with_body(Method::PATCH)
    }

    /// Execute a DELETE request; the payload is encoded as for POST
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get).
    pub fn delete(self) -> Result<Response> {
        self.send_with_body(Method::DELETE)
    }

    /// Execute a HEAD request.
    ///
    /// Response headers are always captured and no body is transferred.
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get).
    pub fn head(mut self) -> Result<Response> {
        self.append_data_to_url()?;
        self.transport.apply(TransportOption::Method(Method::HEAD));
        self.transport.apply(TransportOption::NoBody(true));
        self.transport.capture_headers = true;
        self.send()
    }

    /// Execute a GET request and save the response body to `path`.
    ///
    /// The file is replaced atomically once the whole body has arrived; it is
    /// left untouched when the transfer fails.
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get); writing the file is also reported as an error.
    ///
    /// # Examples
    /// ```no_run
    /// use cekmutasi::RequestBuilder;
    ///
    /// let response = RequestBuilder::new()
    ///     .to("https://example.com/report.pdf")
    ///     .download("report.pdf")?;
    /// # Ok::<(), cekmutasi::Error>(())
    /// ```
    pub fn download(mut self, path: impl Into<PathBuf>) -> Result<Response> {
        self.append_data_to_url()?;
        self.behavior.save_to = Some(path.into());
        self.send()
    }

    fn send_with_body(mut self, method: Method) -> Result<Response> {
        self.set_post_parameters()?;
        self.transport.apply(TransportOption::Method(method));
        self.send()
    }

    fn append_data_to_url(&mut self) -> Result<()> {
        if let Some(query) = self.behavior.data.query_string()? {
            self.transport.url = append_query(&self.transport.url, &query);
        }
        Ok(())
    }

    fn set_post_parameters(&mut self) -> Result<()> {
        let body = encode_body(
            &self.behavior.data,
            &self.behavior.files,
            self.behavior.json_request,
            self.behavior.contains_file,
        )?;
        self.transport.apply(TransportOption::Method(Method::POST));
        self.transport.apply(TransportOption::PostFields(body));
        Ok(())
    }

    fn send(mut self) -> Result<Response> {
        if self.behavior.json_request {
            self.transport
                .headers
                .push(header_line(header::CONTENT_TYPE, "application/json"));
        }

        if let Some(session) = self.behavior.xdebug_session.as_deref().filter(|s| !s.is_empty()) {
            let query = format!("XDEBUG_SESSION_START={session}");
            self.transport.url = append_query(&self.transport.url, &query);
        }

        let mut trace = DebugTrace::open(self.behavior.debug_log.as_deref(), self.transport.verbose)?;

        if self.debug_enabled() {
            log::debug!(
                "cekmutasi builder: {} {}",
                self.transport.effective_method(),
                self.transport.url
            );
        }

        let raw = execute(&self.transport, &mut trace)?;
        trace.finish();

        let (header_block, body) = if self.transport.capture_headers {
            raw.split_headers()
        } else {
            (None, raw.data.clone())
        };

        let content = if let Some(path) = &self.behavior.save_to {
            if raw.is_transport_error() {
                log::warn!(
                    "cekmutasi builder: transfer failed, {} not written",
                    path.display()
                );
                Content::None
            } else {
                write_atomically(path, &body)?;
                Content::Raw(body)
            }
        } else if let Some(mode) = self.behavior.json_response {
            decode_json(&body, mode)
        } else if raw.is_transport_error() {
            Content::None
        } else {
            Content::Raw(body)
        };

        Ok(shape(
            content,
            &raw,
            header_block.as_deref(),
            &self.behavior,
            self.transport.capture_headers,
        ))
    }
}

/// Append `query` with `&` when the URL already carries a query, else `?`
fn append_query(url: &str, query: &str) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{query}")
}

fn write_atomically(path: &Path, body: &Bytes) -> Result<()> {
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut file = NamedTempFile::new_in(dir).map_err(|e| error::io(e, path))?;
    file.write_all(body).map_err(|e| error::io(e, path))?;
    file.persist(path).map_err(|e| error::io(e.error, path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_separator_depends_on_existing_query() {
        assert_eq!(append_query("http://h/p", "a=1"), "http://h/p?a=1");
        assert_eq!(append_query("http://h/p?x=0", "a=1"), "http://h/p?x=0&a=1");
    }

    #[test]
    fn post_parameters_encode_fields() {
        let mut builder = RequestBuilder::new().with_data([("a", 1), ("b", 2)]);
        builder.set_post_parameters().expect("encodable payload");
        assert_eq!(builder.transport().method, Method::POST);
        assert_eq!(
            builder.transport().body,
            Some(cekmutasi_client::RequestBody::Form("a=1&b=2".to_string()))
        );
    }

    #[test]
    fn get_data_goes_to_query_string() {
        let mut builder = RequestBuilder::new()
            .to("http://localhost/list?x=0")
            .with_data([("page", 2)]);
        builder.append_data_to_url().expect("encodable payload");
        assert_eq!(builder.transport().url, "http://localhost/list?x=0&page=2");
    }

    #[test]
    fn atomic_write_replaces_existing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.bin");
        std::fs::write(&path, b"old contents").expect("seed file");

        write_atomically(&path, &Bytes::from_static(b"new")).expect("write");
        assert_eq!(std::fs::read(&path).expect("read back"), b"new");
        assert_eq!(std::fs::read_dir(dir.path()).expect("list").count(), 1);
    }

    #[test]
    fn missing_url_is_an_error() {
        let err = RequestBuilder::new().get().err().expect("missing URL");
        assert!(err.is_builder());
    }
}
