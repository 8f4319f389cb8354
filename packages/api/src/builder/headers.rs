//! Request header configuration
//!
//! Headers are stored as `"Name: Value"` lines in the order they were added;
//! duplicates are kept and sent as-is.

use cekmutasi_client::headers::header_line;
use serde_json::{Map, Value};

use crate::builder::core::RequestBuilder;

/// Header names used by the builder helpers
pub mod header {
    pub const AUTHORIZATION: &str = "Authorization";
    pub const CONNECTION: &str = "Connection";
    pub const CONTENT_TYPE: &str = "Content-Type";

    /// Value sent with [`CONNECTION`] alongside an explicit content type
    pub const KEEP_ALIVE: &str = "Keep-Alive";
}

/// Headers accepted by [`RequestBuilder::with_headers`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderInput {
    /// Preformatted `"Name: Value"` lines
    Lines(Vec<String>),
    /// Name/value pairs formatted at insertion
    Pairs(Vec<(String, String)>),
}

impl HeaderInput {
    fn into_lines(self) -> Vec<String> {
        match self {
            HeaderInput::Lines(lines) => lines,
            HeaderInput::Pairs(pairs) => pairs
                .into_iter()
                .map(|(name, value)| header_line(&name, &value))
                .collect(),
        }
    }
}

impl From<Vec<String>> for HeaderInput {
    fn from(lines: Vec<String>) -> Self {
        HeaderInput::Lines(lines)
    }
}

impl From<Vec<&str>> for HeaderInput {
    fn from(lines: Vec<&str>) -> Self {
        HeaderInput::Lines(lines.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for HeaderInput {
    fn from(lines: [&str; N]) -> Self {
        HeaderInput::from(Vec::from(lines))
    }
}

impl<K, V> From<Vec<(K, V)>> for HeaderInput
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: Vec<(K, V)>) -> Self {
        HeaderInput::Pairs(
            pairs
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for HeaderInput
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        HeaderInput::from(Vec::from(pairs))
    }
}

/// Ordered JSON object; string values are sent as-is, others in their JSON form
impl From<Map<String, Value>> for HeaderInput {
    fn from(map: Map<String, Value>) -> Self {
        HeaderInput::Pairs(
            map.into_iter()
                .map(|(name, value)| match value {
                    Value::String(text) => (name, text),
                    other => (name, other.to_string()),
                })
                .collect(),
        )
    }
}

impl RequestBuilder {
    /// Append one header
    ///
    /// # Arguments
    /// * `name` - The header name
    /// * `value` - The header value
    ///
    /// # Returns
    /// `Self` for method chaining
    ///
    /// # Examples
    /// ```no_run
    /// use cekmutasi::RequestBuilder;
    ///
    /// let response = RequestBuilder::new()
    ///     .to("https://api.example.com/data")
    ///     .with_header("X-Custom-Header", "custom-value")
    ///     .get();
    /// ```
    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if self.debug_enabled() {
            log::debug!("cekmutasi builder: header {name}");
        }
        self.transport.headers.push(header_line(name, value));
        self
    }

    /// Append several headers, given as lines or as name/value pairs
    ///
    /// # Examples
    /// ```no_run
    /// use cekmutasi::RequestBuilder;
    ///
    /// let builder = RequestBuilder::new()
    ///     .with_headers(["Accept: application/json", "X-Trace: 1"])
    ///     .with_headers([("Api-Key", "secret")]);
    /// ```
    #[must_use]
    pub fn with_headers(mut self, headers: impl Into<HeaderInput>) -> Self {
        self.transport.headers.extend(headers.into().into_lines());
        self
    }

    /// Set the request content type; also asks to keep the connection alive
    #[must_use]
    pub fn with_content_type(self, content_type: &str) -> Self {
        self.with_header(header::CONTENT_TYPE, content_type)
            .with_header(header::CONNECTION, header::KEEP_ALIVE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_and_pairs_append_in_order() {
        let builder = RequestBuilder::new()
            .with_header("X-A", "1")
            .with_headers(["X-B: 2"])
            .with_headers(vec![("X-C", "3"), ("X-A", "4")]);

        assert_eq!(
            builder.transport().headers,
            vec!["X-A: 1", "X-B: 2", "X-C: 3", "X-A: 4"]
        );
    }

    #[test]
    fn content_type_adds_keep_alive() {
        let builder = RequestBuilder::new().with_content_type("text/xml");
        assert_eq!(
            builder.transport().headers,
            vec!["Content-Type: text/xml", "Connection: Keep-Alive"]
        );
    }

    #[test]
    fn json_object_headers_keep_insertion_order() {
        let mut map = Map::new();
        for index in 0..8 {
            map.insert(format!("X-{index}"), Value::from(index.to_string()));
        }
        map.insert("X-Retry".to_string(), Value::from(3));

        let builder = RequestBuilder::new().with_headers(map);
        assert_eq!(
            builder.transport().headers,
            vec![
                "X-0: 0", "X-1: 1", "X-2: 2", "X-3: 3", "X-4: 4", "X-5: 5", "X-6: 6", "X-7: 7",
                "X-Retry: 3",
            ]
        );
    }
}
