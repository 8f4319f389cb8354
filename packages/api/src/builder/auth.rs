//! Authorization headers

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::builder::core::RequestBuilder;
use crate::builder::headers::header;

impl RequestBuilder {
    /// Send `Authorization: <value>` verbatim
    #[must_use]
    pub fn with_authorization(self, value: &str) -> Self {
        self.with_header(header::AUTHORIZATION, value)
    }

    /// Set bearer token authentication
    ///
    /// # Examples
    /// ```no_run
    /// use cekmutasi::RequestBuilder;
    ///
    /// let response = RequestBuilder::new()
    ///     .to("https://api.example.com/protected")
    ///     .with_bearer("your-token-here")
    ///     .get();
    /// ```
    #[must_use]
    pub fn with_bearer(self, token: &str) -> Self {
        self.with_authorization(&format!("Bearer {token}"))
    }

    /// Set basic authentication; `user:password` is base64 encoded
    #[must_use]
    pub fn with_basic_auth(self, user: &str, password: &str) -> Self {
        let encoded = STANDARD.encode(format!("{user}:{password}"));
        self.with_authorization(&format!("Basic {encoded}"))
    }
}

#[cfg(test)]
mod tests {
    use crate::RequestBuilder;

    #[test]
    fn basic_credentials_are_base64_encoded() {
        let builder = RequestBuilder::new().with_basic_auth("user", "pass");
        assert_eq!(builder.transport().headers, vec!["Authorization: Basic dXNlcjpwYXNz"]);
    }

    #[test]
    fn bearer_token() {
        let builder = RequestBuilder::new().with_bearer("abc");
        assert_eq!(builder.transport().headers, vec!["Authorization: Bearer abc"]);
    }
}
