//! Credentials and endpoint configuration for [`Bank`](super::Bank)

use std::env;
use std::fmt;

use cekmutasi_client::{Result, error};

/// Production API root
pub const DEFAULT_BASE_URL: &str = "https://api.cekmutasi.co.id/v1";

pub const API_KEY_ENV: &str = "CEKMUTASI_API_KEY";
pub const API_SIGNATURE_ENV: &str = "CEKMUTASI_API_SIGNATURE";
pub const BASE_URL_ENV: &str = "CEKMUTASI_BASE_URL";

/// API credentials and the root every endpoint path is joined to
#[derive(Clone, PartialEq, Eq)]
pub struct BankConfig {
    api_key: String,
    api_signature: String,
    base_url: String,
}

impl BankConfig {
    #[must_use]
    pub fn new(api_key: impl Into<String>, api_signature: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_signature: api_signature.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at another API root, such as a staging server
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Read credentials from `CEKMUTASI_API_KEY` and `CEKMUTASI_API_SIGNATURE`.
    ///
    /// `CEKMUTASI_BASE_URL` overrides the API root when set and non-empty.
    ///
    /// # Errors
    ///
    /// Fails when either credential variable is missing or not unicode.
    pub fn from_env() -> Result<Self> {
        let config = Self::new(required_var(API_KEY_ENV)?, required_var(API_SIGNATURE_ENV)?);
        match env::var(BASE_URL_ENV) {
            Ok(base_url) if !base_url.trim().is_empty() => Ok(config.with_base_url(base_url)),
            _ => Ok(config),
        }
    }

    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Signature issued alongside the key; kept for callers verifying IPN callbacks
    #[must_use]
    pub fn api_signature(&self) -> &str {
        &self.api_signature
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl fmt::Debug for BankConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BankConfig")
            .field("api_key", &"***")
            .field("api_signature", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

fn required_var(name: &str) -> Result<String> {
    env::var(name).map_err(|e| error::builder(format!("{name}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_join_base_url() {
        let config = BankConfig::new("key", "sig").with_base_url("http://127.0.0.1:8080/v1/");
        assert_eq!(config.endpoint("/bank/add"), "http://127.0.0.1:8080/v1/bank/add");
        assert_eq!(
            BankConfig::new("key", "sig").endpoint("/bank/list"),
            "https://api.cekmutasi.co.id/v1/bank/list"
        );
    }

    #[test]
    fn debug_output_hides_credentials() {
        let rendered = format!("{:?}", BankConfig::new("secret-key", "secret-sig"));
        assert!(!rendered.contains("secret"));
    }
}
