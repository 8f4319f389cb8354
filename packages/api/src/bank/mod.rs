//! Client for the bank and payment mutation API
//!
//! [`Bank`] wraps a configured [`RequestBuilder`] template. Every call clones
//! the template, so URL and payload never leak from one call into the next,
//! and every call returns the structured result form.

pub mod config;
pub mod forms;

use std::fmt;

use cekmutasi_client::headers::header_line;
use cekmutasi_client::{Payload, Result, TransportOption, error};
use serde::Serialize;

pub use config::{BankConfig, DEFAULT_BASE_URL};
pub use forms::{AddAccount, BankSearch, DATE_FORMAT, DateRange, PaypalSearch, UpdateAccount};

use crate::builder::RequestBuilder;
use crate::response::StructuredResult;
use forms::{IdForm, ListQuery, WhatsappForm};

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "Api-Key";

/// Bank and payment mutation endpoints
///
/// # Examples
/// ```no_run
/// use cekmutasi::{Bank, BankConfig, RequestBuilder};
///
/// let bank = Bank::new(BankConfig::new("api-key", "api-signature"), RequestBuilder::new());
/// let accounts = bank.lists("bca", "1234567890")?;
/// if accounts.is_success() {
///     println!("{:?}", accounts.content);
/// }
/// # Ok::<(), cekmutasi::Error>(())
/// ```
#[derive(Clone)]
pub struct Bank {
    config: BankConfig,
    template: RequestBuilder,
}

impl Bank {
    /// Wrap `template`, replacing its header list with the API key and a JSON
    /// `Accept` header. Timeouts, proxy and other settings are kept.
    #[must_use]
    pub fn new(config: BankConfig, template: RequestBuilder) -> Self {
        let template = template.with_option(TransportOption::HttpHeader(vec![
            header_line(API_KEY_HEADER, config.api_key()),
            header_line("Accept", "application/json"),
        ]));
        Self { config, template }
    }

    #[must_use]
    pub fn config(&self) -> &BankConfig {
        &self.config
    }

    /// Register a bank account (`POST /bank/add`)
    ///
    /// # Errors
    ///
    /// Fails only on local problems such as an unencodable payload; network
    /// failures are reported in the returned result.
    pub fn add(&self, account: &AddAccount) -> Result<StructuredResult> {
        self.post("/bank/add", account.payload()?)
    }

    /// Update a registered bank account (`POST /bank/update`)
    ///
    /// # Errors
    ///
    /// See [`add`](Self::add).
    pub fn update(&self, account: &UpdateAccount) -> Result<StructuredResult> {
        self.post("/bank/update", account.payload()?)
    }

    /// Remove a bank account (`POST /bank/delete`)
    ///
    /// # Errors
    ///
    /// See [`add`](Self::add).
    pub fn delete(&self, account_id: u64) -> Result<StructuredResult> {
        self.post("/bank/delete", Payload::from_serialize(&IdForm { id: account_id })?)
    }

    /// List registered bank accounts (`GET /bank/list`)
    ///
    /// # Errors
    ///
    /// See [`add`](Self::add).
    pub fn lists(&self, service_code: &str, account_number: &str) -> Result<StructuredResult> {
        let query = encode_query(&ListQuery {
            service_code,
            account_number,
        })?;
        let url = format!("{}?{query}", self.config.endpoint("/bank/list"));
        log::debug!("cekmutasi bank: GET /bank/list");

        structured(self.template.clone().to(&url).return_response_object().get()?)
    }

    /// Search bank mutations (`POST /bank/search`)
    ///
    /// # Errors
    ///
    /// See [`add`](Self::add).
    pub fn search_bank(&self, search: &BankSearch) -> Result<StructuredResult> {
        self.post("/bank/search", search.payload()?)
    }

    /// Search PayPal mutations (`POST /paypal/search`)
    ///
    /// # Errors
    ///
    /// See [`add`](Self::add).
    pub fn search_paypal(&self, search: &PaypalSearch) -> Result<StructuredResult> {
        self.post("/paypal/search", search.payload()?)
    }

    /// Send a WhatsApp notification for a mutation (`POST /whatsapp/send`)
    ///
    /// # Errors
    ///
    /// See [`add`](Self::add).
    pub fn whatsapp(&self, mutation_id: u64, sender_phone: &str, receiver_phone: &str) -> Result<StructuredResult> {
        let form = WhatsappForm {
            mutation_id,
            sender_phone,
            receiver_phone,
        };
        self.post("/whatsapp/send", Payload::from_serialize(&form)?)
    }

    fn post(&self, path: &str, payload: Payload) -> Result<StructuredResult> {
        log::debug!("cekmutasi bank: POST {path}");
        let response = self
            .template
            .clone()
            .to(&self.config.endpoint(path))
            .with_data(payload)
            .return_response_object()
            .post()?;
        structured(response)
    }
}

impl fmt::Debug for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let transport = self.template.transport();
        let header_names: Vec<&str> = transport
            .headers
            .iter()
            .map(|line| line.split_once(':').map_or(line.as_str(), |(name, _)| name.trim()))
            .collect();

        f.debug_struct("Bank")
            .field("config", &self.config)
            .field("headers", &header_names)
            .field("timeout", &transport.timeout)
            .field("connect_timeout", &transport.connect_timeout)
            .finish_non_exhaustive()
    }
}

fn encode_query<T: Serialize>(query: &T) -> Result<String> {
    serde_urlencoded::to_string(query).map_err(error::encode)
}

fn structured(response: crate::Response) -> Result<StructuredResult> {
    response
        .into_object()
        .ok_or_else(|| error::builder("expected a structured response"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_headers_are_replaced() {
        let template = RequestBuilder::new()
            .with_header("X-Old", "1")
            .with_timeout(5.0);
        let bank = Bank::new(BankConfig::new("k3y", "s1g"), template);

        assert_eq!(
            bank.template.transport().headers,
            vec!["Api-Key: k3y", "Accept: application/json"]
        );
        assert_eq!(bank.template.transport().timeout, std::time::Duration::from_secs(5));
    }

    #[test]
    fn list_query_is_urlencoded() {
        let query = encode_query(&ListQuery {
            service_code: "bca",
            account_number: "12 34",
        });
        assert_eq!(query.ok().as_deref(), Some("service_code=bca&account_number=12+34"));
    }

    #[test]
    fn debug_output_hides_api_key() {
        let bank = Bank::new(BankConfig::new("super-secret-key", "sig"), RequestBuilder::new());
        let rendered = format!("{bank:?}");

        assert!(!rendered.contains("super-secret-key"));
        assert!(rendered.contains("Api-Key"));
    }
}
