//! Request parameters for the bank endpoints
//!
//! Each public parameter type is turned into an ordered field payload through
//! a private serde form. Codes are normalised here: service and package codes
//! lowercase, account status uppercase.

use chrono::NaiveDateTime;
use cekmutasi_client::{Payload, Result};
use serde::{Serialize, Serializer};

/// Wire format of mutation search dates
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A bank account to register for mutation monitoring
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddAccount {
    pub service_code: String,
    pub package_code: String,
    pub username: String,
    pub password: String,
    pub account_number: String,
    pub account_name: String,
    /// URL receiving instant payment notifications
    pub ipn_url: String,
    pub status: String,
}

/// Changes to a registered bank account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateAccount {
    pub id: u64,
    pub password: String,
    pub account_number: String,
    pub ipn_url: String,
    pub status: String,
}

/// Inclusive time window of a mutation search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    #[serde(serialize_with = "timestamp")]
    pub from: NaiveDateTime,
    #[serde(serialize_with = "timestamp")]
    pub to: NaiveDateTime,
}

impl DateRange {
    #[must_use]
    pub fn new(from: NaiveDateTime, to: NaiveDateTime) -> Self {
        Self { from, to }
    }
}

/// Filter for bank account mutations
#[derive(Debug, Clone, PartialEq)]
pub struct BankSearch {
    pub date: DateRange,
    pub amount: f64,
    /// Mutation direction, such as `credit` or `debit`
    pub kind: String,
    pub description: String,
    pub service_code: String,
    pub account_number: String,
}

/// Filter for PayPal mutations
#[derive(Debug, Clone, PartialEq)]
pub struct PaypalSearch {
    pub date: DateRange,
    pub username: String,
    pub amount: f64,
    pub email: String,
    pub transaction_id: String,
    pub currency: String,
}

#[derive(Serialize)]
struct AddForm<'a> {
    service_code: String,
    package_code: String,
    username: &'a str,
    password: &'a str,
    account_number: &'a str,
    account_name: &'a str,
    ipn_url: &'a str,
    status: String,
}

#[derive(Serialize)]
struct UpdateForm<'a> {
    id: u64,
    password: &'a str,
    account_number: &'a str,
    ipn_url: &'a str,
    status: String,
}

#[derive(Serialize)]
struct BankSearchForm<'a> {
    date: DateRange,
    #[serde(serialize_with = "amount")]
    amount: f64,
    #[serde(rename = "type")]
    kind: &'a str,
    description: &'a str,
    service_code: &'a str,
    account_number: &'a str,
}

#[derive(Serialize)]
struct PaypalSearchForm<'a> {
    date: DateRange,
    username: &'a str,
    #[serde(serialize_with = "amount")]
    amount: f64,
    email: &'a str,
    #[serde(rename = "transactionid")]
    transaction_id: &'a str,
    currency: &'a str,
}

#[derive(Serialize)]
pub(crate) struct IdForm {
    pub(crate) id: u64,
}

#[derive(Serialize)]
pub(crate) struct ListQuery<'a> {
    pub(crate) service_code: &'a str,
    pub(crate) account_number: &'a str,
}

#[derive(Serialize)]
pub(crate) struct WhatsappForm<'a> {
    pub(crate) mutation_id: u64,
    pub(crate) sender_phone: &'a str,
    pub(crate) receiver_phone: &'a str,
}

impl AddAccount {
    pub(crate) fn payload(&self) -> Result<Payload> {
        Payload::from_serialize(&AddForm {
            service_code: self.service_code.to_lowercase(),
            package_code: self.package_code.to_lowercase(),
            username: &self.username,
            password: &self.password,
            account_number: &self.account_number,
            account_name: &self.account_name,
            ipn_url: &self.ipn_url,
            status: self.status.to_uppercase(),
        })
    }
}

impl UpdateAccount {
    pub(crate) fn payload(&self) -> Result<Payload> {
        Payload::from_serialize(&UpdateForm {
            id: self.id,
            password: &self.password,
            account_number: &self.account_number,
            ipn_url: &self.ipn_url,
            status: self.status.to_uppercase(),
        })
    }
}

impl BankSearch {
    pub(crate) fn payload(&self) -> Result<Payload> {
        Payload::from_serialize(&BankSearchForm {
            date: self.date,
            amount: self.amount,
            kind: &self.kind,
            description: &self.description,
            service_code: &self.service_code,
            account_number: &self.account_number,
        })
    }
}

impl PaypalSearch {
    pub(crate) fn payload(&self) -> Result<Payload> {
        Payload::from_serialize(&PaypalSearchForm {
            date: self.date,
            username: &self.username,
            amount: self.amount,
            email: &self.email,
            transaction_id: &self.transaction_id,
            currency: &self.currency,
        })
    }
}

fn timestamp<S: Serializer>(value: &NaiveDateTime, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(&value.format(DATE_FORMAT))
}

/// Whole amounts go out without a fractional part: `15000`, not `15000.0`
#[allow(clippy::cast_possible_truncation, clippy::trivially_copy_pass_by_ref)]
fn amount<S: Serializer>(value: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}
