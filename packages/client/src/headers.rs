//! Header lines and raw header blocks
//!
//! Outgoing headers are kept as `"Name: Value"` lines in the order they were
//! added. Incoming headers arrive as a raw block and are parsed into
//! [`HeaderFields`], folding repeated names into ordered lists.

use hashbrown::HashMap;
use serde::Serialize;

/// Split a header line on its first `:`, trimming both sides.
///
/// Returns `None` for lines without a colon or with an empty name.
#[must_use]
pub fn split_header_line(line: &str) -> Option<(&str, &str)> {
    let (name, value) = line.split_once(':')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name, value.trim()))
}

/// Format a name/value pair as a header line
#[must_use]
pub fn header_line(name: &str, value: &str) -> String {
    format!("{name}: {value}")
}

/// Title-case a header name: `set-cookie` becomes `Set-Cookie`
#[must_use]
pub fn canonical_name(name: &str) -> String {
    name.split('-')
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

/// Value of a parsed response header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum HeaderValue {
    Single(String),
    /// Every value of a repeated header, in arrival order
    Multi(Vec<String>),
}

impl HeaderValue {
    /// First value of the header
    #[must_use]
    pub fn first(&self) -> &str {
        match self {
            HeaderValue::Single(value) => value,
            HeaderValue::Multi(values) => values.first().map_or("", String::as_str),
        }
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            HeaderValue::Single(value) => vec![value.clone()],
            HeaderValue::Multi(values) => values.clone(),
        }
    }

    fn push(&mut self, value: String) {
        match self {
            HeaderValue::Single(first) => {
                *self = HeaderValue::Multi(vec![std::mem::take(first), value]);
            }
            HeaderValue::Multi(values) => values.push(value),
        }
    }
}

/// Response headers keyed by name as received
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HeaderFields(HashMap<String, HeaderValue>);

impl HeaderFields {
    /// Look up a header, ignoring ASCII case
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&HeaderValue> {
        self.0.get(name).or_else(|| {
            self.0
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value)
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &HeaderValue)> {
        self.0.iter()
    }

    fn insert(&mut self, name: &str, value: &str) {
        match self.0.get_mut(name) {
            Some(existing) => existing.push(value.to_string()),
            None => {
                self.0
                    .insert(name.to_string(), HeaderValue::Single(value.to_string()));
            }
        }
    }
}

/// Parse a raw response header block.
///
/// The block is split on CRLF; blank lines and lines without a `:` (such as
/// the status line) are dropped.
#[must_use]
pub fn parse_header_block(block: &str) -> HeaderFields {
    let mut fields = HeaderFields::default();

    for line in block.split("\r\n").map(str::trim).filter(|line| !line.is_empty()) {
        if let Some((name, value)) = split_header_line(line) {
            fields.insert(name, value);
        }
    }

    fields
}
