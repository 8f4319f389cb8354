//! Request payloads and their wire encodings
//!
//! A [`Payload`] is either an ordered set of fields or a pre-encoded string.
//! At send time it becomes a [`RequestBody`]: form-url-encoded text, a JSON
//! document, or a multipart form when attachments are present.

use std::path::PathBuf;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{self, Result};

/// Data attached to a request
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Ordered fields; nested arrays and objects use bracket notation on the wire
    Fields(Map<String, Value>),
    /// A body the caller already encoded
    Encoded(String),
}

impl Default for Payload {
    fn default() -> Self {
        Payload::Fields(Map::new())
    }
}

impl Payload {
    /// Build a field payload from any serializable struct or map.
    ///
    /// # Errors
    ///
    /// Returns an encode error when the value does not serialize to a JSON object.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        match serde_json::to_value(value).map_err(error::encode)? {
            Value::Object(fields) => Ok(Payload::Fields(fields)),
            other => Err(error::encode(format!(
                "payload must serialize to an object, got {}",
                value_kind(&other)
            ))),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Payload::Fields(fields) => fields.is_empty(),
            Payload::Encoded(body) => body.is_empty(),
        }
    }

    /// Flatten fields into ordered `(name, value)` pairs.
    ///
    /// Booleans become `1`/`0`, nulls are skipped, arrays and objects expand
    /// into `key[index]` / `key[name]` entries.
    #[must_use]
    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Payload::Fields(fields) = self {
            for (key, value) in fields {
                flatten_into(&mut pairs, key.clone(), value);
            }
        }
        pairs
    }

    /// Query string for GET-style requests.
    ///
    /// Only field payloads are appended to the URL; a pre-encoded string or an
    /// empty payload yields `None`.
    pub fn query_string(&self) -> Result<Option<String>> {
        match self {
            Payload::Fields(fields) if !fields.is_empty() => {
                serde_urlencoded::to_string(self.pairs())
                    .map(Some)
                    .map_err(error::encode)
            }
            _ => Ok(None),
        }
    }
}

impl From<&str> for Payload {
    fn from(body: &str) -> Self {
        Payload::Encoded(body.to_string())
    }
}

impl From<String> for Payload {
    fn from(body: String) -> Self {
        Payload::Encoded(body)
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(fields: Map<String, Value>) -> Self {
        Payload::Fields(fields)
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(fields) => Payload::Fields(fields),
            Value::String(body) => Payload::Encoded(body),
            Value::Null => Payload::default(),
            other => Payload::Encoded(other.to_string()),
        }
    }
}

impl<K, V> From<Vec<(K, V)>> for Payload
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from(fields: Vec<(K, V)>) -> Self {
        Payload::Fields(
            fields
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Payload
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from(fields: [(K, V); N]) -> Self {
        Payload::from(Vec::from(fields))
    }
}

/// A file sent as one multipart field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAttachment {
    pub key: String,
    pub path: PathBuf,
    pub mime_type: Option<String>,
    pub file_name: Option<String>,
}

impl FileAttachment {
    pub fn new(key: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            key: key.into(),
            path: path.into(),
            mime_type: None,
            file_name: None,
        }
    }

    /// Placeholder used when a JSON body is requested alongside attachments
    fn json_placeholder(&self) -> Value {
        let mut placeholder = Map::new();
        placeholder.insert(
            "file".to_string(),
            Value::String(self.path.to_string_lossy().into_owned()),
        );
        placeholder.insert(
            "mime".to_string(),
            self.mime_type.clone().map_or(Value::Null, Value::String),
        );
        placeholder.insert(
            "name".to_string(),
            self.file_name.clone().map_or(Value::Null, Value::String),
        );
        Value::Object(placeholder)
    }
}

/// Body as it goes on the wire
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// `application/x-www-form-urlencoded` text
    Form(String),
    /// JSON document
    Json(String),
    /// Pre-encoded string sent verbatim
    Raw(String),
    /// `multipart/form-data` with text fields and file parts
    Multipart(MultipartBody),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartBody {
    pub fields: Vec<(String, String)>,
    pub files: Vec<FileAttachment>,
}

/// Encode a payload for a POST-family request.
///
/// `multipart` is set when the request was marked as containing files; it
/// keeps key/value data structured for multipart encoding instead of
/// form-url-encoding it. JSON encoding wins over everything else, in which
/// case attachments are reduced to placeholders and never read.
pub fn encode_body(
    data: &Payload,
    files: &[FileAttachment],
    json: bool,
    multipart: bool,
) -> Result<RequestBody> {
    if json {
        if !files.is_empty() {
            log::warn!(
                "cekmutasi client: JSON request body with {} attachment(s); file contents are not sent",
                files.len()
            );
        }

        let document = match data {
            Payload::Fields(fields) => {
                let mut fields = fields.clone();
                for file in files {
                    fields.insert(file.key.clone(), file.json_placeholder());
                }
                serde_json::to_string(&fields).map_err(error::encode)?
            }
            Payload::Encoded(body) if files.is_empty() => {
                serde_json::to_string(body).map_err(error::encode)?
            }
            Payload::Encoded(body) => {
                let mut fields = decode_form(body)?
                    .into_iter()
                    .map(|(key, value)| (key, Value::String(value)))
                    .collect::<Map<String, Value>>();
                for file in files {
                    fields.insert(file.key.clone(), file.json_placeholder());
                }
                serde_json::to_string(&fields).map_err(error::encode)?
            }
        };

        return Ok(RequestBody::Json(document));
    }

    if multipart || !files.is_empty() {
        let fields = match data {
            Payload::Fields(_) => data.pairs(),
            Payload::Encoded(body) => decode_form(body)?,
        };
        return Ok(RequestBody::Multipart(MultipartBody {
            fields,
            files: files.to_vec(),
        }));
    }

    match data {
        Payload::Fields(_) => serde_urlencoded::to_string(data.pairs())
            .map(RequestBody::Form)
            .map_err(error::encode),
        Payload::Encoded(body) => Ok(RequestBody::Raw(body.clone())),
    }
}

fn decode_form(body: &str) -> Result<Vec<(String, String)>> {
    serde_urlencoded::from_str(body).map_err(error::encode)
}

fn flatten_into(pairs: &mut Vec<(String, String)>, key: String, value: &Value) {
    match value {
        Value::Null => {}
        Value::Bool(flag) => pairs.push((key, if *flag { "1" } else { "0" }.to_string())),
        Value::Number(number) => pairs.push((key, number.to_string())),
        Value::String(text) => pairs.push((key, text.clone())),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten_into(pairs, format!("{key}[{index}]"), item);
            }
        }
        Value::Object(fields) => {
            for (name, item) in fields {
                flatten_into(pairs, format!("{key}[{name}]"), item);
            }
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
