//! Response content and result shaping
//!
//! A terminal method returns the bare [`Content`] by default. With
//! [`return_response_object`](crate::RequestBuilder::return_response_object)
//! it returns a [`StructuredResult`] carrying status, content type and
//! transport error as data; with
//! [`return_response_array`](crate::RequestBuilder::return_response_array)
//! the same result as a JSON map.

use bytes::Bytes;
use cekmutasi_client::{BehaviorConfig, HeaderFields, JsonDecode, RawTransportResponse, parse_header_block};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Response body after decoding
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Content {
    /// No usable body: the transfer failed or JSON decoding did not succeed
    #[default]
    None,
    /// Body bytes as received
    Raw(Bytes),
    /// Decoded JSON value
    Json(Value),
    /// Decoded JSON object (arrays are keyed by index)
    Map(Map<String, Value>),
}

impl Content {
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Content::None)
    }

    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Content::Raw(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Raw body as text, lossily decoded
    #[must_use]
    pub fn text(&self) -> Option<String> {
        self.as_bytes()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    #[must_use]
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Content::Json(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_map(&self) -> Option<&Map<String, Value>> {
        match self {
            Content::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Field of a decoded JSON object, in either decode mode
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Content::Json(value) => value.get(key),
            Content::Map(map) => map.get(key),
            _ => None,
        }
    }
}

impl Serialize for Content {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Content::None => serializer.serialize_none(),
            Content::Raw(bytes) => serializer.serialize_str(&String::from_utf8_lossy(bytes)),
            Content::Json(value) => value.serialize(serializer),
            Content::Map(map) => map.serialize(serializer),
        }
    }
}

/// Outcome of one transaction as data
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredResult {
    pub content: Content,
    /// HTTP status, 0 when no response was received
    pub status: u16,
    pub content_type: Option<String>,
    /// Transport failure description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Response headers, present when header capture was enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HeaderFields>,
}

impl StructuredResult {
    /// No transport failure and a 2xx status
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error.is_none() && (200..300).contains(&self.status)
    }

    /// Convert into a JSON map with the same field names as the serialized form
    #[must_use]
    pub fn to_map(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                log::warn!("cekmutasi response: structured result serialized to {other}");
                Map::new()
            }
            Err(e) => {
                log::warn!("cekmutasi response: structured result not serializable: {e}");
                Map::new()
            }
        }
    }
}

/// Value returned by a terminal method
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Content(Content),
    Object(StructuredResult),
    Map(Map<String, Value>),
}

impl Response {
    /// Response content regardless of shape.
    ///
    /// The map form keeps content as JSON, so a string `content` there comes
    /// back as [`Content::Raw`] text; a decoded JSON string is not told apart
    /// from a raw body.
    #[must_use]
    pub fn into_content(self) -> Content {
        match self {
            Response::Content(content) => content,
            Response::Object(result) => result.content,
            Response::Map(mut map) => match map.remove("content") {
                None | Some(Value::Null) => Content::None,
                Some(Value::String(text)) => Content::Raw(Bytes::from(text)),
                Some(Value::Object(fields)) => Content::Map(fields),
                Some(value) => Content::Json(value),
            },
        }
    }

    #[must_use]
    pub fn into_object(self) -> Option<StructuredResult> {
        match self {
            Response::Object(result) => Some(result),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_map(self) -> Option<Map<String, Value>> {
        match self {
            Response::Map(map) => Some(map),
            _ => None,
        }
    }
}

/// Decode a body as JSON; invalid JSON yields [`Content::None`]
pub(crate) fn decode_json(body: &[u8], mode: JsonDecode) -> Content {
    let value = match serde_json::from_slice::<Value>(body) {
        Ok(value) => value,
        Err(e) => {
            log::debug!("cekmutasi response: body is not JSON: {e}");
            return Content::None;
        }
    };

    match (mode, value) {
        (_, Value::Null) => Content::None,
        (JsonDecode::Object, value) => Content::Json(value),
        (JsonDecode::Map, Value::Object(map)) => Content::Map(map),
        (JsonDecode::Map, Value::Array(items)) => Content::Map(
            items
                .into_iter()
                .enumerate()
                .map(|(index, item)| (index.to_string(), item))
                .collect(),
        ),
        (JsonDecode::Map, scalar) => Content::Json(scalar),
    }
}

/// Shape decoded content into the response form the caller asked for
pub(crate) fn shape(
    content: Content,
    raw: &RawTransportResponse,
    header_block: Option<&str>,
    behavior: &BehaviorConfig,
    capture_headers: bool,
) -> Response {
    if !behavior.wants_structured() {
        return Response::Content(content);
    }

    let result = StructuredResult {
        content,
        status: raw.status,
        content_type: raw.content_type.clone(),
        error: raw.error.clone(),
        headers: capture_headers.then(|| header_block.map(parse_header_block).unwrap_or_default()),
    };

    if behavior.response_object {
        Response::Object(result)
    } else {
        Response::Map(result.to_map())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn raw(status: u16) -> RawTransportResponse {
        RawTransportResponse {
            status,
            content_type: Some("application/json".to_string()),
            ..RawTransportResponse::default()
        }
    }

    #[test]
    fn invalid_json_is_none() {
        assert_eq!(decode_json(b"<html>", JsonDecode::Object), Content::None);
        assert_eq!(decode_json(b"", JsonDecode::Map), Content::None);
    }

    #[test]
    fn map_mode_keys_arrays_by_index() {
        let content = decode_json(br#"["a","b"]"#, JsonDecode::Map);
        assert_eq!(content.get("1"), Some(&json!("b")));
    }

    #[test]
    fn object_wins_over_array() {
        let behavior = BehaviorConfig {
            response_object: true,
            response_array: true,
            ..BehaviorConfig::default()
        };
        let response = shape(Content::None, &raw(204), None, &behavior, false);
        assert!(matches!(response, Response::Object(StructuredResult { status: 204, .. })));
    }

    #[test]
    fn plain_content_without_structure() {
        let response = shape(Content::Json(json!(1)), &raw(200), None, &BehaviorConfig::default(), false);
        assert_eq!(response, Response::Content(Content::Json(json!(1))));
    }

    #[test]
    fn map_form_matches_serialized_object() {
        let behavior = BehaviorConfig {
            response_array: true,
            ..BehaviorConfig::default()
        };
        let block = "HTTP/1.1 200 OK\r\nX-Id: 7\r\n\r\n";
        let response = shape(
            Content::Map(json!({ "success": true }).as_object().cloned().unwrap_or_default()),
            &raw(200),
            Some(block),
            &behavior,
            true,
        );

        let map = response.into_map().expect("map response");
        assert_eq!(
            Value::Object(map),
            json!({
                "content": { "success": true },
                "status": 200,
                "contentType": "application/json",
                "headers": { "X-Id": "7" },
            })
        );
    }

    #[test]
    fn serialized_result_skips_absent_error() {
        let result = StructuredResult {
            content: Content::Raw(Bytes::from_static(b"ok")),
            status: 200,
            content_type: None,
            error: None,
            headers: None,
        };
        assert_eq!(
            serde_json::to_value(&result).ok(),
            Some(json!({ "content": "ok", "status": 200, "contentType": null }))
        );
    }

    #[test]
    fn map_form_equals_serialized_result() {
        let block = "HTTP/1.1 502 Bad Gateway\r\nSet-Cookie: a=1\r\nSet-Cookie: b=2\r\n\r\n";
        let result = StructuredResult {
            content: Content::None,
            status: 502,
            content_type: None,
            error: Some("upstream reset".to_string()),
            headers: Some(parse_header_block(block)),
        };

        assert_eq!(serde_json::to_value(&result).ok(), Some(Value::Object(result.to_map())));
        assert_eq!(result.to_map().get("headers"), Some(&json!({ "Set-Cookie": ["a=1", "b=2"] })));
    }

    #[test]
    fn raw_content_survives_map_form() {
        let behavior = BehaviorConfig {
            response_array: true,
            ..BehaviorConfig::default()
        };
        let response = shape(
            Content::Raw(Bytes::from_static(b"plain text")),
            &raw(200),
            None,
            &behavior,
            false,
        );

        assert_eq!(response.into_content(), Content::Raw(Bytes::from_static(b"plain text")));
    }
}
