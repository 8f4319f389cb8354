//! Raw transport response

use bytes::Bytes;

/// What the transport observed for one transaction.
///
/// With header capture enabled, `data` starts with the raw header block of
/// `header_size` bytes, followed by the body. A transport failure leaves
/// `status` at 0 and sets `error`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTransportResponse {
    pub data: Bytes,
    pub header_size: usize,
    pub status: u16,
    pub content_type: Option<String>,
    pub error: Option<String>,
}

impl RawTransportResponse {
    /// Response for a transaction that never produced an HTTP response
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_transport_error(&self) -> bool {
        self.error.is_some()
    }

    /// Split the captured data into the raw header block and the body
    #[must_use]
    pub fn split_headers(&self) -> (Option<String>, Bytes) {
        if self.header_size == 0 || self.header_size > self.data.len() {
            return (None, self.data.clone());
        }

        let header = String::from_utf8_lossy(&self.data[..self.header_size]).into_owned();
        (Some(header), self.data.slice(self.header_size..))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_block_is_split_by_size() {
        let block = "HTTP/1.1 200 OK\r\nX-A: 1\r\n\r\n";
        let response = RawTransportResponse {
            data: Bytes::from(format!("{block}body")),
            header_size: block.len(),
            status: 200,
            ..RawTransportResponse::default()
        };

        let (header, body) = response.split_headers();
        assert_eq!(header.as_deref(), Some(block));
        assert_eq!(&body[..], b"body");
    }

    #[test]
    fn failed_response_has_no_status() {
        let response = RawTransportResponse::failed("connection refused");
        assert_eq!(response.status, 0);
        assert!(response.data.is_empty());
        assert_eq!(response.split_headers().0, None);
    }
}
