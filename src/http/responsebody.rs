//! Response body framing and the buffered body.
//! Mirrors Chromium's HttpStreamParser body-length rules, minus chunked.

use crate::base::neterror::NetError;
use crate::http::orderedheaders::OrderedHeaders;
use bytes::Bytes;
use http::{Method, StatusCode};

/// How the end of a response body is found.
///
/// Chunked transfer coding is not decoded; such a body is read until the
/// connection closes and shown as sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFraming {
    /// No body follows the head.
    None,
    /// Exactly this many bytes follow.
    Length(u64),
    /// The body runs until the server closes the connection.
    UntilEof,
}

impl BodyFraming {
    /// Decide framing for a response to `method`.
    pub fn for_response(
        method: &Method,
        status: StatusCode,
        headers: &OrderedHeaders,
    ) -> Result<Self, NetError> {
        if *method == Method::HEAD
            || status.is_informational()
            || status == StatusCode::NO_CONTENT
            || status == StatusCode::NOT_MODIFIED
        {
            return Ok(BodyFraming::None);
        }

        let mut length: Option<u64> = None;
        for value in headers.get_all("Content-Length") {
            let parsed = value
                .trim()
                .parse::<u64>()
                .map_err(|_| NetError::InvalidResponse)?;
            match length {
                Some(prev) if prev != parsed => {
                    return Err(NetError::ResponseHeadersMultipleContentLength)
                }
                _ => length = Some(parsed),
            }
        }

        Ok(match length {
            Some(0) => BodyFraming::None,
            Some(n) => BodyFraming::Length(n),
            None => BodyFraming::UntilEof,
        })
    }

    /// Whether reading this body consumes the connection.
    pub fn ends_connection(&self) -> bool {
        matches!(self, BodyFraming::UntilEof)
    }
}

/// A fully read response body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseBody {
    data: Bytes,
}

impl ResponseBody {
    pub fn new(data: Bytes) -> Self {
        Self { data }
    }

    /// Read entire body as bytes.
    pub fn bytes(&self) -> &Bytes {
        &self.data
    }

    /// Body as text; invalid UTF-8 is replaced rather than rejected.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }
}
