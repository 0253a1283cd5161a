//! Request body for POST/PUT operations.

use bytes::Bytes;

/// Buffered request body.
///
/// Held in memory so the same bytes can be written again when a request is
/// retried on a fresh connection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestBody {
    data: Bytes,
}

impl RequestBody {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Length in bytes, sent as `Content-Length`.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// A fresh handle on the body bytes. Cheap; the buffer is shared.
    pub fn bytes(&self) -> Bytes {
        self.data.clone()
    }
}

impl AsRef<[u8]> for RequestBody {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl From<String> for RequestBody {
    fn from(s: String) -> Self {
        Self {
            data: Bytes::from(s),
        }
    }
}

impl From<&str> for RequestBody {
    fn from(s: &str) -> Self {
        Self {
            data: Bytes::copy_from_slice(s.as_bytes()),
        }
    }
}

impl From<Bytes> for RequestBody {
    fn from(data: Bytes) -> Self {
        Self { data }
    }
}
