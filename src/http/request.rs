//! HTTP/1.1 request serialization.

use crate::http::orderedheaders::OrderedHeaders;
use crate::http::requestbody::RequestBody;
use crate::socket::connection::{Endpoint, RequestForm};
use http::Method;

/// `User-Agent` sent when the session has none.
pub const DEFAULT_USER_AGENT: &str = concat!("httpconsole/", env!("CARGO_PKG_VERSION"));

/// Headers the serializer owns; session values for these are not written.
const FRAMING_HEADERS: [&str; 2] = ["Content-Length", "Transfer-Encoding"];

/// One outgoing request. Borrows the session's header set so edits made
/// between requests are always what goes on the wire.
#[derive(Debug)]
pub struct HttpRequest<'a> {
    pub method: &'a Method,
    /// Request target as written on the request line.
    pub target: String,
    pub headers: &'a OrderedHeaders,
    pub body: RequestBody,
}

impl<'a> HttpRequest<'a> {
    pub fn new(
        method: &'a Method,
        target: String,
        headers: &'a OrderedHeaders,
        body: RequestBody,
    ) -> Self {
        Self {
            method,
            target,
            headers,
            body,
        }
    }

    /// Whether a `Content-Length` line is written.
    fn sends_content_length(&self) -> bool {
        !self.body.is_empty()
            || *self.method == Method::POST
            || *self.method == Method::PUT
            || *self.method == Method::PATCH
    }

    /// The exact bytes written to the connection.
    pub fn to_wire(&self) -> Vec<u8> {
        let mut head = format!("{} {} HTTP/1.1\r\n", self.method, self.target);
        for (name, value) in self.headers.iter() {
            if FRAMING_HEADERS.iter().any(|h| h.eq_ignore_ascii_case(name)) {
                continue;
            }
            head.push_str(&format!("{}: {}\r\n", name, value));
        }
        if !self.headers.contains("User-Agent") {
            head.push_str(&format!("User-Agent: {}\r\n", DEFAULT_USER_AGENT));
        }
        if self.sends_content_length() {
            head.push_str(&format!("Content-Length: {}\r\n", self.body.len()));
        }
        head.push_str("\r\n");

        let mut wire = head.into_bytes();
        wire.extend_from_slice(self.body.as_ref());
        wire
    }
}

/// Request-line target for `path` on `endpoint`.
pub fn request_target(path: &str, form: RequestForm, endpoint: &Endpoint) -> String {
    match form {
        RequestForm::Origin => path.to_string(),
        RequestForm::Absolute => format!("http://{}{}", endpoint.authority(), path),
    }
}
