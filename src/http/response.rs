//! HTTP response head and the fully read response.

use crate::http::orderedheaders::OrderedHeaders;
use crate::http::responsebody::{BodyFraming, ResponseBody};
use http::{StatusCode, Version};

/// Display band of a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 1xx and anything else below 200
    Other,
    /// 2xx
    Success,
    /// 3xx
    Redirection,
    /// 4xx
    ClientError,
    /// 5xx and above
    ServerError,
}

impl StatusClass {
    pub fn of(status: StatusCode) -> Self {
        match status.as_u16() {
            500.. => StatusClass::ServerError,
            400..=499 => StatusClass::ClientError,
            300..=399 => StatusClass::Redirection,
            200..=299 => StatusClass::Success,
            _ => StatusClass::Other,
        }
    }
}

/// Status line and headers, as read off the wire.
#[derive(Debug, Clone)]
pub struct ResponseHead {
    /// Protocol token exactly as sent (`HTTP/1.1`).
    pub proto: String,
    pub version: Version,
    pub status: StatusCode,
    pub reason: String,
    pub headers: OrderedHeaders,
    /// How the body that follows is delimited.
    pub framing: BodyFraming,
    /// The server will not serve another request on this connection.
    pub last_response: bool,
}

impl ResponseHead {
    /// `HTTP/1.1 200 OK`
    pub fn proto_status(&self) -> String {
        let line = format!("{} {} {}", self.proto, self.status.as_u16(), self.reason);
        line.trim_end().to_string()
    }

    pub fn status_class(&self) -> StatusClass {
        StatusClass::of(self.status)
    }
}

/// A response whose body has been read in full.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    head: ResponseHead,
    body: ResponseBody,
}

impl HttpResponse {
    pub fn new(head: ResponseHead, body: ResponseBody) -> Self {
        Self { head, body }
    }

    pub fn head(&self) -> &ResponseHead {
        &self.head
    }

    /// Get the status code.
    pub fn status(&self) -> StatusCode {
        self.head.status
    }

    /// Get the HTTP version.
    pub fn version(&self) -> Version {
        self.head.version
    }

    /// Get a reference to the headers.
    pub fn headers(&self) -> &OrderedHeaders {
        &self.head.headers
    }

    pub fn proto_status(&self) -> String {
        self.head.proto_status()
    }

    pub fn status_class(&self) -> StatusClass {
        self.head.status_class()
    }

    pub fn body(&self) -> &ResponseBody {
        &self.body
    }
}
