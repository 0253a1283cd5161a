use thiserror::Error;

/// Network error codes for the console's single connection.
///
/// Plain variants keep Chromium's `net_error_list.h` numbering, which is
/// logged alongside the message; the context-carrying variants map onto the
/// code of their plain counterpart.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum NetError {
    // Connection Errors
    #[error("Connection closed (TCP FIN)")]
    ConnectionClosed,
    #[error("Connection reset (TCP RST)")]
    ConnectionReset,
    #[error("Connection aborted")]
    ConnectionAborted,
    #[error("Name not resolved")]
    NameNotResolved,
    #[error("Socket not connected")]
    SocketNotConnected,
    #[error("SSL protocol error")]
    SslProtocolError,
    #[error("Tunnel connection failed")]
    TunnelConnectionFailed,

    // HTTP Errors
    #[error("Invalid URL")]
    InvalidUrl,
    #[error("Invalid response")]
    InvalidResponse,
    #[error("Empty response")]
    EmptyResponse,
    #[error("Response headers too big")]
    ResponseHeadersTooBig,
    #[error("Response headers multiple Content-Length")]
    ResponseHeadersMultipleContentLength,
    #[error("Content-Length mismatch")]
    ContentLengthMismatch,
    #[error("Invalid HTTP response")]
    InvalidHttpResponse,

    // Keep-alive bookkeeping (custom code)
    #[error("Persistent connection closed by peer")]
    PersistentEof,

    // Errors with context
    #[error("Connection to {host}:{port} failed: {message}")]
    ConnectionFailedTo {
        host: String,
        port: u16,
        message: String,
    },
    #[error("Could not resolve {domain}: {message}")]
    NameNotResolvedFor { domain: String, message: String },
    #[error("Proxy refused tunnel to {target}: {status}")]
    TunnelRefused { target: String, status: String },
    #[error("SSL handshake with {host} failed: {message}")]
    SslHandshakeFailed { host: String, message: String },
    #[error("I/O error: {0}")]
    Io(String),
}

impl NetError {
    /// Chromium error code.
    pub fn as_i32(&self) -> i32 {
        match self {
            NetError::ConnectionClosed => -100,
            NetError::ConnectionReset => -101,
            NetError::ConnectionAborted => -103,
            NetError::ConnectionFailedTo { .. } => -104,
            NetError::NameNotResolved | NetError::NameNotResolvedFor { .. } => -105,
            NetError::SslProtocolError | NetError::SslHandshakeFailed { .. } => -107,
            NetError::TunnelConnectionFailed | NetError::TunnelRefused { .. } => -111,
            NetError::SocketNotConnected => -112,

            NetError::InvalidUrl => -300,
            NetError::InvalidResponse => -320,
            NetError::EmptyResponse => -324,
            NetError::ResponseHeadersTooBig => -325,
            NetError::ResponseHeadersMultipleContentLength => -346,
            NetError::ContentLengthMismatch => -354,
            NetError::InvalidHttpResponse => -370,

            NetError::PersistentEof => -905,
            NetError::Io(_) => -2,
        }
    }

    /// True for the conditions that mean the peer went away between or
    /// during an exchange, as opposed to a protocol or setup failure.
    pub fn is_connection_loss(&self) -> bool {
        matches!(
            self,
            NetError::ConnectionClosed
                | NetError::ConnectionReset
                | NetError::ConnectionAborted
                | NetError::PersistentEof
                | NetError::EmptyResponse
        )
    }
}
