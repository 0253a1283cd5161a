use crate::base::neterror::NetError;
use crate::http::request::HttpRequest;
use crate::http::response::{HttpResponse, ResponseHead};
use crate::http::retry::{should_retry, RetryReason};
use crate::socket::connection::Connection;
use http::Method;
use thiserror::Error;

/// A request that could not be completed. The message names the stage
/// that failed.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum TransactionError {
    #[error("could not connect: {0}")]
    Connect(NetError),
    #[error("could not send request: {0}")]
    Send(NetError),
    #[error("could not read response: {0}")]
    Read(NetError),
}

impl TransactionError {
    /// The underlying network error.
    pub fn net_error(&self) -> &NetError {
        match self {
            TransactionError::Connect(e) | TransactionError::Send(e) | TransactionError::Read(e) => e,
        }
    }

    /// Why the request may be resent, if it may. A failed write is
    /// recoverable when the connection was lost; a failed read only when
    /// nothing of the response had arrived.
    pub fn retry_reason(&self) -> Option<RetryReason> {
        match self {
            TransactionError::Connect(_) => None,
            TransactionError::Send(e) => RetryReason::from_error(e),
            TransactionError::Read(NetError::EmptyResponse) => Some(RetryReason::EmptyResponse),
            TransactionError::Read(_) => None,
        }
    }
}

/// One request/response exchange on the session's connection.
///
/// A request that hits a closed connection is resent once on a fresh one.
/// A response that ends keep-alive is still returned; [`finish`] then
/// replaces the connection so the next request finds it open.
///
/// [`finish`]: HttpNetworkTransaction::finish
pub struct HttpNetworkTransaction<'c> {
    connection: &'c mut Connection,
    retry_attempts: usize,
}

impl<'c> HttpNetworkTransaction<'c> {
    pub fn new(connection: &'c mut Connection) -> Self {
        Self {
            connection,
            retry_attempts: 0,
        }
    }

    /// Send `request` and read the complete response.
    pub async fn start(&mut self, request: &HttpRequest<'_>) -> Result<HttpResponse, TransactionError> {
        self.retry_attempts = 0;

        let head = loop {
            // Rebuilt each attempt; the body is re-supplied from its buffer.
            let wire = request.to_wire();
            match self.send_and_read_head(&wire, request.method).await {
                Ok(head) => break head,
                Err(e) => match e.retry_reason() {
                    Some(reason) if should_retry(self.retry_attempts) => {
                        tracing::info!(
                            ?reason,
                            code = e.net_error().as_i32(),
                            error = %e,
                            "connection lost, resending request"
                        );
                        self.retry_attempts += 1;
                        self.connection
                            .reconnect()
                            .await
                            .map_err(TransactionError::Connect)?;
                    }
                    _ => return Err(e),
                },
            }
        };

        let stream = self.connection.stream_mut().map_err(TransactionError::Read)?;
        let body = stream
            .read_body(head.framing)
            .await
            .map_err(TransactionError::Read)?;

        Ok(HttpResponse::new(head, body))
    }

    /// Reconnect if `response` was the last one the server will serve on
    /// this connection.
    pub async fn finish(self, response: &HttpResponse) -> Result<(), TransactionError> {
        if response.head().last_response {
            tracing::debug!("server ended keep-alive, replacing connection");
            self.connection
                .reconnect()
                .await
                .map_err(TransactionError::Connect)?;
        }
        Ok(())
    }

    async fn send_and_read_head(
        &mut self,
        wire: &[u8],
        method: &Method,
    ) -> Result<ResponseHead, TransactionError> {
        let stream = self.connection.stream_mut().map_err(TransactionError::Send)?;
        stream
            .write_request(wire)
            .await
            .map_err(TransactionError::Send)?;

        stream
            .read_response_head(method)
            .await
            .map_err(TransactionError::Read)
    }
}
