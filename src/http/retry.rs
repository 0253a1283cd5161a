//! Retry on connection loss.
//!
//! Based on Chromium's `HttpNetworkTransaction::RetryReason` enum, narrowed to
//! the conditions where the server simply hung up on a kept-alive connection.
//! A request is resent at most [`MAX_RETRIES`] times, on a fresh connection.

use crate::base::neterror::NetError;

/// Resends allowed per request.
pub const MAX_RETRIES: usize = 1;

/// Recoverable conditions (mirrors Chromium's RetryReason enum).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryReason {
    /// The socket was closed or reset by the peer.
    ConnectionClosed,
    /// The server had already ended keep-alive on this connection.
    PersistentEof,
    /// The server closed the connection without answering.
    EmptyResponse,
}

impl RetryReason {
    /// Map a NetError to a RetryReason, if the error is retryable.
    pub fn from_error(error: &NetError) -> Option<Self> {
        match error {
            NetError::ConnectionClosed
            | NetError::ConnectionReset
            | NetError::ConnectionAborted => Some(Self::ConnectionClosed),
            NetError::PersistentEof => Some(Self::PersistentEof),
            NetError::EmptyResponse => Some(Self::EmptyResponse),
            _ => None,
        }
    }
}

/// Check if we should retry based on attempt count.
pub fn should_retry(retries: usize) -> bool {
    retries < MAX_RETRIES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert_eq!(
            RetryReason::from_error(&NetError::ConnectionClosed),
            Some(RetryReason::ConnectionClosed)
        );
        assert_eq!(
            RetryReason::from_error(&NetError::ConnectionReset),
            Some(RetryReason::ConnectionClosed)
        );
        assert_eq!(
            RetryReason::from_error(&NetError::PersistentEof),
            Some(RetryReason::PersistentEof)
        );
        assert_eq!(
            RetryReason::from_error(&NetError::EmptyResponse),
            Some(RetryReason::EmptyResponse)
        );
    }

    #[test]
    fn test_fatal_errors_are_not_retried() {
        assert_eq!(RetryReason::from_error(&NetError::InvalidHttpResponse), None);
        assert_eq!(RetryReason::from_error(&NetError::ContentLengthMismatch), None);
        assert_eq!(RetryReason::from_error(&NetError::Io("boom".into())), None);
    }

    #[test]
    fn test_single_retry_budget() {
        assert!(should_retry(0));
        assert!(!should_retry(1));
        assert!(!should_retry(2));
    }
}
