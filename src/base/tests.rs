use crate::base::neterror::NetError;

#[test]
fn test_chromium_codes() {
    assert_eq!(NetError::ConnectionReset.as_i32(), -101);
    assert_eq!(NetError::EmptyResponse.as_i32(), -324);
    // Keep-alive bookkeeping sits outside Chromium's ranges.
    assert_eq!(NetError::PersistentEof.as_i32(), -905);
}

#[test]
fn test_context_variants_share_base_code() {
    let err = NetError::TunnelRefused {
        target: "example.com:443".to_string(),
        status: "HTTP/1.1 403 Forbidden".to_string(),
    };
    assert_eq!(err.as_i32(), NetError::TunnelConnectionFailed.as_i32());
    assert!(err.to_string().contains("403 Forbidden"));
}

#[test]
fn test_connection_loss_classification() {
    assert!(NetError::ConnectionClosed.is_connection_loss());
    assert!(NetError::PersistentEof.is_connection_loss());
    assert!(NetError::EmptyResponse.is_connection_loss());
    assert!(!NetError::InvalidHttpResponse.is_connection_loss());
    assert!(!NetError::SslProtocolError.is_connection_loss());
}
