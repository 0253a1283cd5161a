//! Socket and connection management.
//!
//! Mirrors the shape of Chromium's `net/socket/`, cut down to one connection:
//! - [`connection`]: the connection the console talks over (connect/close/reconnect)
//! - [`connectjob`]: DNS → TCP → CONNECT tunnel → TLS connection flow
//! - [`proxy`]: `HTTP_PROXY` settings
//! - [`matcher`]: proxy bypass rules
//! - [`tls`]: TLS configuration with BoringSSL

pub mod client;
pub mod connectjob;
pub mod connection;
pub mod matcher;
pub mod proxy;
pub mod tls;
