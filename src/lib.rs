//! # httpconsole
//!
//! An interactive console for one HTTP server.
//!
//! The console keeps a single persistent connection, a current path, a set
//! of request headers and (optionally) the cookies the server sets. Each
//! input line either moves the path, sets a header, sends a request or runs
//! a dot-command.
//!
//! ## Example session
//!
//! ```text
//! http://localhost:8080/: /users
//! http://localhost:8080/users: Accept: application/json
//! http://localhost:8080/users: GET 42
//! HTTP/1.1 200 OK
//! Content-Type: application/json
//!
//! {"id":42}
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error codes and error context helpers
//! - [`cookies`] - Set-Cookie parsing and the session cookie jar
//! - [`http`] - HTTP/1.1 requests, responses and the transaction state machine
//! - [`socket`] - TCP and TLS connections, proxies and tunnels
//! - [`console`] - Command parsing, rendering and the REPL

pub mod base;
pub mod console;
pub mod cookies;
pub mod http;
pub mod socket;
