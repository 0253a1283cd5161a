//! Client-side cookie state.
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`cookie`] | A single received cookie |
//! | [`parser`] | `Set-Cookie` header parsing |
//! | [`jar`] | The session's append-only cookie list |
//!
//! Cookies are recorded for inspection with `.cookies`; they are not
//! attached to outgoing requests and never expire from the jar.
//!
//! ```rust
//! use httpconsole::cookies::jar::CookieJar;
//!
//! let mut jar = CookieJar::new();
//! jar.add_set_cookie("session=abc123; path=/; HttpOnly");
//! assert_eq!(jar.flattened().collect::<Vec<_>>(), vec![("session", "abc123")]);
//! ```

pub mod cookie;
pub mod jar;
pub mod parser;
