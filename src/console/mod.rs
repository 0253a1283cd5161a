//! The interactive front-end.
//!
//! - [`config`]: command-line arguments, options and the target server
//! - [`path`]: current-path navigation
//! - [`command`]: classification of input lines
//! - [`session`]: per-run state and request execution
//! - [`render`]: terminal output
//! - [`repl`]: the read-eval-print loop

pub mod command;
pub mod config;
pub mod path;
pub mod render;
pub mod repl;
pub mod session;
