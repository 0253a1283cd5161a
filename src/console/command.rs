//! The console's input grammar.
//!
//! A line is classified by trying [`RULES`] in order; the first rule that
//! matches decides what the line means. Lines no rule accepts are
//! [`Command::Unknown`].

use http::Method;
use regex::Regex;
use std::sync::OnceLock;

/// Dot-prefixed directives that inspect or toggle session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaCommand {
    Headers,
    Cookies,
    Verbose,
    Options,
    Help,
    Quit,
}

impl MetaCommand {
    pub fn parse(line: &str) -> Option<Self> {
        Some(match line {
            ".h" | ".headers" => MetaCommand::Headers,
            ".c" | ".cookies" => MetaCommand::Cookies,
            ".v" | ".verbose" => MetaCommand::Verbose,
            ".o" | ".options" => MetaCommand::Options,
            ".?" | ".help" => MetaCommand::Help,
            ".q" | ".exit" => MetaCommand::Quit,
            _ => return None,
        })
    }
}

/// Text printed by `.help`.
pub const HELP: &str = "\
.headers, .h    show active request headers
.options, .o    show options
.cookies, .c    show client cookies
.verbose, .v    toggle wire-format request dump
.help, .?       display this message
.exit, .q, ^D   exit console
";

/// One classified input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Change the current path. Holds the fragment as typed.
    Navigate(String),
    /// Set a request header. An empty value means "leave unchanged".
    SetHeader { name: String, value: String },
    /// Send a request. `target` is the trimmed path fragment, possibly empty.
    Invoke { method: Method, target: String },
    Meta(MetaCommand),
    Unknown(String),
}

/// A classification rule: the command a line means, if the rule accepts it.
pub type Rule = fn(&str) -> Option<Command>;

/// Classification rules, tried first to last.
pub const RULES: [(&str, Rule); 4] = [
    ("navigate", navigate),
    ("set-header", set_header),
    ("invoke", invoke),
    ("meta", meta),
];

impl Command {
    /// Classify one trimmed, non-empty line.
    pub fn parse(line: &str) -> Command {
        RULES
            .iter()
            .find_map(|(_, rule)| rule(line))
            .unwrap_or_else(|| Command::Unknown(line.to_string()))
    }
}

fn header_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([a-zA-Z][a-zA-Z0-9\-]+):(.*)$").expect("header pattern is valid")
    })
}

fn method_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([A-Z]+)(.*)$").expect("method pattern is valid"))
}

fn navigate(line: &str) -> Option<Command> {
    (line.starts_with('/') || line == "..").then(|| Command::Navigate(line.to_string()))
}

fn set_header(line: &str) -> Option<Command> {
    let caps = header_regex().captures(line)?;
    Some(Command::SetHeader {
        name: caps[1].to_string(),
        value: caps[2].trim().to_string(),
    })
}

fn invoke(line: &str) -> Option<Command> {
    let caps = method_regex().captures(line)?;
    // Uppercase ASCII letters always form a valid token.
    let method = Method::from_bytes(caps[1].as_bytes()).ok()?;
    Some(Command::Invoke {
        method,
        target: caps[2].trim().to_string(),
    })
}

fn meta(line: &str) -> Option<Command> {
    MetaCommand::parse(line).map(Command::Meta)
}
