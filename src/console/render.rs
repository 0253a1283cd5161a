//! Terminal output.
//!
//! Responses go to the output sink; diagnostics (unknown commands, the
//! verbose wire dump) go to the diagnostic sink. Write errors are ignored:
//! there is nowhere left to report them.

use crate::http::response::{ResponseHead, StatusClass};
use colored::{ColoredString, Colorize};
use std::io::{self, Write};

/// Named colors of the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Prompt,
    HeaderName,
    Status(StatusClass),
}

impl Style {
    fn apply(self, text: &str) -> ColoredString {
        match self {
            Style::Prompt => text.bright_black(),
            Style::HeaderName => text.bold(),
            Style::Status(StatusClass::Success) => text.bold().green(),
            Style::Status(StatusClass::Redirection) => text.bold().cyan(),
            Style::Status(StatusClass::ClientError) => text.bold().red(),
            Style::Status(StatusClass::ServerError) => text.bold().white().on_red(),
            Style::Status(StatusClass::Other) => text.normal(),
        }
    }
}

pub struct Renderer {
    out: Box<dyn Write + Send>,
    diag: Box<dyn Write + Send>,
    color: bool,
}

impl Renderer {
    pub fn new(out: Box<dyn Write + Send>, diag: Box<dyn Write + Send>, color: bool) -> Self {
        Self { out, diag, color }
    }

    /// Render to stdout and stderr.
    pub fn stdio(color: bool) -> Self {
        Self::new(Box::new(io::stdout()), Box::new(io::stderr()), color)
    }

    pub fn color(&self) -> bool {
        self.color
    }

    /// `text` in `style`, or unchanged when color is off.
    pub fn paint(&self, style: Style, text: &str) -> String {
        if self.color {
            style.apply(text).to_string()
        } else {
            text.to_string()
        }
    }

    /// Write a line to the output sink.
    pub fn line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{}", text);
        let _ = self.out.flush();
    }

    pub fn blank(&mut self) {
        self.line("");
    }

    /// `HTTP/1.1 200 OK`, colored by status class.
    pub fn status_line(&mut self, head: &ResponseHead) {
        let text = self.paint(Style::Status(head.status_class()), &head.proto_status());
        self.line(&text);
    }

    /// `Name: value`, the name part emphasised.
    pub fn header(&mut self, name: &str, value: &str) {
        let name = self.paint(Style::HeaderName, &format!("{}: ", name));
        let _ = writeln!(self.out, "{}{}", name, value);
        let _ = self.out.flush();
    }

    /// Write a line to the diagnostic sink.
    pub fn diag(&mut self, text: &str) {
        let _ = writeln!(self.diag, "{}", text);
        let _ = self.diag.flush();
    }

    /// Raw bytes to the diagnostic sink, as the wire dump.
    pub fn wire_dump(&mut self, wire: &[u8]) {
        let _ = self.diag.write_all(wire);
        if !wire.ends_with(b"\n") {
            let _ = self.diag.write_all(b"\n");
        }
        let _ = self.diag.flush();
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("color", &self.color)
            .finish_non_exhaustive()
    }
}
