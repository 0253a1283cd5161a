//! The read-eval-print loop.

use crate::console::command::{Command, MetaCommand, HELP};
use crate::console::render::Style;
use crate::console::session::{HeaderRejected, Session};
use crate::http::requestbody::RequestBody;
use crate::http::transaction::TransactionError;
use http::Method;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io;
use thiserror::Error;

/// Source of input lines.
pub trait LineReader {
    /// Show `prompt` and read one line. `None` means the input is over.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Remember an accepted line for recall.
    fn add_history(&mut self, line: &str);
}

/// Line editor on the terminal, with history.
pub struct EditorReader {
    editor: DefaultEditor,
}

impl EditorReader {
    pub fn new() -> Result<Self, ReadlineError> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineReader for EditorReader {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => Ok(None),
            Err(ReadlineError::Io(e)) => Err(e),
            Err(e) => Err(io::Error::new(io::ErrorKind::Other, e.to_string())),
        }
    }

    fn add_history(&mut self, line: &str) {
        let _ = self.editor.add_history_entry(line);
    }
}

#[derive(Debug, Error)]
pub enum ReplError {
    #[error(transparent)]
    Transaction(#[from] TransactionError),
    #[error("could not read input: {0}")]
    Input(#[from] io::Error),
}

/// Outcome of one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Continue,
    Done,
}

pub struct Repl<R> {
    session: Session,
    reader: R,
}

impl<R: LineReader> Repl<R> {
    pub fn new(session: Session, reader: R) -> Self {
        Self { session, reader }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_session(self) -> Session {
        self.session
    }

    /// Run turns until quit or end of input.
    pub async fn run(&mut self) -> Result<(), ReplError> {
        while self.turn().await? == Turn::Continue {}
        self.session.connection.close();
        Ok(())
    }

    /// Read one non-empty line and act on it.
    pub async fn turn(&mut self) -> Result<Turn, ReplError> {
        let prompt = self
            .session
            .renderer
            .paint(Style::Prompt, &self.session.prompt());
        let line = loop {
            match self.reader.read_line(&prompt)? {
                None => {
                    self.session.renderer.blank();
                    return Ok(Turn::Done);
                }
                Some(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        break line.to_string();
                    }
                }
            }
        };
        self.reader.add_history(&line);
        self.dispatch(Command::parse(&line)).await
    }

    /// Carry out one classified command.
    pub async fn dispatch(&mut self, command: Command) -> Result<Turn, ReplError> {
        match command {
            Command::Navigate(fragment) => self.session.navigate(&fragment),
            Command::SetHeader { name, value } => {
                if let Err(HeaderRejected::Host) = self.session.set_header(&name, &value) {
                    self.session
                        .renderer
                        .diag("the Host header always names the connected server");
                }
            }
            Command::Invoke { method, target } => self.invoke(method, &target).await?,
            Command::Meta(meta) => return Ok(self.meta(meta)),
            Command::Unknown(line) => {
                self.session
                    .renderer
                    .diag(&format!("unknown command: {}", line));
            }
        }
        Ok(Turn::Continue)
    }

    async fn invoke(&mut self, method: Method, fragment: &str) -> Result<(), ReplError> {
        let path = self.session.resolve_target(fragment);

        let mut body = RequestBody::empty();
        if method == Method::POST || method == Method::PUT {
            let prompt = self.session.renderer.paint(Style::Prompt, "...: ");
            match self.reader.read_line(&prompt)? {
                Some(line) if !line.is_empty() => {
                    self.reader.add_history(&line);
                    body = line.into();
                }
                // Nothing to send: drop the request.
                _ => return Ok(()),
            }
        }

        let url = self.session.url_for(&path);
        tracing::debug!(%method, %url, "performing request");
        self.session.perform(&method, &url, body).await?;
        Ok(())
    }

    fn meta(&mut self, meta: MetaCommand) -> Turn {
        let session = &mut self.session;
        match meta {
            MetaCommand::Headers => {
                for (name, value) in session.headers.iter() {
                    session.renderer.line(&format!("{}: {}", name, value));
                }
            }
            MetaCommand::Cookies => {
                for (name, value) in session.cookies.flattened() {
                    session.renderer.line(&format!("{}: {}", name, value));
                }
            }
            MetaCommand::Verbose => {
                session.options.toggle_verbose();
            }
            MetaCommand::Options => {
                let summary = session.options.summary();
                session.renderer.line(&summary);
            }
            MetaCommand::Help => session.renderer.line(HELP),
            MetaCommand::Quit => return Turn::Done,
        }
        Turn::Continue
    }
}
