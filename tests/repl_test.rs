mod common;

use common::{open_session, scripted_server, Reply};
use httpconsole::console::config::Options;
use httpconsole::console::repl::{LineReader, Repl, Turn};
use std::collections::VecDeque;
use std::io;

/// Scripted keyboard: prompts are recorded, running out of lines is ^D.
#[derive(Default)]
struct Keyboard {
    lines: VecDeque<String>,
    prompts: Vec<String>,
    history: Vec<String>,
}

impl Keyboard {
    fn typing(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|l| l.to_string()).collect(),
            ..Default::default()
        }
    }
}

impl LineReader for Keyboard {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.lines.pop_front())
    }

    fn add_history(&mut self, line: &str) {
        self.history.push(line.to_string());
    }
}

#[tokio::test]
async fn test_headers_and_navigation_shape_the_request() {
    let (addr, mut requests) = scripted_server(vec![vec![Reply::Send(
        b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\n\r\nok",
    )]])
    .await;
    let (session, out, _) = open_session(addr, Options::default()).await;

    let keyboard = Keyboard::typing(&["Accept: */*", ".headers", "/api", "GET /foo/../bar", ".q"]);
    let mut repl = Repl::new(session, keyboard);
    repl.run().await.unwrap();

    let request = requests.recv().await.unwrap();
    assert!(request.starts_with("GET /api/bar HTTP/1.1\r\n"));
    assert!(request.contains("Accept: */*\r\n"));

    let text = out.text();
    assert!(text.starts_with(&format!("Host: {}\nAccept: */*\n", addr)));
    assert!(text.ends_with("ok\n"));
    assert_eq!(repl.session().path, "/api");
}

#[tokio::test]
async fn test_prompt_follows_the_current_path() {
    let (addr, _requests) = scripted_server(vec![vec![]]).await;
    let (session, _, _) = open_session(addr, Options::default()).await;

    let mut repl = Repl::new(session, Keyboard::typing(&["/users/", "..", "/v1"]));
    repl.run().await.unwrap();

    let session = repl.into_session();
    assert_eq!(session.path, "/v1");
    assert_eq!(session.prompt(), format!("http://{}/v1: ", addr));
}

#[tokio::test]
async fn test_post_reads_a_body_line() {
    let (addr, mut requests) = scripted_server(vec![vec![Reply::Send(
        b"HTTP/1.1 201 Created\r\nContent-Length: 0\r\n\r\n",
    )]])
    .await;
    let (session, out, _) = open_session(addr, Options::default()).await;

    let mut repl = Repl::new(session, Keyboard::typing(&["POST /items", "{\"name\":\"x\"}"]));
    assert_eq!(repl.turn().await.unwrap(), Turn::Continue);

    let request = requests.recv().await.unwrap();
    assert!(request.starts_with("POST /items HTTP/1.1\r\n"));
    assert!(request.ends_with("\r\n\r\n{\"name\":\"x\"}"));
    assert!(out.text().contains("HTTP/1.1 201 Created\n"));
}

#[tokio::test]
async fn test_empty_body_cancels_put() {
    let (addr, mut requests) = scripted_server(vec![vec![]]).await;
    let (session, out, _) = open_session(addr, Options::default()).await;

    let mut repl = Repl::new(session, Keyboard::typing(&["PUT /items/1", "", ".q"]));
    repl.run().await.unwrap();

    assert!(out.text().is_empty());
    drop(repl);
    // The connection closes without a request having been sent.
    assert!(requests.recv().await.is_none());
}

#[tokio::test]
async fn test_meta_commands_print_state() {
    let (addr, _requests) = scripted_server(vec![vec![]]).await;
    let options = Options {
        remember_cookies: true,
        ..Default::default()
    };
    let (session, out, diag) = open_session(addr, options).await;

    let mut repl = Repl::new(session, Keyboard::typing(&[".o", ".v", ".options", "bogus"]));
    repl.run().await.unwrap();

    let text = out.text();
    assert!(text.starts_with(
        "useSSL=false, rememberCookies=true, verbose=false\n\
         useSSL=false, rememberCookies=true, verbose=true\n"
    ));
    // ^D ends the loop with a newline.
    assert!(text.ends_with("verbose=true\n\n"));
    assert_eq!(diag.text(), "unknown command: bogus\n");
}

#[tokio::test]
async fn test_fatal_error_ends_the_loop() {
    let (addr, _requests) = scripted_server(vec![vec![Reply::Close], vec![Reply::Close]]).await;
    let (session, _, _) = open_session(addr, Options::default()).await;

    let mut repl = Repl::new(session, Keyboard::typing(&["GET /", ".headers"]));
    let err = repl.run().await.unwrap_err();
    assert!(err.to_string().starts_with("could not read response: "));
}
