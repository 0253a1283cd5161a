//! Shared helpers for the integration tests: in-process HTTP servers and
//! sessions whose output is captured.

#![allow(dead_code)]

use httpconsole::console::config::{Options, Target};
use httpconsole::console::render::Renderer;
use httpconsole::console::session::Session;
use std::io::{self, Write};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

/// Cloneable in-memory sink for renderer output.
#[derive(Clone, Default)]
pub struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// What a scripted connection does with each request it reads.
pub enum Reply {
    /// Write these bytes and keep the connection open.
    Send(&'static [u8]),
    /// Write these bytes and close the connection.
    SendAndClose(&'static [u8]),
    /// Close without answering.
    Close,
}

/// Read one request (head plus `Content-Length` body). `None` on EOF.
pub async fn read_request(socket: &mut TcpStream) -> Option<String> {
    let mut data = Vec::new();
    let mut buf = [0u8; 1024];
    let head_end = loop {
        if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
        let n = socket.read(&mut buf).await.ok()?;
        if n == 0 {
            return None;
        }
        data.extend_from_slice(&buf[..n]);
    };

    let head = String::from_utf8_lossy(&data[..head_end]).into_owned();
    let body_len = head
        .lines()
        .find_map(|l| {
            let (name, value) = l.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);
    while data.len() < head_end + body_len {
        let n = socket.read(&mut buf).await.ok()?;
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buf[..n]);
    }
    Some(String::from_utf8_lossy(&data).into_owned())
}

/// A server that accepts connections in turn, each connection running its
/// script of replies. Every request received is forwarded on the channel.
/// A connection whose script runs out stays open until the client leaves.
pub async fn scripted_server(
    connections: Vec<Vec<Reply>>,
) -> (SocketAddr, mpsc::UnboundedReceiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        for script in connections {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let tx = tx.clone();
            tokio::spawn(async move {
                for reply in script {
                    let Some(request) = read_request(&mut socket).await else {
                        return;
                    };
                    let _ = tx.send(request);
                    match reply {
                        Reply::Send(bytes) => {
                            let _ = socket.write_all(bytes).await;
                        }
                        Reply::SendAndClose(bytes) => {
                            let _ = socket.write_all(bytes).await;
                            return;
                        }
                        Reply::Close => return,
                    }
                }
                let mut sink = [0u8; 256];
                while matches!(socket.read(&mut sink).await, Ok(n) if n > 0) {}
            });
        }
    });

    (addr, rx)
}

/// An open session against `addr`, with colorless captured output.
/// Returns the session, its output sink and its diagnostic sink.
pub async fn open_session(addr: SocketAddr, options: Options) -> (Session, SharedBuf, SharedBuf) {
    let out = SharedBuf::default();
    let diag = SharedBuf::default();
    let renderer = Renderer::new(Box::new(out.clone()), Box::new(diag.clone()), false);
    let target = Target::parse(&format!("http://{}", addr), false).unwrap();
    let session = Session::open(target, options, None, renderer)
        .await
        .expect("session should connect");
    (session, out, diag)
}
