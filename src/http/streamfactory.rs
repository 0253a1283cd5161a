//! HTTP/1.1 framing over a connected socket.
//! Equivalent to net::HttpStream / HttpStreamParser.

use crate::base::context::IoResultExt;
use crate::base::neterror::NetError;
use crate::http::orderedheaders::OrderedHeaders;
use crate::http::response::ResponseHead;
use crate::http::responsebody::{BodyFraming, ResponseBody};
use crate::socket::client::StreamSocket;
use bytes::Bytes;
use http::{Method, StatusCode, Version};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};

/// Upper bound on a response's status line plus headers.
pub const MAX_HEADER_BYTES: usize = 64 * 1024;

/// Writes one request and reads one response at a time.
///
/// Tracks whether the server is willing to keep the connection open. Once
/// it has said otherwise, further writes fail with
/// [`NetError::PersistentEof`].
#[derive(Debug)]
pub struct HttpStream<S> {
    io: BufReader<S>,
    keep_alive: bool,
    requests_sent: usize,
}

impl<S: StreamSocket> HttpStream<S> {
    pub fn new(socket: S) -> Self {
        Self {
            io: BufReader::new(socket),
            keep_alive: true,
            requests_sent: 0,
        }
    }

    /// Write a serialized request.
    pub async fn write_request(&mut self, wire: &[u8]) -> Result<(), NetError> {
        if !self.keep_alive {
            return Err(NetError::PersistentEof);
        }
        if self.requests_sent > 0 && !self.io.get_ref().is_connected() {
            return Err(NetError::ConnectionClosed);
        }

        let socket = self.io.get_mut();
        socket.write_all(wire).await.stream_context()?;
        socket.flush().await.stream_context()?;
        self.requests_sent += 1;
        Ok(())
    }

    /// Read the status line and headers of the response to `method`.
    ///
    /// Fails with [`NetError::EmptyResponse`] when the server hangs up
    /// before sending anything. A hangup after the first byte is
    /// [`NetError::InvalidResponse`]: the server had started answering.
    pub async fn read_response_head(&mut self, method: &Method) -> Result<ResponseHead, NetError> {
        let mut total = 0usize;
        let mut line = Vec::with_capacity(128);

        let status_line = loop {
            line.clear();
            let n = self.read_head_line(&mut line, &mut total).await?;
            if n == 0 {
                return Err(if total == 0 {
                    NetError::EmptyResponse
                } else {
                    NetError::InvalidResponse
                });
            }
            // Tolerate stray blank lines left over from a previous body.
            if !trim_crlf(&line).is_empty() {
                break String::from_utf8_lossy(trim_crlf(&line)).into_owned();
            }
        };
        let (proto, version, status, reason) = parse_status_line(&status_line)?;

        let mut headers = OrderedHeaders::new();
        loop {
            line.clear();
            let n = self.read_head_line(&mut line, &mut total).await?;
            if n == 0 {
                return Err(NetError::InvalidResponse);
            }
            let raw = trim_crlf(&line);
            if raw.is_empty() {
                break;
            }
            let text = String::from_utf8_lossy(raw);
            let (name, value) = text
                .split_once(':')
                .ok_or(NetError::InvalidHttpResponse)?;
            let name = name.trim();
            if name.is_empty() {
                return Err(NetError::InvalidHttpResponse);
            }
            headers.append(name, value.trim());
        }

        let framing = BodyFraming::for_response(method, status, &headers)?;
        let last_response = closes_connection(version, &headers) || framing.ends_connection();
        if last_response {
            self.keep_alive = false;
        }

        Ok(ResponseHead {
            proto,
            version,
            status,
            reason,
            headers,
            framing,
            last_response,
        })
    }

    /// Read the body that follows a head with the given framing.
    pub async fn read_body(&mut self, framing: BodyFraming) -> Result<ResponseBody, NetError> {
        let mut buf = Vec::new();
        match framing {
            BodyFraming::None => {}
            BodyFraming::Length(n) => {
                (&mut self.io).take(n).read_to_end(&mut buf).await.stream_context()?;
                if (buf.len() as u64) < n {
                    return Err(NetError::ContentLengthMismatch);
                }
            }
            BodyFraming::UntilEof => {
                self.io.read_to_end(&mut buf).await.stream_context()?;
                self.keep_alive = false;
            }
        }
        Ok(ResponseBody::new(Bytes::from(buf)))
    }

    async fn read_head_line(
        &mut self,
        line: &mut Vec<u8>,
        total: &mut usize,
    ) -> Result<usize, NetError> {
        let n = self
            .io
            .read_until(b'\n', line)
            .await
            .stream_context()
            .map_err(|e| head_read_error(e, *total + line.len()))?;
        *total += n;
        if *total > MAX_HEADER_BYTES {
            return Err(NetError::ResponseHeadersTooBig);
        }
        Ok(n)
    }
}

/// A connection lost while reading a head is only recoverable if no part of
/// the response had arrived.
fn head_read_error(err: NetError, received: usize) -> NetError {
    match (err.is_connection_loss(), received) {
        (true, 0) => NetError::EmptyResponse,
        (true, _) => NetError::InvalidResponse,
        (false, _) => err,
    }
}

fn trim_crlf(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Split `HTTP/1.1 200 OK` into its parts.
fn parse_status_line(line: &str) -> Result<(String, Version, StatusCode, String), NetError> {
    let (proto, rest) = line.split_once(' ').ok_or(NetError::InvalidHttpResponse)?;
    let version = match proto {
        "HTTP/1.1" => Version::HTTP_11,
        "HTTP/1.0" => Version::HTTP_10,
        "HTTP/0.9" => Version::HTTP_09,
        _ => return Err(NetError::InvalidHttpResponse),
    };
    let rest = rest.trim_start();
    let (code, reason) = rest.split_once(' ').unwrap_or((rest, ""));
    if code.len() != 3 {
        return Err(NetError::InvalidHttpResponse);
    }
    let status = code
        .parse::<u16>()
        .ok()
        .and_then(|c| StatusCode::from_u16(c).ok())
        .ok_or(NetError::InvalidHttpResponse)?;
    Ok((proto.to_string(), version, status, reason.trim().to_string()))
}

/// Whether the server asked for the connection to end after this response.
fn closes_connection(version: Version, headers: &OrderedHeaders) -> bool {
    let has_token = |token: &str| {
        headers.get_all("Connection").any(|v| {
            v.split(',')
                .any(|t| t.trim().eq_ignore_ascii_case(token))
        })
    };
    if has_token("close") {
        return true;
    }
    version < Version::HTTP_11 && !has_token("keep-alive")
}
