use crate::base::context::IoResultExt;
use crate::base::neterror::NetError;
use crate::socket::client::SocketType;
use crate::socket::connection::Endpoint;
use crate::socket::proxy::ProxySettings;
use crate::socket::tls::TlsConfig;
use boring::ssl::{SslConnector, SslMethod};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

/// Upper bound on a proxy's CONNECT response head.
const MAX_TUNNEL_RESPONSE: usize = 8192;

/// Manages the connection process: DNS -> TCP -> (CONNECT) -> SSL.
/// Roughly equivalent to net::ConnectJob.
pub struct ConnectJob;

impl ConnectJob {
    /// Dial `endpoint`, through `proxy` when given.
    ///
    /// The caller decides whether the proxy applies; a proxy passed here is
    /// always used.
    pub async fn connect(
        endpoint: &Endpoint,
        proxy: Option<&ProxySettings>,
        tls: &TlsConfig,
    ) -> Result<SocketType, NetError> {
        let (host, port) = match proxy {
            Some(p) => p.host_port().ok_or(NetError::InvalidUrl)?,
            None => (endpoint.hostname(), endpoint.port),
        };

        // 1. DNS Resolution
        tracing::debug!(host = %host, port, "resolving");
        let addrs: Vec<_> = tokio::net::lookup_host((host, port))
            .await
            .dns_context(host)?
            .collect();

        // 2. TCP Connect (to proxy or destination)
        let mut last_err = None;
        let mut stream = None;
        for addr in addrs {
            match TcpStream::connect(addr).await {
                Ok(s) => {
                    stream = Some(s);
                    break;
                }
                Err(e) => {
                    tracing::debug!(%addr, error = %e, "dial failed");
                    last_err = Some(e);
                }
            }
        }
        let mut stream = match (stream, last_err) {
            (Some(s), _) => s,
            (None, Some(e)) => return Err(e).connection_context(host, port),
            (None, None) => return Err(NetError::NameNotResolved),
        };
        // Requests are written whole; don't let Nagle hold the tail back.
        let _ = stream.set_nodelay(true);
        tracing::info!(host = %host, port, "connected");

        if !endpoint.use_tls {
            return Ok(SocketType::Tcp(stream));
        }

        // 3. Proxy Handshake (HTTP CONNECT)
        if let Some(p) = proxy {
            Self::establish_tunnel(&mut stream, endpoint, p).await?;
        }

        // 4. SSL Handshake, always after any tunnel is established
        let hostname = endpoint.hostname();
        let mut builder =
            SslConnector::builder(SslMethod::tls()).map_err(|_| NetError::SslProtocolError)?;
        tls.apply_to_builder(&mut builder)?;
        let connector = builder.build();

        let mut config = connector.configure().map_err(|_| NetError::SslProtocolError)?;
        config.set_use_server_name_indication(TlsConfig::should_set_sni(hostname));
        config.set_verify_hostname(true);

        let tls_stream = tokio_boring::connect(config, hostname, stream)
            .await
            .map_err(|e| {
                tracing::debug!(host = %hostname, error = ?e, "SSL handshake failed");
                NetError::SslHandshakeFailed {
                    host: hostname.to_string(),
                    message: e.to_string(),
                }
            })?;
        tracing::info!(host = %hostname, "TLS established");

        Ok(SocketType::Ssl(tls_stream))
    }

    /// Ask the proxy for a raw tunnel to `endpoint`. Anything but a 200 is
    /// a refusal.
    async fn establish_tunnel(
        stream: &mut TcpStream,
        endpoint: &Endpoint,
        proxy: &ProxySettings,
    ) -> Result<(), NetError> {
        let target = endpoint.authority();
        let mut connect_req = format!("CONNECT {} HTTP/1.1\r\nHost: {}\r\n", target, target);
        if let Some(auth) = proxy.get_auth_header() {
            connect_req.push_str(&format!("Proxy-Authorization: {}\r\n", auth));
        }
        connect_req.push_str("\r\n");

        tracing::debug!(target = %target, "opening proxy tunnel");
        stream.write_all(connect_req.as_bytes()).await.stream_context()?;

        // Byte at a time so nothing past the head (the TLS server hello)
        // is swallowed.
        let mut head = Vec::with_capacity(256);
        let mut byte = [0u8; 1];
        while !head.ends_with(b"\r\n\r\n") {
            if head.len() >= MAX_TUNNEL_RESPONSE {
                return Err(NetError::ResponseHeadersTooBig);
            }
            let n = stream.read(&mut byte).await.stream_context()?;
            if n == 0 {
                return Err(NetError::TunnelConnectionFailed);
            }
            head.push(byte[0]);
        }

        let head = String::from_utf8_lossy(&head);
        let status_line = head.lines().next().unwrap_or_default();
        if tunnel_status(status_line) != Some(200) {
            return Err(NetError::TunnelRefused {
                target,
                status: status_line.trim().to_string(),
            });
        }
        tracing::info!(target = %target, "proxy tunnel established");
        Ok(())
    }
}

/// Status code of a `HTTP/1.x NNN reason` line.
fn tunnel_status(line: &str) -> Option<u16> {
    let mut parts = line.split_whitespace();
    if !parts.next()?.starts_with("HTTP/") {
        return None;
    }
    parts.next()?.parse().ok()
}
