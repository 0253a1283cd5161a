//! The console's single outbound connection.
//!
//! A [`Connection`] remembers how it was established so that a dropped
//! socket can be replaced with an identical one. The replacement is always
//! a fresh socket; the old one is closed first and never reused.

use crate::base::neterror::NetError;
use crate::http::streamfactory::HttpStream;
use crate::socket::client::SocketType;
use crate::socket::connectjob::ConnectJob;
use crate::socket::proxy::ProxySettings;
use crate::socket::tls::TlsConfig;

/// Where the connection goes: the origin server, not the proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
    pub use_tls: bool,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16, use_tls: bool) -> Self {
        Self {
            host: host.into(),
            port,
            use_tls,
        }
    }

    /// Bare host name, IPv6 brackets removed. Used for DNS, SNI and
    /// certificate verification.
    pub fn hostname(&self) -> &str {
        self.host.trim_start_matches('[').trim_end_matches(']')
    }

    /// `host:port`, with IPv6 literals bracketed.
    pub fn authority(&self) -> String {
        let host = self.hostname();
        if host.contains(':') {
            format!("[{}]:{}", host, self.port)
        } else {
            format!("{}:{}", host, self.port)
        }
    }
}

/// How the request target is written on the request line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestForm {
    /// `/path` (direct connections and CONNECT tunnels)
    Origin,
    /// `http://host:port/path` (plain HTTP through a proxy)
    Absolute,
}

/// Owns the socket to the endpoint and knows how to replace it.
#[derive(Debug)]
pub struct Connection {
    endpoint: Endpoint,
    proxy: Option<ProxySettings>,
    tls: TlsConfig,
    stream: Option<HttpStream<SocketType>>,
}

impl Connection {
    /// Prepare a connection without dialing. A proxy that the endpoint
    /// bypasses is discarded here.
    pub fn new(endpoint: Endpoint, proxy: Option<ProxySettings>) -> Self {
        let proxy = proxy.filter(|p| !p.should_bypass(endpoint.hostname()));
        Self {
            endpoint,
            proxy,
            tls: TlsConfig::default(),
            stream: None,
        }
    }

    /// Dial the endpoint, replacing any existing socket.
    pub async fn connect(&mut self) -> Result<(), NetError> {
        self.close();
        if let Some(p) = &self.proxy {
            tracing::info!(proxy = %p.url, target = %self.endpoint.authority(), "connecting via proxy");
        }
        let socket = ConnectJob::connect(&self.endpoint, self.proxy.as_ref(), &self.tls).await?;
        self.stream = Some(HttpStream::new(socket));
        Ok(())
    }

    /// Release the socket. Safe to call when already closed.
    pub fn close(&mut self) {
        if self.stream.take().is_some() {
            tracing::debug!(target = %self.endpoint.authority(), "connection closed");
        }
    }

    /// Close, then connect again with the same parameters.
    pub async fn reconnect(&mut self) -> Result<(), NetError> {
        tracing::info!(target = %self.endpoint.authority(), "reconnecting");
        self.close();
        self.connect().await
    }

    /// The live framing layer.
    pub fn stream_mut(&mut self) -> Result<&mut HttpStream<SocketType>, NetError> {
        self.stream.as_mut().ok_or(NetError::SocketNotConnected)
    }

    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Whether requests travel through a proxy.
    pub fn is_proxied(&self) -> bool {
        self.proxy.is_some()
    }

    pub fn request_form(&self) -> RequestForm {
        if self.is_proxied() && !self.endpoint.use_tls {
            RequestForm::Absolute
        } else {
            RequestForm::Origin
        }
    }
}
