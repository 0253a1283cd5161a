//! Per-run console state and the request executor.

use crate::base::neterror::NetError;
use crate::console::config::{Options, Scheme, Target};
use crate::console::path;
use crate::console::render::Renderer;
use crate::cookies::jar::CookieJar;
use crate::http::orderedheaders::OrderedHeaders;
use crate::http::request::{request_target, HttpRequest};
use crate::http::requestbody::RequestBody;
use crate::http::transaction::{HttpNetworkTransaction, TransactionError};
use crate::socket::connection::Connection;
use crate::socket::proxy::ProxySettings;
use http::Method;
use url::{Position, Url};

/// Why a header assignment was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderRejected {
    /// `Host` always names the connected server.
    Host,
}

/// Everything one console run works on.
///
/// The header set always carries `Host: <host>`, and the current path is
/// always absolute and clean.
#[derive(Debug)]
pub struct Session {
    pub scheme: Scheme,
    /// `host:port`
    pub host: String,
    pub path: String,
    pub headers: OrderedHeaders,
    pub cookies: CookieJar,
    pub options: Options,
    pub connection: Connection,
    pub renderer: Renderer,
}

impl Session {
    /// Build the session for `target` without connecting.
    pub fn new(
        target: Target,
        options: Options,
        proxy: Option<ProxySettings>,
        renderer: Renderer,
    ) -> Self {
        let host = target.authority();
        let mut headers = OrderedHeaders::new();
        headers.set("Host", host.clone());
        if let Some(auth) = &target.authorization {
            headers.set("Authorization", auth.clone());
        }
        if options.json {
            headers.set("Accept", "*/*");
            headers.set("Content-Type", "application/json");
        }

        let options = Options {
            use_tls: target.use_tls(),
            ..options
        };

        Self {
            scheme: target.scheme,
            host,
            path: target.path.clone(),
            headers,
            cookies: CookieJar::new(),
            options,
            connection: Connection::new(target.endpoint(), proxy),
            renderer,
        }
    }

    /// Build the session and establish its connection.
    pub async fn open(
        target: Target,
        options: Options,
        proxy: Option<ProxySettings>,
        renderer: Renderer,
    ) -> Result<Self, TransactionError> {
        let mut session = Self::new(target, options, proxy, renderer);
        session
            .connection
            .connect()
            .await
            .map_err(TransactionError::Connect)?;
        Ok(session)
    }

    /// `http://host:port/path: `
    pub fn prompt(&self) -> String {
        format!("{}://{}{}: ", self.scheme, self.host, self.path)
    }

    /// Fully qualified URL for `path` on this session's server.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}://{}{}", self.scheme, self.host, path)
    }

    /// Move the current path.
    pub fn navigate(&mut self, fragment: &str) {
        self.path = path::resolve(&self.path, fragment);
    }

    /// Path a request for `fragment` goes to. Empty means the current path.
    pub fn resolve_target(&self, fragment: &str) -> String {
        if fragment.is_empty() {
            self.path.clone()
        } else {
            path::resolve(&self.path, fragment)
        }
    }

    /// Set (or overwrite) a request header. Empty values are ignored.
    pub fn set_header(&mut self, name: &str, value: &str) -> Result<(), HeaderRejected> {
        if name.eq_ignore_ascii_case("Host") {
            return Err(HeaderRejected::Host);
        }
        if !value.is_empty() {
            self.headers.set(name, value);
        }
        Ok(())
    }

    /// Send one request and print the response.
    ///
    /// Set-Cookie values are recorded when cookies are remembered. A
    /// response that ends keep-alive is printed first, then the connection
    /// is replaced.
    pub async fn perform(
        &mut self,
        method: &Method,
        url: &str,
        body: RequestBody,
    ) -> Result<(), TransactionError> {
        let parsed = Url::parse(url).map_err(|_| TransactionError::Send(NetError::InvalidUrl))?;
        let target = request_target(
            &parsed[Position::BeforePath..Position::AfterQuery],
            self.connection.request_form(),
            self.connection.endpoint(),
        );
        let request = HttpRequest::new(method, target, &self.headers, body);

        if self.options.verbose {
            self.renderer.wire_dump(&request.to_wire());
        }

        let mut transaction = HttpNetworkTransaction::new(&mut self.connection);
        let response = transaction.start(&request).await?;

        if !request.body.is_empty() {
            self.renderer.blank();
        }
        self.renderer.status_line(response.head());
        let headers = response.headers();
        for (name, value) in headers.iter() {
            self.renderer.header(name, value);
        }
        if !headers.is_empty() {
            self.renderer.blank();
        }

        if self.options.remember_cookies {
            for raw in headers.get_all("Set-Cookie") {
                self.cookies.add_set_cookie(raw);
            }
        }

        if *method != Method::HEAD {
            self.renderer.line(&response.body().text());
        }

        transaction.finish(&response).await
    }
}
