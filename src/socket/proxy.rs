use super::matcher::ProxyMatcher;
use url::Url;
use zeroize::Zeroizing;

/// HTTP proxy used to reach non-local targets.
///
/// HTTPS targets are tunnelled with `CONNECT`; plain HTTP requests are sent
/// to the proxy in absolute-form.
#[derive(Debug, Clone)]
pub struct ProxySettings {
    /// Proxy URL (e.g., `http://proxy.com:8080`)
    pub url: Url,
    /// Proxy username for authentication
    pub username: Option<String>,
    /// Proxy password (zeroized on drop)
    pub password: Option<Zeroizing<String>>,
    bypass: ProxyMatcher,
}

impl ProxySettings {
    /// Create proxy settings from a URL string.
    ///
    /// A missing scheme defaults to `http://`; credentials embedded in the
    /// URL become `Proxy-Authorization` credentials.
    pub fn new(url_str: &str) -> Option<Self> {
        let url_str = url_str.trim();
        if url_str.is_empty() {
            return None;
        }
        let url = if url_str.contains("://") {
            Url::parse(url_str).ok()?
        } else {
            Url::parse(&format!("http://{}", url_str)).ok()?
        };
        url.host_str()?;

        let username = Some(url.username().to_string()).filter(|u| !u.is_empty());
        let password = url.password().map(|p| Zeroizing::new(p.to_string()));
        Some(Self {
            url,
            username,
            password,
            bypass: ProxyMatcher::default(),
        })
    }

    /// Create proxy from environment variables.
    ///
    /// Checks `HTTP_PROXY` then `http_proxy`; bypass rules come from
    /// `NO_PROXY`/`no_proxy`.
    pub fn from_env() -> Option<Self> {
        let url_str = std::env::var("HTTP_PROXY")
            .or_else(|_| std::env::var("http_proxy"))
            .ok()?;

        let mut settings = Self::new(&url_str)?;
        settings.bypass = ProxyMatcher::from_env();
        Some(settings)
    }

    /// Check if a target host (no port) should be dialed directly.
    pub fn should_bypass(&self, host: &str) -> bool {
        self.bypass.should_bypass(host)
    }

    /// Get `Proxy-Authorization` header value.
    pub fn get_auth_header(&self) -> Option<String> {
        use base64::{engine::general_purpose, Engine as _};

        let user = self.username.as_deref()?;
        let creds = match &self.password {
            Some(p) => Zeroizing::new(format!("{}:{}", user, p.as_str())),
            None => Zeroizing::new(format!("{}:", user)),
        };
        Some(format!("Basic {}", general_purpose::STANDARD.encode(creds.as_bytes())))
    }

    /// Get proxy host and port (port defaults to 80).
    pub fn host_port(&self) -> Option<(&str, u16)> {
        let host = self.url.host_str()?;
        Some((host, self.url.port().unwrap_or(80)))
    }
}
