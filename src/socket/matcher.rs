//! Proxy bypass rules.
//!
//! The loopback alias `localhost` never goes through the proxy. Additional
//! hosts come from `NO_PROXY`, following curl's conventions:
//! comma-separated domains (optional leading dot), IP addresses, CIDR
//! ranges, or `*` for everything.

use std::net::IpAddr;

/// Host name that is always dialed directly.
pub const LOOPBACK_ALIAS: &str = "localhost";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Rule {
    Domain(String),
    Address(IpAddr),
    Cidr(IpAddr, u8),
    Everything,
}

/// Set of hosts that bypass the proxy.
#[derive(Debug, Clone, Default)]
pub struct ProxyMatcher {
    rules: Vec<Rule>,
}

impl ProxyMatcher {
    /// Read rules from `NO_PROXY`, falling back to `no_proxy`.
    pub fn from_env() -> Self {
        let raw = std::env::var("NO_PROXY")
            .or_else(|_| std::env::var("no_proxy"))
            .unwrap_or_default();
        Self::from_string(&raw)
    }

    /// Parse a `NO_PROXY`-style list. Unparseable entries are treated as
    /// domain names.
    pub fn from_string(no_proxy: &str) -> Self {
        let rules = no_proxy
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(Self::parse_rule)
            .collect();
        Self { rules }
    }

    fn parse_rule(part: &str) -> Rule {
        if part == "*" {
            return Rule::Everything;
        }
        if let Some((ip, prefix)) = part.split_once('/') {
            if let (Ok(ip), Ok(prefix)) = (ip.parse::<IpAddr>(), prefix.parse::<u8>()) {
                return Rule::Cidr(ip, prefix);
            }
        }
        match part.parse::<IpAddr>() {
            Ok(ip) => Rule::Address(ip),
            Err(_) => Rule::Domain(part.trim_start_matches('.').to_ascii_lowercase()),
        }
    }

    /// Check whether `host` (no port, IPv6 may be bracketed) skips the proxy.
    pub fn should_bypass(&self, host: &str) -> bool {
        let host = host.trim_start_matches('[').trim_end_matches(']');
        if host.eq_ignore_ascii_case(LOOPBACK_ALIAS) {
            return true;
        }

        let ip = host.parse::<IpAddr>().ok();
        let host_lower = host.to_ascii_lowercase();
        self.rules.iter().any(|rule| match (rule, ip) {
            (Rule::Everything, _) => true,
            (Rule::Address(addr), Some(ip)) => *addr == ip,
            (Rule::Cidr(net, prefix), Some(ip)) => cidr_contains(*net, *prefix, ip),
            (Rule::Domain(domain), None) => {
                // "www.example.com" matches "example.com", "notexample.com" does not
                host_lower == *domain
                    || host_lower
                        .strip_suffix(domain.as_str())
                        .is_some_and(|rest| rest.ends_with('.'))
            }
            _ => false,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn cidr_contains(network: IpAddr, prefix: u8, addr: IpAddr) -> bool {
    match (network, addr) {
        (IpAddr::V4(net), IpAddr::V4(ip)) if prefix <= 32 => {
            let mask = u32::MAX.checked_shl(32 - u32::from(prefix)).unwrap_or(0);
            (u32::from(net) & mask) == (u32::from(ip) & mask)
        }
        (IpAddr::V6(net), IpAddr::V6(ip)) if prefix <= 128 => {
            let mask = u128::MAX.checked_shl(128 - u32::from(prefix)).unwrap_or(0);
            (u128::from(net) & mask) == (u128::from(ip) & mask)
        }
        _ => false,
    }
}
