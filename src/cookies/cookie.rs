use std::collections::BTreeMap;
use time::OffsetDateTime;

/// One cookie as received in a `Set-Cookie` header.
///
/// The reserved attributes get their own fields; every other `name=value`
/// pair, including the cookie's own name and value, lives in
/// [`Cookie::attributes`]. Nothing here is validated or scoped: the console
/// records cookies, it does not send them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cookie {
    pub attributes: BTreeMap<String, String>,
    pub path: Option<String>,
    pub domain: Option<String>,
    /// `None` when absent or not in a recognised format.
    pub expires: Option<OffsetDateTime>,
    pub secure: bool,
    pub http_only: bool,
}

impl Cookie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of a non-reserved attribute.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}
