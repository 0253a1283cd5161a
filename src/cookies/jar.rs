use crate::cookies::cookie::Cookie;
use crate::cookies::parser::parse_set_cookie;

/// Append-only list of every cookie the session has been sent.
///
/// Cookies are neither deduplicated nor expired; a server that sets the
/// same cookie twice shows up twice.
#[derive(Debug, Clone, Default)]
pub struct CookieJar {
    cookies: Vec<Cookie>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one raw `Set-Cookie` value and store what it contains.
    /// Returns how many cookies were added.
    pub fn add_set_cookie(&mut self, raw: &str) -> usize {
        let parsed = parse_set_cookie(raw);
        let count = parsed.len();
        self.extend(parsed);
        count
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cookie> {
        self.cookies.iter()
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// Every non-reserved attribute of every cookie, jar order first.
    pub fn flattened(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cookies.iter().flat_map(|c| {
            c.attributes
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
        })
    }
}

impl Extend<Cookie> for CookieJar {
    fn extend<T: IntoIterator<Item = Cookie>>(&mut self, iter: T) {
        self.cookies.extend(iter);
    }
}
