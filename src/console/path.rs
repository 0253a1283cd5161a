//! Lexical URL-path arithmetic for the current path.
//!
//! Paths are manipulated as POSIX-style strings: `..` and `.` are resolved,
//! repeated slashes collapse, nothing touches the server.

/// Shortest equivalent path: `.` and `..` resolved, slashes collapsed,
/// trailing slash removed. An empty result becomes `.` (or `/` if rooted).
pub fn clean(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|last| *last != "..") {
                    parts.pop();
                } else if !rooted {
                    parts.push("..");
                }
            }
            s => parts.push(s),
        }
    }

    let joined = parts.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{}", joined),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// Join two paths with a slash and clean the result. A leading slash on
/// `fragment` does not make it absolute.
pub fn join(base: &str, fragment: &str) -> String {
    match (base.is_empty(), fragment.is_empty()) {
        (true, true) => String::new(),
        (true, false) => clean(fragment),
        (false, true) => clean(base),
        (false, false) => clean(&format!("{}/{}", base, fragment)),
    }
}

/// Resolve a typed path fragment against the current path.
///
/// `/` and `//` go back to the root. Anything else is joined onto
/// `current`, and keeps a trailing slash if the fragment had one.
pub fn resolve(current: &str, fragment: &str) -> String {
    if fragment == "/" || fragment == "//" {
        return "/".to_string();
    }
    let mut resolved = join(current, fragment);
    if !resolved.starts_with('/') {
        resolved.insert(0, '/');
    }
    if fragment.len() > 1 && fragment.ends_with('/') && !resolved.ends_with('/') {
        resolved.push('/');
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean() {
        assert_eq!(clean(""), ".");
        assert_eq!(clean("."), ".");
        assert_eq!(clean("/"), "/");
        assert_eq!(clean("//a///b/"), "/a/b");
        assert_eq!(clean("/a/./b/../c"), "/a/c");
        assert_eq!(clean("/../x"), "/x");
        assert_eq!(clean("a/../../b"), "../b");
    }

    #[test]
    fn test_join_treats_fragment_as_relative() {
        assert_eq!(join("/a", "/foo"), "/a/foo");
        assert_eq!(join("/a/b", ".."), "/a");
        assert_eq!(join("/", "x/"), "/x");
    }

    #[test]
    fn test_resolve_root_reset() {
        assert_eq!(resolve("/deep/path", "/"), "/");
        assert_eq!(resolve("/deep/path", "//"), "/");
    }

    #[test]
    fn test_resolve_parent() {
        assert_eq!(resolve("/a/b", ".."), "/a");
        assert_eq!(resolve("/", ".."), "/");
    }

    #[test]
    fn test_resolve_keeps_fragment_trailing_slash() {
        assert_eq!(resolve("/", "/users/"), "/users/");
        assert_eq!(resolve("/api", "/v1/../v2/"), "/api/v2/");
        assert_eq!(resolve("/a/", "/b"), "/a/b");
        // Never doubled.
        assert_eq!(resolve("/a", "/b/../../"), "/");
    }

    #[test]
    fn test_resolve_is_always_clean_and_absolute() {
        for (current, fragment) in [
            ("/", "/foo/../bar"),
            ("/x/y", "/./z/.."),
            ("/", "/../../.."),
            ("/a", "/b//c/./d"),
        ] {
            let p = resolve(current, fragment);
            assert!(p.starts_with('/'), "{}", p);
            assert!(!p.split('/').any(|s| s == "." || s == ".."), "{}", p);
            assert!(!p.contains("//"), "{}", p);
        }
        assert_eq!(resolve("/", "/foo/../bar"), "/bar");
    }
}
