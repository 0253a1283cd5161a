use httpconsole::cookies::jar::CookieJar;
use httpconsole::cookies::parser::{parse_expires, parse_set_cookie};
use time::macros::datetime;

#[test]
fn test_typical_session_cookie() {
    let cookies = parse_set_cookie("SID=31d4d96e407aad42; Path=/; Domain=example.com; Secure; HttpOnly");
    assert_eq!(cookies.len(), 1);
    let c = &cookies[0];
    assert_eq!(c.get("SID"), Some("31d4d96e407aad42"));
    // Reserved keys are matched as written: these land in the attributes.
    assert_eq!(c.get("Path"), Some("/"));
    assert_eq!(c.get("Domain"), Some("example.com"));
    assert!(c.path.is_none());
    assert!(c.http_only);
}

#[test]
fn test_lowercase_reserved_keys() {
    let cookies = parse_set_cookie(
        "lang=en-US; path=/docs; domain=.example.com; expires=Wed, 09-Jun-2021 10:18:14 GMT; secure",
    );
    let c = &cookies[0];
    assert_eq!(c.attributes.len(), 1);
    assert_eq!(c.path.as_deref(), Some("/docs"));
    assert_eq!(c.domain.as_deref(), Some(".example.com"));
    assert_eq!(c.expires, Some(datetime!(2021-06-09 10:18:14 UTC)));
    assert!(c.secure);
}

#[test]
fn test_folded_header_yields_each_cookie() {
    let cookies = parse_set_cookie("a=1; path=/, b=2; expires=Thu, 01-Jan-2037 00:00:00 GMT, c=3");
    let names: Vec<_> = cookies
        .iter()
        .flat_map(|c| c.attributes.keys().cloned())
        .collect();
    assert_eq!(names, vec!["a", "b", "c"]);
    assert!(cookies[1].expires.is_some());
}

#[test]
fn test_expiry_with_numeric_offset() {
    let at = parse_expires("Sun, 06-Nov-1994 08:49:37 +0200").unwrap();
    assert_eq!(at, datetime!(1994-11-06 06:49:37 UTC));
    assert!(parse_expires("Sunday, 06 Nov 1994 08:49:37 GMT").is_none());
}

#[test]
fn test_jar_keeps_arrival_order() {
    let mut jar = CookieJar::new();
    assert_eq!(jar.add_set_cookie("z=26"), 1);
    assert_eq!(jar.add_set_cookie("a=1, b=2"), 2);
    assert_eq!(jar.add_set_cookie("no cookie here"), 0);

    let flat: Vec<_> = jar.flattened().collect();
    assert_eq!(flat, vec![("z", "26"), ("a", "1"), ("b", "2")]);
}
