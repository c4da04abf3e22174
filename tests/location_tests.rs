mod common;

use common::{static_table, Page};
use simple_router::location::{parse, serialize};
use simple_router::{HrefOverrides, Location, Query, RouterError};

#[test]
fn test_parse_serialize_round_trip() {
    for url in [
        "/",
        "/signup",
        "/posts/23/edit?order=desc",
        "/search?q=rust&page=2#results",
        "/posts/?x=y",
        "/login#pricing",
        "/login?return=/about#pricing",
        "/downloads?v=1.0~beta&label=it's%20(stable)!",
        "/search?q=a%20b&op=%26%3D",
    ] {
        let parsed = parse(url).unwrap();
        assert_eq!(
            serialize(&parsed.pathname, &parsed.query, parsed.hash.as_deref()),
            url
        );
    }
}

#[test]
fn test_location_keeps_decoded_query_and_hash() {
    let location = Location::from_url("/login?return=/about#pricing", &static_table()).unwrap();
    assert_eq!(*location.unit(), Page::Login);
    assert_eq!(location.query().get("return"), Some("/about"));
    assert_eq!(location.hash(), Some("#pricing"));
    assert_eq!(location.to_string(), "/login?return=/about#pricing");
}

#[test]
fn test_location_display_is_the_url() {
    let location = Location::from_url("/posts/23/edit?order=desc#c4", &static_table()).unwrap();
    assert_eq!(location.to_string(), "/posts/23/edit?order=desc#c4");
}

#[test]
fn test_absolute_url_resolves_by_path() {
    let location =
        Location::from_url("https://www.example.com/posts/23/edit?order=desc", &static_table())
            .unwrap();
    assert_eq!(*location.unit(), Page::PostEdit);
    assert_eq!(location.pathname(), "/posts/23/edit");
    assert_eq!(location.query().get("order"), Some("desc"));
}

#[test]
fn test_href_for_overrides() {
    let location = Location::from_url("/posts/23/edit?order=desc#c4", &static_table()).unwrap();

    assert_eq!(
        location.href_for(&HrefOverrides::new()),
        "/posts/23/edit?order=desc"
    );
    assert_eq!(
        location.href_for(&HrefOverrides::new().pathname("/foo/bar")),
        "/foo/bar?order=desc"
    );
    assert_eq!(
        location.href_for(&HrefOverrides::new().query([("page", "2")])),
        "/posts/23/edit?page=2"
    );
    assert_eq!(
        location.href_for(&HrefOverrides::new().pathname("/").query(Query::new())),
        "/"
    );
}

#[test]
fn test_href_for_does_not_touch_location() {
    let location = Location::from_url("/posts/23/edit?order=desc", &static_table()).unwrap();
    let before = location.clone();
    let _ = location.href_for(&HrefOverrides::new().query([("order", "asc")]));
    assert_eq!(location, before);
}

#[test]
fn test_repeated_query_key_last_write_wins() {
    let location = Location::from_url("/signup?ref=a&ref=b", &static_table()).unwrap();
    assert_eq!(location.query().get("ref"), Some("b"));
    assert_eq!(location.query().len(), 1);
}

#[test]
fn test_malformed_url_is_an_error() {
    let err = Location::from_url("posts/23", &static_table()).unwrap_err();
    assert!(matches!(err, RouterError::MalformedUrl { .. }), "{err:?}");
}

#[test]
fn test_params_exclude_query_values() {
    let location = Location::from_url("/posts/23?postId=99", &static_table()).unwrap();
    assert_eq!(location.param("postId"), Some("23"));
    assert_eq!(location.query().get("postId"), Some("99"));
    assert_eq!(location.params().len(), 1);
}
