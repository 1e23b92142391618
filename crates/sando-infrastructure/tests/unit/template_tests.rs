//! Path template and URL splitting tests

use sando_infrastructure::routing::{
    PathTemplate, Segment, decode_segment, encode_segment, parse_query, split_path, split_url,
};

#[test]
fn test_parse_literal_and_param_segments() {
    let template = PathTemplate::parse("/groups/:groupId/join");
    assert_eq!(
        template.segments(),
        &[
            Segment::Literal("groups".to_string()),
            Segment::Param("groupId".to_string()),
            Segment::Literal("join".to_string()),
        ]
    );
    assert_eq!(template.param_names().collect::<Vec<_>>(), vec!["groupId"]);
    assert_eq!(template.to_string(), "/groups/:groupId/join");
}

#[test]
fn test_bare_colon_is_literal() {
    let template = PathTemplate::parse("/odd/:");
    assert_eq!(template.segments()[1], Segment::Literal(":".to_string()));
    assert!(template.matches(&["odd", ":"]).is_some());
    assert!(template.matches(&["odd", "x"]).is_none());
}

#[test]
fn test_match_extracts_params() {
    let template = PathTemplate::parse("/temples/:id");
    let params = template.matches(&["temples", "42"]).unwrap();
    assert_eq!(params.get("id").map(String::as_str), Some("42"));
}

#[test]
fn test_match_requires_equal_segment_count() {
    let template = PathTemplate::parse("/temples/:id");
    assert!(template.matches(&["temples"]).is_none());
    assert!(template.matches(&["temples", "42", "extra"]).is_none());
}

#[test]
fn test_differing_literal_does_not_match() {
    let template = PathTemplate::parse("/temples/:id");
    assert!(template.matches(&["shrines", "42"]).is_none());
}

#[test]
fn test_split_path_ignores_empty_segments() {
    assert_eq!(split_path("/a//b/"), vec!["a", "b"]);
    assert_eq!(split_path("a/b"), vec!["a", "b"]);
    assert!(split_path("/").is_empty());
}

#[test]
fn test_split_url_variants() {
    assert_eq!(split_url("/search?q=zen"), ("/search", Some("q=zen")));
    assert_eq!(split_url("/temples/1#top"), ("/temples/1", None));
    assert_eq!(split_url("/search?q=a#frag"), ("/search", Some("q=a")));
    assert_eq!(
        split_url("http://localhost:3000/temples/7?x=1"),
        ("/temples/7", Some("x=1"))
    );
    assert_eq!(split_url("https://host.example"), ("", None));
}

#[test]
fn test_parse_query_decodes_and_last_duplicate_wins() {
    let params = parse_query("q=zen+garden&tag=a&tag=b&city=Ky%C5%8Dto");
    assert_eq!(params.get("q").map(String::as_str), Some("zen garden"));
    assert_eq!(params.get("tag").map(String::as_str), Some("b"));
    assert_eq!(params.get("city").map(String::as_str), Some("Kyōto"));
}

#[test]
fn test_encoded_segment_stays_one_param() {
    let template = PathTemplate::parse("/groups/:groupId");
    let encoded = encode_segment("zen/garden?x=1");
    assert_eq!(encoded, "zen%2Fgarden%3Fx%3D1");

    let segments = split_path("/groups/zen%2Fgarden%3Fx%3D1");
    let params = template.matches(&segments).expect("single segment should match");
    assert_eq!(params.get("groupId").map(String::as_str), Some("zen/garden?x=1"));
}

#[test]
fn test_decode_segment_keeps_invalid_utf8_raw() {
    assert_eq!(decode_segment("plain"), "plain");
    assert_eq!(decode_segment("%E6%97%A5"), "\u{65e5}");
    assert_eq!(decode_segment("%FF"), "%FF");
}
