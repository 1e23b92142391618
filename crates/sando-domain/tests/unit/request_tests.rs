//! Unit tests for request value objects

use sando_domain::{ApiRequest, Headers, HttpMethod, MatchedRequest, Params, ServiceName};

#[test]
fn test_headers_are_case_insensitive() {
    let headers = Headers::new().with("Authorization", "Bearer abc");
    assert_eq!(headers.get("authorization"), Some("Bearer abc"));
    assert_eq!(headers.get("AUTHORIZATION"), Some("Bearer abc"));
    assert_eq!(headers.len(), 1);
}

#[test]
fn test_method_parsing() {
    assert_eq!("get".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
    assert_eq!("DELETE".parse::<HttpMethod>().unwrap(), HttpMethod::Delete);
    assert!("TRACE".parse::<HttpMethod>().is_err());
    assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
}

#[test]
fn test_service_name_parsing() {
    assert_eq!("Content".parse::<ServiceName>().unwrap(), ServiceName::Content);
    assert!("shrines".parse::<ServiceName>().is_err());
    assert_eq!(ServiceName::ALL.len(), 5);
}

#[test]
fn test_signature_sorts_query_parameters() {
    let a = ApiRequest::new(HttpMethod::Get, "/search?q=torii&page=2");
    let b = ApiRequest::new(HttpMethod::Get, "/search?page=2&q=torii");
    assert_eq!(a.signature(), b.signature());
    assert_eq!(a.signature(), "GET /search?page=2&q=torii");
}

#[test]
fn test_signature_distinguishes_methods() {
    let get = ApiRequest::new(HttpMethod::Get, "/temples");
    let post = ApiRequest::new(HttpMethod::Post, "/temples");
    assert_ne!(get.signature(), post.signature());
}

#[test]
fn test_path_params_win_over_query_params() {
    let mut path_params = Params::new();
    path_params.insert("id".to_string(), "42".to_string());
    let mut query_params = Params::new();
    query_params.insert("id".to_string(), "7".to_string());
    query_params.insert("lang".to_string(), "ja".to_string());

    let request = MatchedRequest {
        method: HttpMethod::Get,
        path: "/temples/42".to_string(),
        path_params,
        query_params,
        headers: Headers::new(),
        body: None,
    };

    let merged = request.merged_params();
    assert_eq!(merged.get("id").map(String::as_str), Some("42"));
    assert_eq!(merged.get("lang").map(String::as_str), Some("ja"));
}
