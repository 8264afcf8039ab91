//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results or errors. Comparing parsed JSON (not raw
//! strings) avoids false negatives from field-ordering differences.

use blog_core::{ApiError, BlogClient, CreatePost, HttpMethod, HttpResponse, Post};

const BASE_URL: &str = "http://localhost:3000";

fn client() -> BlogClient {
    BlogClient::new(BASE_URL)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        other => panic!("unknown method: {other}"),
    }
}

fn simulated_response(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

fn assert_expected_error(name: &str, expected: &serde_json::Value, err: ApiError) {
    match expected.as_str().unwrap() {
        "BadRequest" => assert!(matches!(err, ApiError::BadRequest { .. }), "{name}: expected BadRequest, got {err}"),
        "HttpError" => assert!(matches!(err, ApiError::HttpError { .. }), "{name}: expected HttpError, got {err}"),
        other => panic!("{name}: unknown expected_error: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let raw = include_str!("../../test-vectors/create.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input: CreatePost = serde_json::from_value(case["input"].clone()).unwrap();
        let expected_req = &case["expected_request"];

        // Verify build
        let req = c.build_create_post(&input).unwrap();
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.path, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()), "{name}: path");

        let expected_headers: Vec<(String, String)> = expected_req["headers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");

        let req_body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(req_body, expected_req["body"], "{name}: body");

        // Verify parse
        let result = c.parse_create_post(simulated_response(case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_expected_error(name, expected_error, result.unwrap_err());
        } else {
            let post = result.unwrap();
            let expected: Post = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(post, expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let raw = include_str!("../../test-vectors/list.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let expected_req = &case["expected_request"];

        // Verify build
        let req = c.build_list_posts();
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.path, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()), "{name}: path");
        assert!(req.body.is_none(), "{name}: body should be None");

        // Verify parse
        let result = c.parse_list_posts(simulated_response(case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_expected_error(name, expected_error, result.unwrap_err());
        } else {
            let posts = result.unwrap();
            let expected: Vec<Post> = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(posts, expected, "{name}: parsed result");
        }
    }
}
