//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use todo_core::{ApiError, HttpMethod, HttpResponse, NewTodo, TodoClient, TodoItem};

const BASE_URL: &str = "http://localhost:8000";

fn client() -> TodoClient {
    TodoClient::new(BASE_URL)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        other => panic!("unknown method: {other}"),
    }
}

fn simulated(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse::new(
        sim["status"].as_u64().unwrap() as u16,
        sim["body"].as_str().unwrap(),
    )
}

fn check_expected_error(name: &str, expected: &serde_json::Value, err: ApiError) {
    match expected.as_str().unwrap() {
        "Http" => assert!(matches!(err, ApiError::Http { .. }), "{name}: expected Http, got {err}"),
        "Deserialization" => assert!(
            matches!(err, ApiError::Deserialization(_)),
            "{name}: expected Deserialization, got {err}"
        ),
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
        let input: NewTodo = serde_json::from_value(case["input"].clone()).unwrap();
        let expected_req = &case["expected_request"];

        // Verify build
        let req = c.build_create_todo(&input).unwrap();
        let method = parse_method(expected_req["method"].as_str().unwrap());
        assert_eq!(req.method, method, "{name}: method");
        let path = format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap());
        assert_eq!(req.path, path, "{name}: path");

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

        let req_body: serde_json::Value =
            serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(req_body, expected_req["body"], "{name}: body");

        // Verify parse
        let result = c.parse_create_todo(simulated(case));
        if let Some(expected_error) = case.get("expected_error") {
            check_expected_error(name, expected_error, result.unwrap_err());
        } else {
            let todo = result.unwrap();
            let expected: TodoItem =
                serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(todo, expected, "{name}: parsed result");
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
        let req = c.build_list_todos();
        let method = parse_method(expected_req["method"].as_str().unwrap());
        assert_eq!(req.method, method, "{name}: method");
        let path = format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap());
        assert_eq!(req.path, path, "{name}: path");
        assert!(req.body.is_none(), "{name}: body should be None");

        // Verify parse
        let result = c.parse_list_todos(simulated(case));
        if let Some(expected_error) = case.get("expected_error") {
            check_expected_error(name, expected_error, result.unwrap_err());
        } else {
            let todos = result.unwrap();
            let expected: Vec<TodoItem> =
                serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(todos, expected, "{name}: parsed result");
        }
    }
}
