//! Verify build/parse and rendering against JSON test vectors stored in
//! `test-vectors/`.
//!
//! Each case describes an input, the expected request, a simulated
//! response, and either the expected sentiment plus rendered lines or the
//! expected failure kind. Bodies are compared as parsed JSON so field order
//! does not matter.

use sentiment_core::{
    render, ApiError, Controller, FailureKind, HttpMethod, HttpResponse, Sentiment, SentimentClient,
    GENERIC_ERROR_MESSAGE,
};

const BASE_URL: &str = "http://localhost:5000";

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "POST" => HttpMethod::Post,
        other => panic!("unknown method: {other}"),
    }
}

fn parse_kind(s: &str) -> FailureKind {
    match s {
        "Unreachable" => FailureKind::Unreachable,
        "Status" => FailureKind::Status,
        "MalformedBody" => FailureKind::MalformedBody,
        "Encoding" => FailureKind::Encoding,
        other => panic!("unknown failure kind: {other}"),
    }
}

fn simulated(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse::new(
        sim["status"].as_u64().unwrap() as u16,
        sim["body"].as_str().unwrap(),
    )
}

#[test]
fn analyze_test_vectors() {
    let raw = include_str!("../../test-vectors/analyze.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let client = SentimentClient::new(BASE_URL);
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input = case["input"].as_str().unwrap();
        let expected_req = &case["expected_request"];

        // Verify build
        let req = client.build_analyze(input).unwrap();
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
        let result = client.parse_analyze(simulated(case));
        if let Some(expected_error) = case.get("expected_error") {
            let err: ApiError = result.unwrap_err();
            assert_eq!(err.kind(), parse_kind(expected_error.as_str().unwrap()), "{name}: failure kind");
        } else {
            let sentiment = result.unwrap();
            let expected: Sentiment = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(sentiment, expected, "{name}: parsed result");
        }
    }
}

#[test]
fn controller_renders_test_vectors() {
    let raw = include_str!("../../test-vectors/analyze.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let mut controller = Controller::new(SentimentClient::new(BASE_URL));
        controller.edit(case["input"].as_str().unwrap());

        let pending = controller.request_analysis().unwrap();
        controller.complete(pending.id, Ok(simulated(case)));
        let screen = render(controller.state());

        if case.get("expected_error").is_some() {
            assert!(screen.result_region().is_empty(), "{name}: result region should be empty");
            assert_eq!(screen.alert(), Some(GENERIC_ERROR_MESSAGE), "{name}: alert");
        } else {
            let expected: Vec<String> = serde_json::from_value(case["expected_display"].clone()).unwrap();
            assert_eq!(screen.result_region(), expected, "{name}: display");
            assert!(screen.alert().is_none(), "{name}: no alert");
        }
    }
}
