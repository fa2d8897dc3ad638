//! Stateless HTTP request builder and response parser for the analysis API.
//!
//! # Design
//! `SentimentClient` holds only a `base_url`. The single operation is split
//! into `build_analyze`, which produces an `HttpRequest`, and
//! `parse_analyze`, which consumes an `HttpResponse`. The caller executes
//! the round-trip in between.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{AnalyzeRequest, AnalyzeResponse, ErrorBody, Sentiment};

/// Where the analysis backend listens during development.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

pub const ANALYZE_PATH: &str = "/analyze";

/// Synchronous, stateless client for the sentiment analysis endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentimentClient {
    base_url: String,
}

impl Default for SentimentClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl SentimentClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the `POST /analyze` request. Any text is accepted, including
    /// the empty string; the backend decides what it considers valid.
    pub fn build_analyze(&self, text: &str) -> Result<HttpRequest, ApiError> {
        let input = AnalyzeRequest {
            text: text.to_string(),
        };
        let body = serde_json::to_string(&input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}{ANALYZE_PATH}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    /// Extract the `sentiment` object from a response. Any 2xx status counts
    /// as success.
    pub fn parse_analyze(&self, response: HttpResponse) -> Result<Sentiment, ApiError> {
        check_status(&response)?;
        serde_json::from_str::<AnalyzeResponse>(&response.body)
            .map(|parsed| parsed.sentiment)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))
    }
}

/// Map non-success status codes to `ApiError::HttpError`, keeping the
/// server's error message when the body carries one.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    let message = serde_json::from_str::<ErrorBody>(&response.body)
        .ok()
        .map(|b| b.error);
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> SentimentClient {
        SentimentClient::new("http://localhost:5000")
    }

    #[test]
    fn build_analyze_produces_correct_request() {
        let req = client().build_analyze("I love this").unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:5000/analyze");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({ "text": "I love this" }));
    }

    #[test]
    fn build_analyze_sends_empty_text_as_is() {
        let req = client().build_analyze("").unwrap();
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({ "text": "" }));
    }

    #[test]
    fn build_analyze_escapes_quotes_and_newlines() {
        let text = "she said \"meh\"\nthen left";
        let req = client().build_analyze(text).unwrap();
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["text"], text);
    }

    #[test]
    fn build_analyze_keeps_multibyte_text() {
        let text = "h\u{e9}llo \u{1f44d} \u{65e5}\u{672c}\u{8a9e}";
        let req = client().build_analyze(text).unwrap();
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({ "text": text }));
    }

    #[test]
    fn parse_analyze_multibyte_label() {
        let response = HttpResponse::new(200, r#"{"sentiment":{"label":"\u00e9l\u00e9gant \ud83d\udc4d","score":0.5}}"#);
        let sentiment = client().parse_analyze(response).unwrap();
        assert_eq!(sentiment.label, "\u{e9}l\u{e9}gant \u{1f44d}");
    }

    #[test]
    fn default_client_targets_local_backend() {
        let req = SentimentClient::default().build_analyze("x").unwrap();
        assert_eq!(req.path, "http://127.0.0.1:5000/analyze");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = SentimentClient::new("http://localhost:5000/");
        let req = client.build_analyze("x").unwrap();
        assert_eq!(req.path, "http://localhost:5000/analyze");
    }

    #[test]
    fn parse_analyze_success() {
        let response = HttpResponse::new(200, r#"{"sentiment":{"label":"Positive","score":0.87}}"#);
        let sentiment = client().parse_analyze(response).unwrap();
        assert_eq!(sentiment.label, "Positive");
        assert_eq!(sentiment.score, 0.87);
    }

    #[test]
    fn parse_analyze_accepts_any_2xx() {
        let response = HttpResponse::new(201, r#"{"sentiment":{"label":"NEGATIVE","score":1}}"#);
        let sentiment = client().parse_analyze(response).unwrap();
        assert_eq!(sentiment.score, 1.0);
    }

    #[test]
    fn parse_analyze_ignores_unknown_fields() {
        let response = HttpResponse::new(
            200,
            r#"{"sentiment":{"label":"POSITIVE","score":0.5,"model":"sst-2"},"elapsed_ms":3}"#,
        );
        assert!(client().parse_analyze(response).is_ok());
    }

    #[test]
    fn parse_analyze_bad_request_keeps_server_message() {
        let response = HttpResponse::new(400, r#"{"error":"No text provided."}"#);
        let err = client().parse_analyze(response).unwrap_err();
        match err {
            ApiError::HttpError { status, message, .. } => {
                assert_eq!(status, 400);
                assert_eq!(message.as_deref(), Some("No text provided."));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parse_analyze_server_error_without_json_body() {
        let response = HttpResponse::new(500, "internal error");
        let err = client().parse_analyze(response).unwrap_err();
        assert!(matches!(
            err,
            ApiError::HttpError { status: 500, message: None, .. }
        ));
    }

    #[test]
    fn parse_analyze_bad_json() {
        let response = HttpResponse::new(200, "not json");
        let err = client().parse_analyze(response).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_analyze_missing_sentiment_field() {
        let response = HttpResponse::new(200, r#"{"label":"POSITIVE","score":0.9}"#);
        let err = client().parse_analyze(response).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_analyze_score_must_be_numeric() {
        let response = HttpResponse::new(200, r#"{"sentiment":{"label":"POSITIVE","score":"high"}}"#);
        let err = client().parse_analyze(response).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }
}
