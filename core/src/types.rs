//! Wire DTOs for the `/analyze` endpoint.
//!
//! # Design
//! These mirror the mock-server's schema but are defined independently so
//! the core does not depend on axum. The integration tests against the live
//! server catch schema drift between the two crates.

use serde::{Deserialize, Serialize};

/// A sentiment result: a categorical label and a numeric confidence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sentiment {
    pub label: String,
    pub score: f64,
}

/// Request payload for `POST /analyze`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalyzeRequest {
    pub text: String,
}

/// Success body of `POST /analyze`. Extra fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalyzeResponse {
    pub sentiment: Sentiment,
}

/// Error body the backend sends alongside 4xx/5xx statuses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}
