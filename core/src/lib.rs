//! Sans-IO client core for the sentiment analysis form.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and keeps the form's view
//! state behind a small controller. The host executes the HTTP round-trip
//! and reports the outcome back, so every transition is deterministic and
//! testable.
//!
//! # Design
//! - `SentimentClient` is stateless; it holds only `base_url`.
//! - The one operation is split into `build_analyze` and `parse_analyze`,
//!   so the I/O boundary is explicit.
//! - `Controller` owns `ViewState` (input, result, error) and tracks request
//!   ids so overlapping requests can be resolved under an `OrderingPolicy`.
//! - `view::render` turns state into display lines; the error shown is
//!   always the same generic message, while `ApiError` keeps the cause.

pub mod client;
pub mod controller;
pub mod error;
pub mod http;
pub mod types;
pub mod view;

pub use client::{SentimentClient, DEFAULT_BASE_URL};
pub use controller::{
    Completion, Controller, Event, OrderingPolicy, PendingAnalysis, RequestId, ViewState, GENERIC_ERROR_MESSAGE,
};
pub use error::{ApiError, FailureKind};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{AnalyzeRequest, AnalyzeResponse, ErrorBody, Sentiment};
pub use view::{format_score, render, Line, Screen};
