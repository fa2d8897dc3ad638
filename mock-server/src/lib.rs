use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

pub mod classifier;

pub use classifier::{Classifier, ClassifyError, LexiconClassifier};

pub const NO_TEXT_ERROR: &str = "No text provided. Please include 'text' field in your request.";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub label: String,
    pub score: f64,
}

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub sentiment: Sentiment,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

pub type SharedClassifier = Arc<dyn Classifier>;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorBody>)>;

pub fn app() -> Router {
    app_with(Arc::new(LexiconClassifier))
}

pub fn app_with(classifier: SharedClassifier) -> Router {
    Router::new()
        .route("/analyze", post(analyze))
        .with_state(classifier)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn analyze(
    State(classifier): State<SharedClassifier>,
    Json(input): Json<AnalyzeRequest>,
) -> ApiResult<AnalyzeResponse> {
    let text = input.text.unwrap_or_default();
    if text.is_empty() {
        tracing::debug!("rejecting request without text");
        return Err(error(StatusCode::BAD_REQUEST, NO_TEXT_ERROR.to_string()));
    }

    match classifier.classify(&text) {
        Ok(sentiment) => {
            tracing::info!(label = %sentiment.label, score = sentiment.score, chars = text.chars().count(), "classified");
            Ok(Json(AnalyzeResponse { sentiment }))
        }
        Err(e) => {
            tracing::error!(error = %e, "classification failed");
            Err(error(StatusCode::INTERNAL_SERVER_ERROR, format!("Analysis failed: {e}")))
        }
    }
}

fn error(status: StatusCode, message: String) -> (StatusCode, Json<ErrorBody>) {
    (status, Json(ErrorBody { error: message }))
}
