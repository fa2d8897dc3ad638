//! Executes the core's plain-data requests over the network.
//!
//! # Design
//! `Transport` is the only place the app performs I/O. The production
//! implementation wraps a `reqwest::Client` with its default settings: no
//! explicit timeout, no retries. Any failure before a status line arrives
//! becomes `ApiError::Transport`; non-2xx responses are returned as data so
//! the core decides what they mean.

use async_trait::async_trait;
use sentiment_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, Sentiment, SentimentClient};

#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = match request.method {
            HttpMethod::Post => reqwest::Method::POST,
        };
        let mut builder = self.client.request(method, &request.path);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        tracing::trace!(url = %request.path, "sending request");
        let response = builder.send().await.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.text().await.map_err(|e| ApiError::Transport(e.to_string()))?;
        tracing::trace!(status, bytes = body.len(), "received response");

        Ok(HttpResponse { status, headers, body })
    }
}

/// Build, execute and parse one analysis request.
pub async fn analyze<T>(transport: &T, client: &SentimentClient, text: &str) -> Result<Sentiment, ApiError>
where
    T: Transport + ?Sized,
{
    let request = client.build_analyze(text)?;
    let response = transport.execute(request).await?;
    client.parse_analyze(response)
}
