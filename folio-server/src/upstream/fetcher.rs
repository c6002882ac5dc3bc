use std::{fmt, time::Duration};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::{debug, warn};

use super::error::UpstreamError;

/// Header carrying the platform API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Network path of the proxy: GET a URL and decode its JSON body.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    async fn fetch_json(&self, url: &str) -> Result<Value, UpstreamError>;
}

/// `reqwest`-backed fetcher with a per-request timeout and optional API key.
#[derive(Clone)]
pub struct HttpFetcher {
    http: reqwest::Client,
    authenticated: bool,
}

impl fmt::Debug for HttpFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpFetcher")
            .field("authenticated", &self.authenticated)
            .finish_non_exhaustive()
    }
}

impl HttpFetcher {
    pub fn new(
        timeout: Duration,
        api_key: Option<&str>,
    ) -> Result<Self, UpstreamError> {
        let mut headers = HeaderMap::new();
        let mut authenticated = false;
        if let Some(key) = api_key.filter(|key| !key.is_empty()) {
            match HeaderValue::from_str(key) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    headers.insert(API_KEY_HEADER, value);
                    authenticated = true;
                }
                Err(_) => warn!(
                    "API key is not a valid header value; sending unauthenticated requests"
                ),
            }
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .user_agent(concat!("folio-server/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            authenticated,
        })
    }
}

#[async_trait]
impl JsonFetcher for HttpFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Value, UpstreamError> {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status { status, body });
        }

        let bytes = response.bytes().await?;
        debug!(%status, bytes = bytes.len(), "upstream response");
        serde_json::from_slice(&bytes).map_err(UpstreamError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::StatusCode, routing::get};
    use serde_json::json;

    /// Local upstream: `/ok` echoes the API key header, `/bad` is a 503,
    /// `/text` is not JSON and `/slow` outlives any test timeout.
    async fn upstream() -> String {
        async fn echo(headers: axum::http::HeaderMap) -> Json<Value> {
            let key = headers
                .get(API_KEY_HEADER)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);
            Json(json!({ "key": key }))
        }

        let app = Router::new()
            .route("/ok", get(echo))
            .route(
                "/bad",
                get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "upstream down") }),
            )
            .route("/text", get(|| async { "not json" }))
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    Json(json!({ "data": [] }))
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn fetcher(api_key: Option<&str>) -> HttpFetcher {
        HttpFetcher::new(Duration::from_millis(300), api_key).unwrap()
    }

    #[tokio::test]
    async fn sends_api_key_when_configured() {
        let base = upstream().await;
        let fetcher = fetcher(Some("k123"));
        assert!(fetcher.authenticated);

        let body = fetcher.fetch_json(&format!("{base}/ok")).await.unwrap();
        assert_eq!(body, json!({ "key": "k123" }));
    }

    #[tokio::test]
    async fn empty_or_invalid_key_sends_no_header() {
        let base = upstream().await;
        for key in [None, Some(""), Some("bad\nkey")] {
            let fetcher = fetcher(key);
            assert!(!fetcher.authenticated, "{key:?}");
            let body = fetcher.fetch_json(&format!("{base}/ok")).await.unwrap();
            assert_eq!(body, json!({ "key": null }), "{key:?}");
        }
    }

    #[tokio::test]
    async fn non_success_status_keeps_status_and_body() {
        let base = upstream().await;
        let err = fetcher(None)
            .fetch_json(&format!("{base}/bad"))
            .await
            .unwrap_err();
        match err {
            UpstreamError::Status { status, body } => {
                assert_eq!(status.as_u16(), 503);
                assert_eq!(body, "upstream down");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn undecodable_body_is_a_decode_error() {
        let base = upstream().await;
        let err = fetcher(None)
            .fetch_json(&format!("{base}/text"))
            .await
            .unwrap_err();
        assert!(matches!(err, UpstreamError::Decode(_)), "{err:?}");
    }

    #[tokio::test]
    async fn slow_upstream_hits_the_timeout() {
        let base = upstream().await;
        let started = std::time::Instant::now();
        let err = fetcher(None)
            .fetch_json(&format!("{base}/slow"))
            .await
            .unwrap_err();
        match err {
            UpstreamError::Transport(source) => assert!(source.is_timeout(), "{source}"),
            other => panic!("expected transport error, got {other:?}"),
        }
        assert!(started.elapsed() < Duration::from_secs(4));
    }
}
