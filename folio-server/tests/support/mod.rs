use std::{
    collections::{HashMap, HashSet},
    path::Path,
    sync::{Arc, Mutex},
};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use axum_test::TestServer;
use folio_server::{
    create_app,
    infra::{app_state::AppState, config::Config},
    portfolio::embedded_fixtures,
    upstream::{Endpoint, JsonFetcher, UpstreamError},
};
use serde_json::{Value, json};

pub const STUB_ORIGIN: &str = "http://upstream.test";

/// Fetcher that answers by endpoint tag and records every URL it sees.
/// Endpoints without a canned body return an empty envelope.
#[allow(unused)]
#[derive(Debug, Default)]
pub struct StubFetcher {
    responses: HashMap<&'static str, Value>,
    failing: HashSet<&'static str>,
    calls: Mutex<Vec<String>>,
}

#[allow(unused)]
impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, endpoint: Endpoint, body: Value) -> Self {
        self.responses.insert(endpoint.tag(), body);
        self
    }

    pub fn fail(mut self, endpoint: Endpoint) -> Self {
        self.failing.insert(endpoint.tag());
        self
    }

    pub fn fail_all(mut self) -> Self {
        for endpoint in Endpoint::ALL {
            self.failing.insert(endpoint.tag());
        }
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_to(&self, endpoint: Endpoint) -> usize {
        let prefix = format!("{STUB_ORIGIN}/{}?", endpoint.tag());
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|url| url.starts_with(&prefix))
            .count()
    }
}

#[async_trait]
impl JsonFetcher for StubFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Value, UpstreamError> {
        self.calls.lock().unwrap().push(url.to_string());

        let tag = url
            .strip_prefix(STUB_ORIGIN)
            .and_then(|rest| rest.strip_prefix('/'))
            .and_then(|rest| rest.split('?').next())
            .unwrap_or_default();

        if self.failing.contains(tag) {
            return Err(UpstreamError::Status {
                status: reqwest::StatusCode::BAD_GATEWAY,
                body: "stubbed failure".to_string(),
            });
        }

        Ok(self
            .responses
            .get(tag)
            .cloned()
            .unwrap_or_else(|| json!({ "data": [] })))
    }
}

/// Default config with every endpoint pointed at the stub origin.
pub fn test_config(static_dir: &Path) -> Config {
    let mut config = Config::default();
    config.server.static_dir = static_dir.to_path_buf();
    for endpoint in Endpoint::ALL {
        *config.upstream.endpoints.template_mut(endpoint) =
            format!("{STUB_ORIGIN}/{}?ids={{ids}}", endpoint.tag());
    }
    config
}

#[allow(unused)]
pub fn build_test_server(
    config: Config,
    fetcher: Arc<StubFetcher>,
) -> Result<TestServer> {
    let state = AppState::new(Arc::new(config), embedded_fixtures()?, fetcher);
    TestServer::new(create_app(state)).map_err(|err| anyhow!(err.to_string()))
}
