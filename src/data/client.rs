use std::time::Duration;

use serde_json::Value;

use crate::data::request::QueryParams;
use crate::error::FetchError;
use crate::state::dataset::ChargeStateDataset;

/// Anything that can produce a charge-state dataset for a set of form values.
pub trait ChargeStateSource: Send + Sync {
    fn fetch(&self, params: &QueryParams) -> Result<ChargeStateDataset, FetchError>;
}

/// Simulation API over HTTP. Called from a worker thread, so it uses the
/// blocking client.
pub struct HttpSource {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            client,
        })
    }

    #[cfg(test)]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ChargeStateSource for HttpSource {
    fn fetch(&self, params: &QueryParams) -> Result<ChargeStateDataset, FetchError> {
        let url = params.request_url(&self.endpoint);
        tracing::debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            tracing::error!("API responded {status}: {body}");
            return Err(FetchError::Status(status.as_u16()));
        }

        let body: Value = response
            .json()
            .map_err(|e| FetchError::Decode(e.to_string()))?;
        ChargeStateDataset::from_response(body)
    }
}

#[cfg(test)]
pub mod mock {
    use std::sync::Mutex;

    use super::*;

    /// Replays canned results and records the parameters it was asked for.
    pub struct MockSource {
        results: Mutex<Vec<Result<ChargeStateDataset, FetchError>>>,
        pub requests: Mutex<Vec<QueryParams>>,
    }

    impl MockSource {
        pub fn new(results: Vec<Result<ChargeStateDataset, FetchError>>) -> Self {
            Self {
                results: Mutex::new(results),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    impl ChargeStateSource for MockSource {
        fn fetch(&self, params: &QueryParams) -> Result<ChargeStateDataset, FetchError> {
            self.requests.lock().unwrap().push(params.clone());
            let mut results = self.results.lock().unwrap();
            if results.is_empty() {
                return Err(FetchError::Network("no canned response".to_string()));
            }
            results.remove(0)
        }
    }
}
