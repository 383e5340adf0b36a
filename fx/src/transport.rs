//! Transport to the remote rates provider.

use serde_json::{Map, Value};
use tracing::debug;

use crate::config::ProviderConfig;
use crate::error::{FxError, FxResult, TransportError};

/// Decoded JSON object returned by the provider.
pub type ResponseBody = Map<String, Value>;

/// Ordered query parameters, excluding the access key.
pub type Query = Vec<(String, String)>;

/// Performs a GET against a provider path and decodes the JSON body.
///
/// Implementations attach the provider credential themselves.
pub trait Transport: Send + Sync {
    fn request(&self, path: &str, query: &Query) -> Result<ResponseBody, TransportError>;
}

/// Blocking HTTP transport.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    config: ProviderConfig,
}

impl HttpTransport {
    /// Create a transport for the given provider.
    pub fn new(config: ProviderConfig) -> FxResult<Self> {
        config.validate().map_err(FxError::Config)?;

        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(TransportError::Http)?;

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }
}

impl Transport for HttpTransport {
    fn request(&self, path: &str, query: &Query) -> Result<ResponseBody, TransportError> {
        let url = self.url(path);
        debug!(url = %url, ?query, "Requesting rates");

        let response = self
            .client
            .get(&url)
            .query(&[("access_key", self.config.access_key.as_str())])
            .query(query)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        match response.json::<Value>()? {
            Value::Object(body) => Ok(body),
            other => Err(TransportError::Decode(format!(
                "expected a JSON object, got {}",
                other
            ))),
        }
    }
}

/// Transport double replaying canned responses and recording every request.
#[cfg(any(test, feature = "test-utils"))]
pub struct MockTransport {
    responses: dashmap::DashMap<String, Value>,
    requests: parking_lot::Mutex<Vec<(String, Query)>>,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockTransport {
    /// Create a transport with no canned responses.
    pub fn new() -> Self {
        Self {
            responses: dashmap::DashMap::new(),
            requests: parking_lot::Mutex::new(Vec::new()),
        }
    }

    /// Answer requests for `path` with `body`.
    pub fn respond(&self, path: impl Into<String>, body: Value) {
        self.responses.insert(path.into(), body);
    }

    /// Every request made so far, in order.
    pub fn requests(&self) -> Vec<(String, Query)> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl Transport for MockTransport {
    fn request(&self, path: &str, query: &Query) -> Result<ResponseBody, TransportError> {
        self.requests.lock().push((path.to_string(), query.clone()));

        match self.responses.get(path).map(|body| body.clone()) {
            Some(Value::Object(body)) => Ok(body),
            Some(other) => Err(TransportError::Decode(format!(
                "expected a JSON object, got {}",
                other
            ))),
            None => Err(TransportError::Status {
                status: 404,
                path: path.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_http_transport_requires_access_key() {
        let result = HttpTransport::new(ProviderConfig::default());
        assert!(matches!(result, Err(FxError::Config(_))));
    }

    #[test]
    fn test_http_transport_url() {
        let transport = HttpTransport::new(ProviderConfig {
            base_url: "https://rates.example.com/".to_string(),
            access_key: "secret".to_string(),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(transport.url("/latest"), "https://rates.example.com/latest");
    }

    #[test]
    fn test_mock_transport_records_requests() {
        let transport = MockTransport::new();
        transport.respond("/latest", json!({ "base": "EUR", "rates": {} }));

        let query = vec![("base".to_string(), "EUR".to_string())];
        let body = transport.request("/latest", &query).unwrap();

        assert_eq!(body["base"], "EUR");
        assert_eq!(transport.requests(), vec![("/latest".to_string(), query)]);
    }

    #[test]
    fn test_mock_transport_unknown_path() {
        let transport = MockTransport::new();
        let result = transport.request("/history", &Vec::new());

        assert!(matches!(
            result,
            Err(TransportError::Status { status: 404, .. })
        ));
        assert_eq!(transport.request_count(), 1);
    }

    #[test]
    fn test_mock_transport_non_object_body() {
        let transport = MockTransport::new();
        transport.respond("/latest", json!([1, 2, 3]));

        let result = transport.request("/latest", &Vec::new());
        assert!(matches!(result, Err(TransportError::Decode(_))));
    }
}
