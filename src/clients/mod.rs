/// External feed clients module
use crate::errors::TransportError;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;

pub const DSN_CONFIG_URL: &str = "https://eyes.nasa.gov/apps/dsn-now/config.xml";
pub const DSN_STATE_URL: &str = "https://eyes.nasa.gov/dsn/data/dsn.xml";

/// Raw document retrieval. Anything that can GET a URL and hand back the
/// body bytes will do; status codes only matter as success or failure.
pub trait Transport: Send + Sync {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, TransportError>> + Send;
}

/// HTTP client wrapper with common configuration
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("dsn-now/0.1")
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpClient {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        let request_failed = |source| TransportError::Request {
            url: url.to_string(),
            source,
        };

        let resp = self.client.get(url).send().await.map_err(request_failed)?;

        if !resp.status().is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status: resp.status().as_u16(),
            });
        }

        let body = resp.bytes().await.map_err(request_failed)?;
        Ok(body.to_vec())
    }
}

/// Locations of the two feeds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DsnUrls {
    pub configuration: String,
    pub state: String,
}

impl Default for DsnUrls {
    fn default() -> Self {
        Self {
            configuration: DSN_CONFIG_URL.to_string(),
            state: DSN_STATE_URL.to_string(),
        }
    }
}
