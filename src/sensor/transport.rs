//! HTTP client used by the sensor node to submit readings

use thiserror::Error;
use tokio::time::Duration;
use url::Url;

use crate::models::Reading;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(2);
const UPDATE_PATH: &str = "update";

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid coordinator URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("coordinator answered {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Submits readings as `temperature=..&distance=..` form posts
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpTransport {
    pub fn new(coordinator_url: &Url) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            endpoint: coordinator_url.join(UPDATE_PATH)?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Send one reading; any non-success answer is an error, never retried here
    pub async fn submit(&self, reading: &Reading) -> Result<(), TransportError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .form(&[
                ("temperature", reading.temperature),
                ("distance", reading.distance),
            ])
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(TransportError::Status { status, body })
        }
    }
}
