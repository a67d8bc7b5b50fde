//! Thin OKX REST client with retry on transient failures

use backon::{ExponentialBuilder, Retryable};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::warn;
use url::Url;

use super::messages::OkxResponse;
use crate::error::DataError;

const MAX_RETRIES: usize = 3;

pub struct OkxRestClient {
    base_url: Url,
    http: reqwest::Client,
    backoff: ExponentialBuilder,
}

impl OkxRestClient {
    pub fn new(base_url: Url, request_timeout: Duration) -> Result<Self, DataError> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| DataError::Request(e.to_string()))?;
        Ok(Self::with_client(base_url, http))
    }

    pub fn with_client(base_url: Url, http: reqwest::Client) -> Self {
        Self {
            base_url,
            http,
            backoff: ExponentialBuilder::default()
                .with_min_delay(Duration::from_millis(200))
                .with_max_times(MAX_RETRIES),
        }
    }

    pub fn with_backoff(mut self, backoff: ExponentialBuilder) -> Self {
        self.backoff = backoff;
        self
    }

    /// GET `path` and unwrap the `data` array of the OKX envelope
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, DataError> {
        (|| async { self.get_once(path, query).await })
            .retry(self.backoff.clone())
            .when(DataError::is_transient)
            .notify(|error: &DataError, delay: Duration| {
                warn!(
                    path = %path,
                    error = %error,
                    delay_ms = delay.as_millis() as u64,
                    "OKX: retrying {} in {:?}: {}",
                    path,
                    delay,
                    error
                );
            })
            .await
    }

    async fn get_once<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, DataError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| DataError::Request(format!("invalid path '{}': {}", path, e)))?;

        let response = self.http.get(url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DataError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: OkxResponse<T> = response.json().await?;
        if envelope.code != "0" {
            return Err(DataError::Exchange {
                code: envelope.code,
                msg: envelope.msg,
            });
        }
        Ok(envelope.data)
    }
}
