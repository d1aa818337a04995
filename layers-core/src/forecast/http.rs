use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    Client,
    header::{ACCEPT, HeaderMap, HeaderValue, RETRY_AFTER},
};
use tracing::debug;

use crate::error::FetchError;

use super::{HttpTransport, RawResponse};

/// `HttpTransport` backed by a shared reqwest client.
///
/// Headers and timeout are fixed at construction, so one instance can be
/// shared by any number of callers.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/geo+json"));

        let http = Client::builder()
            .user_agent(user_agent.to_string())
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { http })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, FetchError> {
        debug!(url, "GET");

        let res = self.http.get(url).send().await.map_err(|err| FetchError::Network {
            url: url.to_string(),
            message: err.to_string(),
        })?;

        let status = res.status().as_u16();
        let retry_after = res
            .headers()
            .get(RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let body = res.text().await.map_err(|err| FetchError::Network {
            url: url.to_string(),
            message: format!("failed to read response body: {err}"),
        })?;

        Ok(RawResponse {
            status,
            retry_after,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_identifying_user_agent() {
        let transport = ReqwestTransport::new(
            "WeatherLayers (contact: you@example.com)",
            Duration::from_secs(12),
        );
        assert!(transport.is_ok());
    }
}
