use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::loader::LoadError;
use super::store::Transport;

/// `Transport` over HTTP(S) GET.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(HttpTransport {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, url: &str) -> Result<Value, LoadError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LoadError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| LoadError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&body).map_err(|source| LoadError::InvalidJson {
            url: url.to_string(),
            source,
        })
    }
}
