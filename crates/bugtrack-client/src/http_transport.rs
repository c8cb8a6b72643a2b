//! reqwest-backed transport

use crate::error::ApiError;
use crate::request::ApiRequest;
use crate::transport::Transport;
use async_trait::async_trait;
use log::debug;
use serde_json::Value;
use std::time::Duration;

/// Direct HTTP transport bound to a base address
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport for `base_url` (e.g. `http://localhost:9001/api`)
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join the base address and a request path without doubling slashes
    fn full_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(&self, request: &ApiRequest) -> Result<Value, ApiError> {
        let url = self.full_url(&request.url);
        debug!("{} {}", request.method, url);

        let mut builder = self.client.request(request.method.into(), &url);
        if let Some(data) = &request.data {
            builder = builder.json(data);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            debug!("{} {} -> {}", request.method, url, status);
            return Err(ApiError::from_status_code(status.as_u16()));
        }

        let body = response.bytes().await?;
        if body.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&body)?)
    }
}
