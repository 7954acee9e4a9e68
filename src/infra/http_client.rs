use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use crate::app::ports::{HttpClientPort, HttpFailure, HttpGetResult};
use crate::common::error::Result;

/// `HttpClientPort` over a shared reqwest client with a fixed request timeout
pub struct ReqwestHttp {
    client: reqwest::Client,
}

impl ReqwestHttp {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClientPort for ReqwestHttp {
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> std::result::Result<HttpGetResult, HttpFailure> {
        let request = headers
            .iter()
            .fold(self.client.get(url), |request, (name, value)| request.header(*name, *value));
        let response = request
            .send()
            .await
            .map_err(|e| HttpFailure::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let bytes = response.bytes().await.map_err(|e| HttpFailure::Body {
            status,
            error: e.to_string(),
        })?;

        Ok(HttpGetResult {
            status,
            bytes: bytes.to_vec(),
            content_type,
        })
    }
}
