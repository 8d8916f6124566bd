//! No-WASM HTTP client implementation using reqwest
//!
//! This module provides HTTP functionality for non-WASM environments
//! using the reqwest crate for making HTTP requests.

use crate::config::ClientConfig;
use crate::error::Result;
use crate::interface::{HttpClient, RequestApi};
use crate::model::dtos::RequestBatch;
use reqwest::Client;

/// HTTP client for no-WASM environments using reqwest
#[derive(Debug, Clone)]
pub struct NoWasmClient {
    client: Client,
    config: ClientConfig,
}

impl HttpClient for NoWasmClient {
    async fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("lernsax-qr/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, config })
    }
}

impl RequestApi for NoWasmClient {
    fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn send_batch(&self, batch: &RequestBatch) -> Result<String> {
        // Plain body without a JSON content type, same as the browser sends it
        let body = serde_json::to_string(batch)?;

        let resp = self
            .client
            .post(&self.config.rpc_url)
            .body(body)
            .send()
            .await?;

        log::debug!("Batch response status: {}", resp.status());

        Ok(resp.text().await?)
    }

    async fn fetch_image(&self, image_url: &str) -> Result<Vec<u8>> {
        let resp = self
            .client
            .get(image_url)
            .send()
            .await?
            .error_for_status()?;

        log::debug!(
            "QR image content type: {:?}",
            resp.headers().get(reqwest::header::CONTENT_TYPE)
        );

        Ok(resp.bytes().await?.to_vec())
    }
}
