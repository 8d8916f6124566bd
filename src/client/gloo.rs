//! WASM HTTP client implementation using gloo_net
//!
//! This module provides HTTP functionality for WASM environments
//! using the gloo_net crate for making HTTP requests via the browser's fetch API.

use crate::config::ClientConfig;
use crate::error::{ErrorKind, Result};
use crate::interface::{HttpClient, RequestApi};
use crate::model::dtos::RequestBatch;
use gloo_net::http::Request;
use web_sys::RequestMode;

/// HTTP client for WASM environments using gloo_net
#[derive(Debug, Clone)]
pub struct WasmClient {
    config: ClientConfig,
}

impl WasmClient {
    /// Nothing to set up, the browser owns the connection pool
    pub fn with_config(config: ClientConfig) -> Self {
        Self { config }
    }
}

impl HttpClient for WasmClient {
    async fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self::with_config(config))
    }
}

impl RequestApi for WasmClient {
    fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn send_batch(&self, batch: &RequestBatch) -> Result<String> {
        // No Content-Type header: keeps this a simple CORS request without preflight
        let body = serde_json::to_string(batch)?;

        let resp = Request::post(&self.config.rpc_url)
            .mode(RequestMode::Cors)
            .body(body)?
            .send()
            .await?;

        log::debug!("Batch response status: {}", resp.status());

        Ok(resp.text().await?)
    }

    async fn fetch_image(&self, image_url: &str) -> Result<Vec<u8>> {
        let resp = Request::get(image_url)
            .mode(RequestMode::Cors)
            .send()
            .await?;

        if !resp.ok() {
            return Err(ErrorKind::ResponseError(format!(
                "QR image request failed with status {}",
                resp.status()
            ))
            .into());
        }

        Ok(resp.binary().await?)
    }
}
