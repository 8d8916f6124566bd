#![allow(async_fn_in_trait)] // 内部 trait，不需要 Send 约束

use crate::config::ClientConfig;
use crate::error::Result;
use crate::model::dtos::RequestBatch;

/// Common trait for HTTP client functionality
pub trait HttpClient {
    /// Create a new HTTP client instance
    async fn new(config: ClientConfig) -> Result<Self>
    where
        Self: Sized;
}

/// Common interface for all HTTP operations
pub trait RequestApi {
    /// Endpoints this client talks to
    fn config(&self) -> &ClientConfig;

    /// Post a JSON-RPC batch and return the raw response body
    async fn send_batch(&self, batch: &RequestBatch) -> Result<String>;

    /// Download the rendered QR image
    async fn fetch_image(&self, image_url: &str) -> Result<Vec<u8>>;
}
