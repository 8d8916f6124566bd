//! Client configuration
//!
//! Endpoint locations and the login suffix. The defaults point at the public
//! LernSax service; the CLI and the tests override them.

use crate::error::Result;
use url::Url;

pub const DEFAULT_RPC_URL: &str = "https://www.lernsax.de/jsonrpc.php";
pub const DEFAULT_QR_URL: &str = "https://www.lernsax.de/wws/992.php";
pub const DEFAULT_EMAIL_SUFFIX: &str = ".lernsax.de";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// JSON-RPC endpoint receiving the autologin batch
    pub rpc_url: String,
    /// QR rendering endpoint, gets the autologin URL as its `url` parameter
    pub qr_url: String,
    /// Appended to logins that don't already end with it
    pub email_suffix: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            qr_url: DEFAULT_QR_URL.to_string(),
            email_suffix: DEFAULT_EMAIL_SUFFIX.to_string(),
        }
    }
}

impl ClientConfig {
    /// Build a configuration for custom endpoints, rejecting unparsable URLs
    pub fn new(rpc_url: impl Into<String>, qr_url: impl Into<String>) -> Result<Self> {
        let rpc_url = rpc_url.into();
        let qr_url = qr_url.into();
        Url::parse(&rpc_url)?;
        Url::parse(&qr_url)?;

        Ok(Self {
            rpc_url,
            qr_url,
            ..Self::default()
        })
    }

    pub fn with_email_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.email_suffix = suffix.into();
        self
    }
}
