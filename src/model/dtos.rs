use serde::Serialize;
use serde_json::{json, Value};

/// Login pair for a single autologin request
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// One JSON-RPC 2.0 call inside a batch
#[derive(Debug, Clone, Serialize)]
pub struct RpcCall {
    pub jsonrpc: &'static str,
    pub method: &'static str,
    pub id: u32,
    pub params: Value,
}

impl RpcCall {
    fn new(method: &'static str, id: u32, params: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            method,
            id,
            params,
        }
    }
}

/// Ordered batch sent in a single POST. The server answers with an array in
/// the same order; ids repeat, so responses are matched by position.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct RequestBatch {
    pub calls: Vec<RpcCall>,
}

impl RequestBatch {
    pub const LOGIN_INDEX: usize = 0;
    pub const AUTOLOGIN_INDEX: usize = 2;
    pub const LEN: usize = 4;

    /// login, focus on trusts, fetch the autologin URL, logout
    pub fn autologin(credentials: &Credentials) -> Self {
        Self {
            calls: vec![
                RpcCall::new(
                    "login",
                    1,
                    json!({
                        "login": credentials.email,
                        "password": credentials.password,
                    }),
                ),
                RpcCall::new("set_focus", 2, json!({ "object": "trusts" })),
                RpcCall::new("get_url_for_autologin", 2, json!({})),
                RpcCall::new("logout", 3, json!({})),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn autologin_batch_wire_shape() {
        let batch = RequestBatch::autologin(&Credentials::new("alice.lernsax.de", "hunter2"));
        let wire = serde_json::to_value(&batch).unwrap();

        assert_eq!(
            wire,
            json!([
                {
                    "jsonrpc": "2.0",
                    "method": "login",
                    "id": 1,
                    "params": { "login": "alice.lernsax.de", "password": "hunter2" }
                },
                {
                    "jsonrpc": "2.0",
                    "method": "set_focus",
                    "id": 2,
                    "params": { "object": "trusts" }
                },
                { "jsonrpc": "2.0", "method": "get_url_for_autologin", "id": 2, "params": {} },
                { "jsonrpc": "2.0", "method": "logout", "id": 3, "params": {} }
            ])
        );
        assert_eq!(batch.calls.len(), RequestBatch::LEN);
    }

    #[test]
    fn debug_output_hides_password() {
        let rendered = format!("{:?}", Credentials::new("bob", "s3cret"));
        assert!(rendered.contains("bob"));
        assert!(!rendered.contains("s3cret"));
    }
}
