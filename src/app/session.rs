//! Remote session: one autologin batch in, one `ResponseStatus` out.

use crate::error::Result;
use crate::interface::RequestApi;
use crate::model::dtos::{Credentials, RequestBatch};
use crate::model::structs::ResponseStatus;
use serde_json::Value;
use url::Url;

pub const INVALID_RESPONSE: &str = "Invalid response from server";

/// Run the login / set_focus / autologin / logout batch.
///
/// Never fails: transport problems, unparsable bodies and server-side
/// errors all come back as `ResponseStatus::Error`.
pub async fn perform_request<C: RequestApi>(
    client: &C,
    credentials: &Credentials,
) -> ResponseStatus {
    let batch = RequestBatch::autologin(credentials);
    log::debug!(
        "Sending autologin batch for {} to {}",
        credentials.email,
        client.config().rpc_url
    );

    let body = match client.send_batch(&batch).await {
        Ok(body) => body,
        Err(e) => {
            log::warn!("Autologin request failed: {e}");
            return ResponseStatus::error(format!("Request failed: {e}"));
        }
    };

    match serde_json::from_str::<Value>(&body) {
        Ok(json) => interpret_response(&json, &client.config().qr_url),
        Err(e) => {
            log::warn!("Autologin response is not JSON: {e}");
            ResponseStatus::error(INVALID_RESPONSE)
        }
    }
}

/// Map a parsed batch response onto a status.
///
/// Only positions 0 (login) and 2 (autologin URL) are read. The array must
/// have exactly four entries and at least one of `[0].result.error` and
/// `[2].result.url` must be set.
pub fn interpret_response(json: &Value, qr_url: &str) -> ResponseStatus {
    let Some(entries) = json.as_array() else {
        return ResponseStatus::error(INVALID_RESPONSE);
    };

    // Indexing a `Value` yields null for anything missing
    let login_error = &json[RequestBatch::LOGIN_INDEX]["result"]["error"];
    let autologin_url = &json[RequestBatch::AUTOLOGIN_INDEX]["result"]["url"];

    if entries.len() != RequestBatch::LEN || !(is_set(login_error) || is_set(autologin_url)) {
        return ResponseStatus::error(INVALID_RESPONSE);
    }

    if is_set(login_error) {
        return ResponseStatus::error(format!("Error: {}", display_value(login_error)));
    }

    let url = display_value(autologin_url);
    match image_url(qr_url, &url) {
        Ok(image_url) => ResponseStatus::Success { url, image_url },
        Err(e) => {
            log::error!("Cannot build QR image URL from {qr_url}: {e}");
            ResponseStatus::error(format!("Invalid QR endpoint: {e}"))
        }
    }
}

/// QR endpoint with its `url` query parameter set to `url`.
/// Other parameters already on the endpoint are kept.
pub fn image_url(qr_url: &str, url: &str) -> Result<String> {
    let mut image = Url::parse(qr_url)?;
    let kept: Vec<(String, String)> = image
        .query_pairs()
        .filter(|(key, _)| key != "url")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    image
        .query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair("url", url);

    Ok(image.into())
}

// Server fields are checked the way a browser would test them for truthiness
fn is_set(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
