use serde::{Deserialize, Serialize};

pub const LOADING_TEXT: &str = "Loading...";
pub const QR_ALT_TEXT: &str = "QR Code";

/// Outcome of the autologin flow as shown in the output region
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ResponseStatus {
    #[default]
    None,
    Loading,
    Error {
        message: String,
    },
    Success {
        url: String,
        #[serde(rename = "imageUrl")]
        image_url: String,
    },
}

impl ResponseStatus {
    pub fn error(message: impl Into<String>) -> Self {
        ResponseStatus::Error {
            message: message.into(),
        }
    }
}

/// What the output region contains for a given status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Empty,
    Text(String),
    /// Anchor to `href` wrapping the QR image loaded from `src`
    QrLink { href: String, src: String },
}

impl From<&ResponseStatus> for View {
    fn from(status: &ResponseStatus) -> Self {
        match status {
            ResponseStatus::None => View::Empty,
            ResponseStatus::Loading => View::Text(LOADING_TEXT.to_string()),
            ResponseStatus::Error { message } => View::Text(message.clone()),
            ResponseStatus::Success { url, image_url } => View::QrLink {
                href: url.clone(),
                src: image_url.clone(),
            },
        }
    }
}
