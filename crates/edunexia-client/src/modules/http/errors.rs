use reqwest::StatusCode;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub(crate) enum ApiError {
    /// `signed_out` is set when the stored session was cleared because of
    /// this response.
    #[error("unauthorized: {detail}")]
    Unauthorized {
        detail: String,
        payload: Value,
        signed_out: bool,
    },
    #[error("request failed: {status} {payload}")]
    Status { status: StatusCode, payload: Value },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// The server payload, exactly as received.
    pub(crate) fn payload(&self) -> Option<&Value> {
        match self {
            Self::Unauthorized { payload, .. } | Self::Status { payload, .. } => Some(payload),
            Self::Transport(_) => None,
        }
    }

    /// Whether the server rejected the session and the client signed out.
    pub(crate) fn signed_out(&self) -> bool {
        matches!(self, Self::Unauthorized { signed_out: true, .. })
    }

    /// Human-readable text supplied by the server, if any.
    pub(crate) fn server_message(&self) -> Option<String> {
        server_message(self.payload()?)
    }
}

/// Reads `message`, then `detail`, from an error payload. A bare string
/// payload is its own message.
fn server_message(payload: &Value) -> Option<String> {
    let text = match payload {
        Value::String(text) => Some(text.as_str()),
        Value::Object(map) => ["message", "detail"]
            .into_iter()
            .filter_map(|key| map.get(key))
            .find_map(Value::as_str),
        _ => None,
    }?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
