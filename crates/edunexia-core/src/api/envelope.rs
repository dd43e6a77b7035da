use serde::{Deserialize, Serialize};

pub const STATUS_SUCCESS: &str = "success";

/// Response wrapper used by every backend endpoint:
/// `{ "status": "success" | "error", "data": ..., "message": ... }`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiEnvelope<T> {
    pub status: String,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    /// Returns the payload only when the server reported success.
    pub fn into_success(self) -> Result<T, Option<String>> {
        if !self.is_success() {
            return Err(self.message);
        }
        match self.data {
            Some(data) => Ok(data),
            None => Err(self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_without_data_is_rejected() {
        let envelope: ApiEnvelope<String> =
            serde_json::from_str(r#"{"status":"success","message":"empty"}"#).expect("parse");
        assert_eq!(envelope.into_success(), Err(Some("empty".to_string())));
    }

    #[test]
    fn error_status_keeps_message() {
        let envelope: ApiEnvelope<String> = serde_json::from_str(
            r#"{"status":"error","data":"ignored","message":"Invalid credentials"}"#,
        )
        .expect("parse");
        assert!(!envelope.is_success());
        assert_eq!(
            envelope.into_success(),
            Err(Some("Invalid credentials".to_string()))
        );
    }

    #[test]
    fn success_returns_data() {
        let envelope: ApiEnvelope<String> =
            serde_json::from_str(r#"{"status":"success","data":"ok"}"#).expect("parse");
        assert_eq!(envelope.into_success(), Ok("ok".to_string()));
    }
}
