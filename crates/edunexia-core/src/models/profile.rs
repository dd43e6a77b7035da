use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Account record of the signed-in student.
///
/// Only the identifier and the name fields are interpreted; everything else
/// the backend sends is kept in `extra` so the cached copy stays faithful.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Profile {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Profile {
    pub fn display_name(&self) -> &str {
        [&self.full_name, &self.username, &self.email]
            .into_iter()
            .flatten()
            .map(|value| value.trim())
            .find(|value| !value.is_empty())
            .unwrap_or(self.id.as_str())
    }

    /// Lenient parser for cached copies: anything malformed is `None`.
    pub fn from_cached(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    pub fn to_cached(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(value) => value,
        RawId::Number(value) => value.to_string(),
    })
}
