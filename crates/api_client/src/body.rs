use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::ApiError;

/// Parsed response body: JSON when the server says so, raw text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiBody {
    Json(Value),
    Text(String),
}

impl ApiBody {
    pub(crate) fn parse(content_type: Option<&str>, raw: String) -> Result<Self, serde_json::Error> {
        let is_json = content_type.is_some_and(|ct| ct.contains("application/json"));
        if is_json {
            serde_json::from_str(&raw).map(ApiBody::Json)
        } else {
            Ok(ApiBody::Text(raw))
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ApiBody::Json(value) => Some(value),
            ApiBody::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ApiBody::Text(text) => Some(text),
            ApiBody::Json(_) => None,
        }
    }

    /// Decode a JSON body into `T`. Text bodies are decoded as a JSON string.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        let value = match self {
            ApiBody::Json(value) => value,
            ApiBody::Text(text) => Value::String(text),
        };
        Ok(serde_json::from_value(value)?)
    }

    /// Message carried by an error body: `error`, then `message`.
    pub(crate) fn error_message(&self) -> Option<String> {
        let object = self.as_json()?.as_object()?;
        ["error", "message"]
            .iter()
            .filter_map(|key| object.get(*key).and_then(Value::as_str))
            .find(|msg| !msg.is_empty())
            .map(str::to_string)
    }
}
