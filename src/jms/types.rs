use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;
use std::str::FromStr;

use super::constants::{QUEUE_NAME, QUEUE_URL};
use crate::errors::JmsError;

/// JMS payload kind. Determines how the body is carried on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JmsMessageType {
    /// Binary body, base64 text on the wire.
    Byte,
    /// Text body, carried verbatim.
    Text,
}

impl JmsMessageType {
    /// Wire value of the reserved message type attribute.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Byte => "byte",
            Self::Text => "text",
        }
    }

    /// Parse a received wire value.
    ///
    /// # Errors
    ///
    /// Returns `JmsError::UnknownMessageType` for anything but `"byte"` or `"text"`.
    pub fn from_wire(value: &str) -> Result<Self, JmsError> {
        match value {
            "byte" => Ok(Self::Byte),
            "text" => Ok(Self::Text),
            other => Err(JmsError::UnknownMessageType(other.to_string())),
        }
    }
}

impl fmt::Display for JmsMessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JmsMessageType {
    type Err = JmsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_wire(s).map_err(|_| JmsError::InvalidMessageType {
            entry_id: None,
            value: s.to_string(),
        })
    }
}

/// Destination a receiver should answer to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReplyTo {
    pub queue_name: String,
    pub queue_url: String,
}

impl ReplyTo {
    pub fn new(queue_name: impl Into<String>, queue_url: impl Into<String>) -> Self {
        Self {
            queue_name: queue_name.into(),
            queue_url: queue_url.into(),
        }
    }

    /// Validate a loosely typed reply-to map.
    ///
    /// # Errors
    ///
    /// Returns `JmsError::InvalidReplyTo` unless `value` is an object holding
    /// string `QueueName` and `QueueUrl` members.
    pub fn from_value(value: &Value) -> Result<Self, JmsError> {
        let Some(map) = value.as_object() else {
            return Err(JmsError::InvalidReplyTo(value.to_string()));
        };
        match (
            map.get(QUEUE_NAME).and_then(Value::as_str),
            map.get(QUEUE_URL).and_then(Value::as_str),
        ) {
            (Some(name), Some(url)) => Ok(Self::new(name, url)),
            _ => Err(JmsError::InvalidReplyTo(value.to_string())),
        }
    }

    #[must_use]
    pub fn to_value(&self) -> Value {
        json!({ QUEUE_NAME: self.queue_name, QUEUE_URL: self.queue_url })
    }
}

impl From<ReplyTo> for Value {
    fn from(reply_to: ReplyTo) -> Self {
        reply_to.to_value()
    }
}

/// Message payload before encoding or after decoding.
///
/// In JSON a string is a text body and an array of byte values is a binary one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Body {
    Text(String),
    Bytes(Vec<u8>),
}

impl Body {
    /// The JMS type this body naturally maps to.
    #[must_use]
    pub fn message_type(&self) -> JmsMessageType {
        match self {
            Self::Text(_) => JmsMessageType::Text,
            Self::Bytes(_) => JmsMessageType::Byte,
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
        }
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<&[u8]> for Body {
    fn from(bytes: &[u8]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}
