//! Decoded JMS messages.

use std::collections::HashMap;

use super::types::{Body, JmsMessageType, ReplyTo};
use crate::core::models::MessageAttributes;

/// Metadata shared by both message kinds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JmsProperties {
    pub message_id: Option<String>,
    pub receipt_handle: Option<String>,
    pub md5_of_body: Option<String>,
    /// Transport system attributes, untouched.
    pub attributes: HashMap<String, String>,
    pub correlation_id: Option<String>,
    pub reply_to: Option<ReplyTo>,
    /// Application attributes; never contains a reserved name.
    pub message_attributes: MessageAttributes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BytesMessage {
    pub body: Vec<u8>,
    pub properties: JmsProperties,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMessage {
    pub body: String,
    pub properties: JmsProperties,
}

/// A received message, classified once from its wire type tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JmsMessage {
    Bytes(BytesMessage),
    Text(TextMessage),
}

impl JmsMessage {
    #[must_use]
    pub fn message_type(&self) -> JmsMessageType {
        match self {
            Self::Bytes(_) => JmsMessageType::Byte,
            Self::Text(_) => JmsMessageType::Text,
        }
    }

    #[must_use]
    pub fn properties(&self) -> &JmsProperties {
        match self {
            Self::Bytes(m) => &m.properties,
            Self::Text(m) => &m.properties,
        }
    }

    #[must_use]
    pub fn message_id(&self) -> Option<&str> {
        self.properties().message_id.as_deref()
    }

    #[must_use]
    pub fn receipt_handle(&self) -> Option<&str> {
        self.properties().receipt_handle.as_deref()
    }

    #[must_use]
    pub fn correlation_id(&self) -> Option<&str> {
        self.properties().correlation_id.as_deref()
    }

    #[must_use]
    pub fn reply_to(&self) -> Option<&ReplyTo> {
        self.properties().reply_to.as_ref()
    }

    #[must_use]
    pub fn message_attributes(&self) -> &MessageAttributes {
        &self.properties().message_attributes
    }

    /// Raw payload; decoded binary for byte messages, UTF-8 for text ones.
    #[must_use]
    pub fn body_bytes(&self) -> &[u8] {
        match self {
            Self::Bytes(m) => &m.body,
            Self::Text(m) => m.body.as_bytes(),
        }
    }

    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(m) => Some(&m.body),
            Self::Bytes(_) => None,
        }
    }

    #[must_use]
    pub fn body(&self) -> Body {
        match self {
            Self::Bytes(m) => Body::Bytes(m.body.clone()),
            Self::Text(m) => Body::Text(m.body.clone()),
        }
    }

    #[must_use]
    pub fn into_body(self) -> Body {
        match self {
            Self::Bytes(m) => Body::Bytes(m.body),
            Self::Text(m) => Body::Text(m.body),
        }
    }
}
