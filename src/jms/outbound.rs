//! Logical outbound messages, before JMS encoding.
//!
//! Both types deserialize from JSON using the SQS request spelling plus the
//! `JMSMessageType`, `JMSReplyTo` and `JMSCorrelationId` keys. The JMS fields
//! stay loosely typed until the encoder validates them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types::{Body, JmsMessageType, ReplyTo};
use crate::core::models::{MessageAttributeValue, MessageAttributes};

/// A single message for `SendMessage`. Its JMS type is chosen by the send call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OutboundMessage {
    #[serde(default)]
    pub queue_url: String,
    pub message_body: Body,
    #[serde(rename = "JMSReplyTo", default, skip_serializing_if = "Option::is_none")]
    pub jms_reply_to: Option<Value>,
    #[serde(
        rename = "JMSCorrelationId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub jms_correlation_id: Option<Value>,
    #[serde(default)]
    pub message_attributes: MessageAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_seconds: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_deduplication_id: Option<String>,
}

impl OutboundMessage {
    pub fn new(queue_url: impl Into<String>, body: impl Into<Body>) -> Self {
        Self {
            queue_url: queue_url.into(),
            message_body: body.into(),
            jms_reply_to: None,
            jms_correlation_id: None,
            message_attributes: MessageAttributes::new(),
            delay_seconds: None,
            message_group_id: None,
            message_deduplication_id: None,
        }
    }

    #[must_use]
    pub fn with_reply_to(mut self, reply_to: ReplyTo) -> Self {
        self.jms_reply_to = Some(reply_to.into());
        self
    }

    #[must_use]
    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.jms_correlation_id = Some(Value::String(correlation_id.into()));
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: MessageAttributeValue) -> Self {
        self.message_attributes.insert(name.into(), value);
        self
    }

    #[must_use]
    pub fn with_delay_seconds(mut self, delay_seconds: i32) -> Self {
        self.delay_seconds = Some(delay_seconds);
        self
    }

    #[must_use]
    pub fn with_message_group_id(mut self, group_id: impl Into<String>) -> Self {
        self.message_group_id = Some(group_id.into());
        self
    }

    #[must_use]
    pub fn with_message_deduplication_id(mut self, deduplication_id: impl Into<String>) -> Self {
        self.message_deduplication_id = Some(deduplication_id.into());
        self
    }
}

/// One entry of a `SendMessageBatch` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OutboundEntry {
    pub id: String,
    pub message_body: Body,
    #[serde(
        rename = "JMSMessageType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub jms_message_type: Option<Value>,
    #[serde(rename = "JMSReplyTo", default, skip_serializing_if = "Option::is_none")]
    pub jms_reply_to: Option<Value>,
    #[serde(
        rename = "JMSCorrelationId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub jms_correlation_id: Option<Value>,
    #[serde(default)]
    pub message_attributes: MessageAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_seconds: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_deduplication_id: Option<String>,
}

impl OutboundEntry {
    /// An entry without a logical message type. The caller must pre-set the
    /// reserved type attribute or the batch encoder rejects it.
    pub fn new(id: impl Into<String>, body: impl Into<Body>) -> Self {
        Self {
            id: id.into(),
            message_body: body.into(),
            jms_message_type: None,
            jms_reply_to: None,
            jms_correlation_id: None,
            message_attributes: MessageAttributes::new(),
            delay_seconds: None,
            message_group_id: None,
            message_deduplication_id: None,
        }
    }

    pub fn bytes(id: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self::new(id, Body::Bytes(body.into())).with_message_type(JmsMessageType::Byte)
    }

    pub fn text(id: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(id, Body::Text(body.into())).with_message_type(JmsMessageType::Text)
    }

    #[must_use]
    pub fn with_message_type(mut self, message_type: JmsMessageType) -> Self {
        self.jms_message_type = Some(Value::String(message_type.as_str().to_string()));
        self
    }

    #[must_use]
    pub fn with_reply_to(mut self, reply_to: ReplyTo) -> Self {
        self.jms_reply_to = Some(reply_to.into());
        self
    }

    #[must_use]
    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.jms_correlation_id = Some(Value::String(correlation_id.into()));
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: MessageAttributeValue) -> Self {
        self.message_attributes.insert(name.into(), value);
        self
    }

    #[must_use]
    pub fn with_message_group_id(mut self, group_id: impl Into<String>) -> Self {
        self.message_group_id = Some(group_id.into());
        self
    }
}
