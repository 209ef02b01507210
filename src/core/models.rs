//! Transport-native shapes of an SQS-style queue.
//!
//! These mirror the request/response fields of `SendMessage`, `SendMessageBatch`
//! and `ReceiveMessage`. Nothing here knows about JMS; the codec in
//! [`crate::jms`] reads and writes them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Data type of string-valued message attributes.
pub const STRING_DATA_TYPE: &str = "String";

/// A typed message attribute value as carried on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MessageAttributeValue {
    pub data_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary_value: Option<Vec<u8>>,
}

impl MessageAttributeValue {
    /// Create a `String`-typed attribute.
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            data_type: STRING_DATA_TYPE.to_string(),
            string_value: Some(value.into()),
            binary_value: None,
        }
    }

    /// Create a `Number`-typed attribute. SQS carries numbers as strings.
    pub fn number(value: impl ToString) -> Self {
        Self {
            data_type: "Number".to_string(),
            string_value: Some(value.to_string()),
            binary_value: None,
        }
    }

    /// Create a `Binary`-typed attribute.
    #[must_use]
    pub fn binary(value: Vec<u8>) -> Self {
        Self {
            data_type: "Binary".to_string(),
            string_value: None,
            binary_value: Some(value),
        }
    }

    /// The string value, only when the data type is exactly `String`.
    #[must_use]
    pub fn as_string(&self) -> Option<&str> {
        if self.data_type == STRING_DATA_TYPE {
            self.string_value.as_deref()
        } else {
            None
        }
    }
}

pub type MessageAttributes = HashMap<String, MessageAttributeValue>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendMessageRequest {
    pub queue_url: String,
    pub message_body: String,
    pub message_attributes: MessageAttributes,
    pub delay_seconds: Option<i32>,
    pub message_group_id: Option<String>,
    pub message_deduplication_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BatchRequestEntry {
    pub id: String,
    pub message_body: String,
    #[serde(default)]
    pub message_attributes: MessageAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_seconds: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_deduplication_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendMessageBatchRequest {
    pub queue_url: String,
    pub entries: Vec<BatchRequestEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReceiveMessageRequest {
    pub queue_url: String,
    pub message_attribute_names: Vec<String>,
    pub max_number_of_messages: Option<i32>,
    pub wait_time_seconds: Option<i32>,
    pub visibility_timeout: Option<i32>,
}

impl ReceiveMessageRequest {
    pub fn new(queue_url: impl Into<String>) -> Self {
        Self {
            queue_url: queue_url.into(),
            ..Self::default()
        }
    }
}

/// A message as returned by a receive call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportMessage {
    pub message_id: Option<String>,
    pub receipt_handle: Option<String>,
    pub body: String,
    pub md5_of_body: Option<String>,
    /// System attributes such as `SentTimestamp` or `ApproximateReceiveCount`.
    pub attributes: HashMap<String, String>,
    pub message_attributes: MessageAttributes,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendMessageResult {
    pub message_id: Option<String>,
    pub md5_of_message_body: Option<String>,
    pub sequence_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchResultEntry {
    pub id: String,
    pub message_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchResultErrorEntry {
    pub id: String,
    pub code: String,
    pub message: Option<String>,
    pub sender_fault: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendMessageBatchResult {
    pub successful: Vec<BatchResultEntry>,
    pub failed: Vec<BatchResultErrorEntry>,
}
