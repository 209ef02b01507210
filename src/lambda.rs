//! SQS-triggered AWS Lambda events.
//!
//! Lambda delivers SQS messages as `Records` with camelCase keys and base64
//! text for binary attribute values. This module maps those records onto
//! [`TransportMessage`] so the regular decoder applies.

use base64::{Engine as _, engine::general_purpose};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

use crate::core::models::{MessageAttributeValue, MessageAttributes, TransportMessage};
use crate::errors::JmsError;
use crate::jms::{Decoder, JmsMessage};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SqsEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<SqsEventRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SqsEventRecord {
    pub message_id: Option<String>,
    pub receipt_handle: Option<String>,
    #[serde(default)]
    pub body: String,
    pub md5_of_body: Option<String>,
    #[serde(default)]
    pub attributes: HashMap<String, String>,
    #[serde(default)]
    pub message_attributes: HashMap<String, SqsEventAttribute>,
    #[serde(rename = "eventSourceARN")]
    pub event_source_arn: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SqsEventAttribute {
    pub data_type: String,
    pub string_value: Option<String>,
    /// Base64 text, as Lambda delivers it.
    pub binary_value: Option<String>,
}

impl SqsEventRecord {
    /// Queue name taken from the last segment of the event source ARN.
    #[must_use]
    pub fn queue_name(&self) -> Option<&str> {
        self.event_source_arn
            .as_deref()
            .and_then(|arn| arn.rsplit(':').next())
            .filter(|name| !name.is_empty())
    }

    /// # Errors
    ///
    /// Returns `JmsError::Event` when a binary attribute is not valid base64.
    pub fn into_transport_message(self) -> Result<TransportMessage, JmsError> {
        let message_attributes: MessageAttributes = self
            .message_attributes
            .into_iter()
            .map(|(name, attribute)| {
                let binary_value = attribute
                    .binary_value
                    .map(|b64| general_purpose::STANDARD.decode(b64))
                    .transpose()
                    .map_err(|e| JmsError::Event(format!("attribute {name}: {e}")))?;
                let value = MessageAttributeValue {
                    data_type: attribute.data_type,
                    string_value: attribute.string_value,
                    binary_value,
                };
                Ok((name, value))
            })
            .collect::<Result<_, JmsError>>()?;

        Ok(TransportMessage {
            message_id: self.message_id,
            receipt_handle: self.receipt_handle,
            body: self.body,
            md5_of_body: self.md5_of_body,
            attributes: self.attributes,
            message_attributes,
        })
    }
}

/// Decode every record of a Lambda SQS event, in order.
///
/// # Errors
///
/// `JmsError::Event` when the payload is not an SQS event, otherwise the first
/// decoding error of any record.
pub fn decode_event(decoder: &Decoder, payload: &Value) -> Result<Vec<JmsMessage>, JmsError> {
    let event = SqsEvent::deserialize(payload)?;
    event
        .records
        .into_iter()
        .map(|record| {
            debug!(
                "Decoding record {:?} from queue {}",
                record.message_id,
                record.queue_name().unwrap_or("-")
            );
            decoder.decode(record.into_transport_message()?)
        })
        .collect()
}
