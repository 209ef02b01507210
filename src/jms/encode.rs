//! Logical message → transport request.

use base64::{Engine as _, engine::general_purpose};
use serde_json::Value;

use super::constants::{
    JMS_SQS_CORRELATION_ID, JMS_SQS_MESSAGE_TYPE, JMS_SQS_REPLY_TO_QUEUE_NAME,
    JMS_SQS_REPLY_TO_QUEUE_URL,
};
use super::outbound::{OutboundEntry, OutboundMessage};
use super::types::{Body, JmsMessageType, ReplyTo};
use crate::core::models::{
    BatchRequestEntry, MessageAttributeValue, MessageAttributes, SendMessageRequest,
};
use crate::errors::JmsError;

/// Encode one message for `SendMessage`.
///
/// Byte bodies become standard base64 text; text bodies pass through. The
/// reserved type, reply-to and correlation attributes are written over
/// anything the caller put under those names. Every other field is copied
/// unchanged.
///
/// # Errors
///
/// `InvalidBodyType` when the body does not fit the type, `InvalidReplyTo` or
/// `InvalidCorrelationId` when those fields are malformed.
pub fn encode_message(
    message_type: JmsMessageType,
    message: OutboundMessage,
) -> Result<SendMessageRequest, JmsError> {
    let OutboundMessage {
        queue_url,
        message_body,
        jms_reply_to,
        jms_correlation_id,
        mut message_attributes,
        delay_seconds,
        message_group_id,
        message_deduplication_id,
    } = message;

    let message_body = encode_body(message_type, message_body)?;
    set_message_type(&mut message_attributes, message_type);
    if let Some(value) = jms_reply_to.as_ref() {
        set_reply_to(&mut message_attributes, &ReplyTo::from_value(value)?);
    }
    if let Some(value) = jms_correlation_id.as_ref() {
        set_correlation_id(&mut message_attributes, value)?;
    }

    Ok(SendMessageRequest {
        queue_url,
        message_body,
        message_attributes,
        delay_seconds,
        message_group_id,
        message_deduplication_id,
    })
}

/// Encode the entries of a `SendMessageBatch` request, preserving order and ids.
///
/// The input is never modified. The first invalid entry fails the whole call,
/// so a caller either gets every entry encoded or nothing to send.
///
/// # Errors
///
/// `InvalidMessageType` or `MissingMessageType` naming the offending entry,
/// plus the per-field errors of [`encode_message`].
pub fn encode_batch(entries: &[OutboundEntry]) -> Result<Vec<BatchRequestEntry>, JmsError> {
    entries.iter().map(encode_entry).collect()
}

fn encode_entry(entry: &OutboundEntry) -> Result<BatchRequestEntry, JmsError> {
    let mut message_attributes = entry.message_attributes.clone();

    let mut message_body = None;
    if let Some(value) = entry.jms_message_type.as_ref() {
        let message_type = entry_message_type(value, &entry.id)?;
        message_body = Some(encode_body(message_type, entry.message_body.clone())?);
        set_message_type(&mut message_attributes, message_type);
    }
    if let Some(value) = entry.jms_reply_to.as_ref() {
        set_reply_to(&mut message_attributes, &ReplyTo::from_value(value)?);
    }
    if let Some(value) = entry.jms_correlation_id.as_ref() {
        set_correlation_id(&mut message_attributes, value)?;
    }

    let message_type = message_attributes
        .get(JMS_SQS_MESSAGE_TYPE)
        .and_then(MessageAttributeValue::as_string)
        .and_then(|value| JmsMessageType::from_wire(value).ok())
        .ok_or_else(|| JmsError::MissingMessageType {
            entry_id: Some(entry.id.clone()),
        })?;

    let message_body = match message_body {
        Some(body) => body,
        None => encode_preset_body(message_type, &entry.message_body)?,
    };

    Ok(BatchRequestEntry {
        id: entry.id.clone(),
        message_body,
        message_attributes,
        delay_seconds: entry.delay_seconds,
        message_group_id: entry.message_group_id.clone(),
        message_deduplication_id: entry.message_deduplication_id.clone(),
    })
}

fn entry_message_type(value: &Value, entry_id: &str) -> Result<JmsMessageType, JmsError> {
    value
        .as_str()
        .and_then(|wire| JmsMessageType::from_wire(wire).ok())
        .ok_or_else(|| JmsError::InvalidMessageType {
            entry_id: Some(entry_id.to_string()),
            value: value.as_str().map_or_else(|| value.to_string(), str::to_string),
        })
}

fn encode_body(message_type: JmsMessageType, body: Body) -> Result<String, JmsError> {
    match (message_type, body) {
        (JmsMessageType::Byte, Body::Bytes(bytes)) => Ok(general_purpose::STANDARD.encode(bytes)),
        (JmsMessageType::Byte, body @ Body::Text(_)) => {
            Err(JmsError::InvalidBodyType(format!("expected bytes, got {}", body.kind())))
        }
        (JmsMessageType::Text, Body::Text(text)) => Ok(text),
        (JmsMessageType::Text, Body::Bytes(bytes)) => String::from_utf8(bytes)
            .map_err(|e| JmsError::InvalidBodyType(format!("text body is not UTF-8: {e}"))),
    }
}

// Type came from a pre-set reserved attribute: a text body is taken to be wire-ready.
fn encode_preset_body(message_type: JmsMessageType, body: &Body) -> Result<String, JmsError> {
    match body {
        Body::Text(text) => Ok(text.clone()),
        Body::Bytes(_) => encode_body(message_type, body.clone()),
    }
}

fn set_message_type(attributes: &mut MessageAttributes, message_type: JmsMessageType) {
    attributes.insert(
        JMS_SQS_MESSAGE_TYPE.to_string(),
        MessageAttributeValue::string(message_type.as_str()),
    );
}

fn set_reply_to(attributes: &mut MessageAttributes, reply_to: &ReplyTo) {
    attributes.insert(
        JMS_SQS_REPLY_TO_QUEUE_NAME.to_string(),
        MessageAttributeValue::string(&reply_to.queue_name),
    );
    attributes.insert(
        JMS_SQS_REPLY_TO_QUEUE_URL.to_string(),
        MessageAttributeValue::string(&reply_to.queue_url),
    );
}

/// SQS rejects empty attribute values, so an empty id is dropped.
fn set_correlation_id(attributes: &mut MessageAttributes, value: &Value) -> Result<(), JmsError> {
    match value {
        Value::String(s) if s.is_empty() => Ok(()),
        Value::String(s) => {
            attributes.insert(
                JMS_SQS_CORRELATION_ID.to_string(),
                MessageAttributeValue::string(s.as_str()),
            );
            Ok(())
        }
        other => Err(JmsError::InvalidCorrelationId(other.to_string())),
    }
}
