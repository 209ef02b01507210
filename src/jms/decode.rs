//! Transport message → logical JMS message.

use base64::{Engine as _, engine::general_purpose};

use super::constants::{
    JMS_SQS_CORRELATION_ID, JMS_SQS_MESSAGE_TYPE, JMS_SQS_REPLY_TO_QUEUE_NAME,
    JMS_SQS_REPLY_TO_QUEUE_URL,
};
use super::message::{BytesMessage, JmsMessage, JmsProperties, TextMessage};
use super::types::{JmsMessageType, ReplyTo};
use crate::core::config::{JmsConfig, ReplyToPolicy};
use crate::core::models::{MessageAttributes, TransportMessage};
use crate::errors::JmsError;

/// Decodes received messages. Holds no state beyond its policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Decoder {
    reply_to_policy: ReplyToPolicy,
}

impl Decoder {
    #[must_use]
    pub fn new(reply_to_policy: ReplyToPolicy) -> Self {
        Self { reply_to_policy }
    }

    #[must_use]
    pub fn from_config(config: &JmsConfig) -> Self {
        Self::new(config.reply_to_policy)
    }

    #[must_use]
    pub fn reply_to_policy(&self) -> ReplyToPolicy {
        self.reply_to_policy
    }

    /// Rebuild one JMS message.
    ///
    /// # Errors
    ///
    /// `MissingMessageType` when the type attribute is absent, `UnknownMessageType`
    /// for a value other than `byte`/`text`, `InvalidAttributeType` when a reserved
    /// attribute is not String-typed, `InvalidBase64` for an undecodable byte body,
    /// and `MalformedReplyTo` for half a reply-to under the strict policy.
    pub fn decode(&self, message: TransportMessage) -> Result<JmsMessage, JmsError> {
        let TransportMessage {
            message_id,
            receipt_handle,
            body,
            md5_of_body,
            attributes,
            mut message_attributes,
        } = message;

        let message_type = take_string_attribute(&mut message_attributes, JMS_SQS_MESSAGE_TYPE)?
            .ok_or(JmsError::MissingMessageType { entry_id: None })
            .and_then(|value| JmsMessageType::from_wire(&value))?;
        let correlation_id = take_string_attribute(&mut message_attributes, JMS_SQS_CORRELATION_ID)?;
        let reply_to = self.take_reply_to(&mut message_attributes)?;

        let properties = JmsProperties {
            message_id,
            receipt_handle,
            md5_of_body,
            attributes,
            correlation_id,
            reply_to,
            message_attributes,
        };

        Ok(match message_type {
            JmsMessageType::Byte => JmsMessage::Bytes(BytesMessage {
                body: general_purpose::STANDARD.decode(body)?,
                properties,
            }),
            JmsMessageType::Text => JmsMessage::Text(TextMessage { body, properties }),
        })
    }

    /// Rebuild every message of a receive call, in order. The first failure
    /// fails the whole call.
    ///
    /// # Errors
    ///
    /// The first error [`Decoder::decode`] reports.
    pub fn decode_all(&self, messages: Vec<TransportMessage>) -> Result<Vec<JmsMessage>, JmsError> {
        messages.into_iter().map(|m| self.decode(m)).collect()
    }

    fn take_reply_to(&self, attributes: &mut MessageAttributes) -> Result<Option<ReplyTo>, JmsError> {
        let queue_name = take_string_attribute(attributes, JMS_SQS_REPLY_TO_QUEUE_NAME)?;
        let queue_url = take_string_attribute(attributes, JMS_SQS_REPLY_TO_QUEUE_URL)?;
        match (queue_name, queue_url) {
            (Some(name), Some(url)) => Ok(Some(ReplyTo::new(name, url))),
            (None, None) => Ok(None),
            (name, url) => match self.reply_to_policy {
                ReplyToPolicy::Lenient => Ok(None),
                ReplyToPolicy::Strict => Err(JmsError::MalformedReplyTo(format!(
                    "queue name {}, queue url {}",
                    presence(name.as_ref()),
                    presence(url.as_ref())
                ))),
            },
        }
    }
}

/// Decode with the default (lenient) policy.
///
/// # Errors
///
/// See [`Decoder::decode`].
pub fn decode_message(message: TransportMessage) -> Result<JmsMessage, JmsError> {
    Decoder::default().decode(message)
}

/// Decode a received batch with the default (lenient) policy.
///
/// # Errors
///
/// See [`Decoder::decode_all`].
pub fn decode_messages(messages: Vec<TransportMessage>) -> Result<Vec<JmsMessage>, JmsError> {
    Decoder::default().decode_all(messages)
}

fn take_string_attribute(
    attributes: &mut MessageAttributes,
    name: &str,
) -> Result<Option<String>, JmsError> {
    let Some(value) = attributes.remove(name) else {
        return Ok(None);
    };
    match value.as_string() {
        Some(s) => Ok(Some(s.to_string())),
        None => Err(JmsError::InvalidAttributeType {
            name: name.to_string(),
            data_type: value.data_type,
        }),
    }
}

fn presence(value: Option<&String>) -> &'static str {
    if value.is_some() { "present" } else { "missing" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::MessageAttributeValue;
    use crate::jms::constants::is_reserved;

    fn transport(body: &str, attributes: &[(&str, MessageAttributeValue)]) -> TransportMessage {
        TransportMessage {
            message_id: Some("m-1".to_string()),
            receipt_handle: Some("rh-1".to_string()),
            body: body.to_string(),
            message_attributes: attributes
                .iter()
                .map(|(k, v)| ((*k).to_string(), v.clone()))
                .collect(),
            ..TransportMessage::default()
        }
    }

    fn s(value: &str) -> MessageAttributeValue {
        MessageAttributeValue::string(value)
    }

    #[test]
    fn decodes_byte_message() {
        let message = decode_message(transport("AQID", &[(JMS_SQS_MESSAGE_TYPE, s("byte"))])).unwrap();
        assert_eq!(message.message_type(), JmsMessageType::Byte);
        assert_eq!(message.body_bytes(), &[1, 2, 3]);
        assert_eq!(message.text(), None);
        assert_eq!(message.message_id(), Some("m-1"));
        assert!(message.message_attributes().is_empty());
    }

    #[test]
    fn decodes_text_message_with_headers() {
        let message = decode_message(transport(
            "hello",
            &[
                (JMS_SQS_MESSAGE_TYPE, s("text")),
                (JMS_SQS_CORRELATION_ID, s("abc123")),
                (JMS_SQS_REPLY_TO_QUEUE_NAME, s("Q1")),
                (JMS_SQS_REPLY_TO_QUEUE_URL, s("https://example/Q1")),
                ("tenant", s("acme")),
            ],
        ))
        .unwrap();

        assert_eq!(message.text(), Some("hello"));
        assert_eq!(message.correlation_id(), Some("abc123"));
        assert_eq!(message.reply_to(), Some(&ReplyTo::new("Q1", "https://example/Q1")));
        assert_eq!(message.message_attributes().len(), 1);
        assert!(message.message_attributes().keys().all(|k| !is_reserved(k)));
    }

    #[test]
    fn missing_type_is_rejected() {
        let err = decode_message(transport("hello", &[("tenant", s("acme"))])).unwrap_err();
        assert!(matches!(err, JmsError::MissingMessageType { entry_id: None }));
    }

    #[test]
    fn unknown_type_is_rejected() {
        let err = decode_message(transport("{}", &[(JMS_SQS_MESSAGE_TYPE, s("object"))])).unwrap_err();
        assert!(matches!(err, JmsError::UnknownMessageType(v) if v == "object"));
    }

    #[test]
    fn non_string_type_attribute_is_rejected() {
        let err = decode_message(transport(
            "hello",
            &[(JMS_SQS_MESSAGE_TYPE, MessageAttributeValue::number(1))],
        ))
        .unwrap_err();
        assert!(matches!(err, JmsError::InvalidAttributeType { data_type, .. } if data_type == "Number"));
    }

    #[test]
    fn invalid_base64_is_rejected() {
        let err = decode_message(transport("not base64!", &[(JMS_SQS_MESSAGE_TYPE, s("byte"))])).unwrap_err();
        assert!(matches!(err, JmsError::InvalidBase64(_)));
    }

    #[test]
    fn partial_reply_to_is_dropped_when_lenient() {
        let message = decode_message(transport(
            "hello",
            &[
                (JMS_SQS_MESSAGE_TYPE, s("text")),
                (JMS_SQS_REPLY_TO_QUEUE_NAME, s("Q1")),
            ],
        ))
        .unwrap();
        assert_eq!(message.reply_to(), None);
        assert!(message.message_attributes().is_empty());
    }

    #[test]
    fn partial_reply_to_fails_when_strict() {
        let err = Decoder::new(ReplyToPolicy::Strict)
            .decode(transport(
                "hello",
                &[
                    (JMS_SQS_MESSAGE_TYPE, s("text")),
                    (JMS_SQS_REPLY_TO_QUEUE_URL, s("https://example/Q1")),
                ],
            ))
            .unwrap_err();
        assert!(
            matches!(err, JmsError::MalformedReplyTo(ref detail) if detail == "queue name missing, queue url present")
        );
    }

    #[test]
    fn batch_decode_is_all_or_nothing() {
        let ok = transport("a", &[(JMS_SQS_MESSAGE_TYPE, s("text"))]);
        let bad = transport("b", &[]);

        let decoded = decode_messages(vec![ok.clone(), ok.clone()]).unwrap();
        assert_eq!(decoded.len(), 2);

        let err = decode_messages(vec![ok, bad]).unwrap_err();
        assert!(matches!(err, JmsError::MissingMessageType { .. }));
    }
}
