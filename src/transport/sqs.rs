//! Amazon SQS transport backed by `aws-sdk-sqs`.

use async_trait::async_trait;
use aws_sdk_sqs::Client as SqsClient;
use aws_sdk_sqs::primitives::Blob;
use aws_sdk_sqs::types::{
    Message, MessageAttributeValue as SdkAttributeValue, SendMessageBatchRequestEntry,
};
use std::collections::HashMap;
use tracing::debug;

use super::QueueTransport;
use crate::core::models::{
    BatchRequestEntry, BatchResultEntry, BatchResultErrorEntry, MessageAttributeValue,
    MessageAttributes, ReceiveMessageRequest, SendMessageBatchRequest, SendMessageBatchResult,
    SendMessageRequest, SendMessageResult, TransportMessage,
};
use crate::errors::JmsError;

#[derive(Debug, Clone)]
pub struct SqsTransport {
    client: SqsClient,
}

impl SqsTransport {
    #[must_use]
    pub fn new(client: SqsClient) -> Self {
        Self { client }
    }

    /// Build a client from the standard AWS environment (region, credentials).
    pub async fn from_env() -> Self {
        let shared_config = aws_config::from_env().load().await;
        Self::new(SqsClient::new(&shared_config))
    }

    /// The underlying SDK client, for every SQS operation not wrapped here.
    #[must_use]
    pub fn client(&self) -> &SqsClient {
        &self.client
    }
}

#[async_trait]
impl QueueTransport for SqsTransport {
    async fn send_message(
        &self,
        request: SendMessageRequest,
    ) -> Result<SendMessageResult, JmsError> {
        debug!("SQS SendMessage to {}", request.queue_url);
        let output = self
            .client
            .send_message()
            .queue_url(request.queue_url)
            .message_body(request.message_body)
            .set_message_attributes(to_sdk_attributes(&request.message_attributes)?)
            .set_delay_seconds(request.delay_seconds)
            .set_message_group_id(request.message_group_id)
            .set_message_deduplication_id(request.message_deduplication_id)
            .send()
            .await
            .map_err(|e| JmsError::Transport(format!("Failed to send message to SQS: {e}")))?;

        Ok(SendMessageResult {
            message_id: output.message_id().map(str::to_string),
            md5_of_message_body: output.md5_of_message_body().map(str::to_string),
            sequence_number: output.sequence_number().map(str::to_string),
        })
    }

    async fn send_message_batch(
        &self,
        request: SendMessageBatchRequest,
    ) -> Result<SendMessageBatchResult, JmsError> {
        debug!(
            "SQS SendMessageBatch of {} entries to {}",
            request.entries.len(),
            request.queue_url
        );
        let entries = request
            .entries
            .iter()
            .map(to_sdk_entry)
            .collect::<Result<Vec<_>, _>>()?;

        let output = self
            .client
            .send_message_batch()
            .queue_url(request.queue_url)
            .set_entries(Some(entries))
            .send()
            .await
            .map_err(|e| JmsError::Transport(format!("Failed to send message batch to SQS: {e}")))?;

        Ok(SendMessageBatchResult {
            successful: output
                .successful()
                .iter()
                .map(|entry| BatchResultEntry {
                    id: entry.id().to_string(),
                    message_id: entry.message_id().to_string(),
                })
                .collect(),
            failed: output
                .failed()
                .iter()
                .map(|entry| BatchResultErrorEntry {
                    id: entry.id().to_string(),
                    code: entry.code().to_string(),
                    message: entry.message().map(str::to_string),
                    sender_fault: entry.sender_fault(),
                })
                .collect(),
        })
    }

    async fn receive_message(
        &self,
        request: ReceiveMessageRequest,
    ) -> Result<Vec<TransportMessage>, JmsError> {
        debug!(
            "SQS ReceiveMessage from {} with attributes {:?}",
            request.queue_url, request.message_attribute_names
        );
        let output = self
            .client
            .receive_message()
            .queue_url(request.queue_url)
            .set_message_attribute_names(Some(request.message_attribute_names))
            .set_max_number_of_messages(request.max_number_of_messages)
            .set_wait_time_seconds(request.wait_time_seconds)
            .set_visibility_timeout(request.visibility_timeout)
            .send()
            .await
            .map_err(|e| JmsError::Transport(format!("Failed to receive messages from SQS: {e}")))?;

        Ok(output.messages().iter().map(from_sdk_message).collect())
    }
}

fn to_sdk_attributes(
    attributes: &MessageAttributes,
) -> Result<Option<HashMap<String, SdkAttributeValue>>, JmsError> {
    if attributes.is_empty() {
        return Ok(None);
    }
    attributes
        .iter()
        .map(|(name, value)| Ok((name.clone(), to_sdk_attribute(value)?)))
        .collect::<Result<HashMap<_, _>, JmsError>>()
        .map(Some)
}

fn to_sdk_attribute(value: &MessageAttributeValue) -> Result<SdkAttributeValue, JmsError> {
    SdkAttributeValue::builder()
        .data_type(value.data_type.clone())
        .set_string_value(value.string_value.clone())
        .set_binary_value(value.binary_value.clone().map(Blob::new))
        .build()
        .map_err(|e| JmsError::Transport(format!("Invalid message attribute: {e}")))
}

fn to_sdk_entry(entry: &BatchRequestEntry) -> Result<SendMessageBatchRequestEntry, JmsError> {
    SendMessageBatchRequestEntry::builder()
        .id(entry.id.clone())
        .message_body(entry.message_body.clone())
        .set_message_attributes(to_sdk_attributes(&entry.message_attributes)?)
        .set_delay_seconds(entry.delay_seconds)
        .set_message_group_id(entry.message_group_id.clone())
        .set_message_deduplication_id(entry.message_deduplication_id.clone())
        .build()
        .map_err(|e| JmsError::Transport(format!("Invalid batch entry {}: {e}", entry.id)))
}

fn from_sdk_attribute(value: &SdkAttributeValue) -> MessageAttributeValue {
    MessageAttributeValue {
        data_type: value.data_type().to_string(),
        string_value: value.string_value().map(str::to_string),
        binary_value: value.binary_value().map(|blob| blob.as_ref().to_vec()),
    }
}

fn from_sdk_message(message: &Message) -> TransportMessage {
    TransportMessage {
        message_id: message.message_id().map(str::to_string),
        receipt_handle: message.receipt_handle().map(str::to_string),
        body: message.body().unwrap_or_default().to_string(),
        md5_of_body: message.md5_of_body().map(str::to_string),
        attributes: message
            .attributes()
            .map(|attributes| {
                attributes
                    .iter()
                    .map(|(name, value)| (name.as_str().to_string(), value.clone()))
                    .collect()
            })
            .unwrap_or_default(),
        message_attributes: message
            .message_attributes()
            .map(|attributes| {
                attributes
                    .iter()
                    .map(|(name, value)| (name.clone(), from_sdk_attribute(value)))
                    .collect()
            })
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sdk_attribute_conversion_keeps_values() {
        let value = MessageAttributeValue::string("text");
        let sdk = to_sdk_attribute(&value).unwrap();
        assert_eq!(sdk.data_type(), "String");
        assert_eq!(sdk.string_value(), Some("text"));
        assert_eq!(from_sdk_attribute(&sdk), value);
    }

    #[test]
    fn sdk_message_conversion() {
        let message = Message::builder()
            .message_id("m-1")
            .receipt_handle("rh-1")
            .body("aGk=")
            .message_attributes(
                "JMS_SQSMessageType",
                SdkAttributeValue::builder()
                    .data_type("String")
                    .string_value("byte")
                    .build()
                    .unwrap(),
            )
            .build();

        let converted = from_sdk_message(&message);
        assert_eq!(converted.message_id.as_deref(), Some("m-1"));
        assert_eq!(converted.body, "aGk=");
        assert_eq!(
            converted.message_attributes["JMS_SQSMessageType"].as_string(),
            Some("byte")
        );
    }

    #[test]
    fn empty_attribute_maps_are_omitted() {
        assert!(to_sdk_attributes(&MessageAttributes::new()).unwrap().is_none());
    }
}
