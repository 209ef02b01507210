//! JMS-aware facade over a [`QueueTransport`].
//!
//! Intercepts send, batch send and receive; every other transport capability
//! is reached through [`JmsClient::transport`].

use tracing::{debug, warn};

use crate::core::config::JmsConfig;
use crate::core::models::{
    ReceiveMessageRequest, SendMessageBatchRequest, SendMessageBatchResult, SendMessageResult,
};
use crate::errors::JmsError;
use crate::jms::{
    Body, Decoder, JmsMessage, JmsMessageType, OutboundEntry, OutboundMessage, encode_batch,
    encode_message, required_receive_attribute_names,
};
use crate::transport::QueueTransport;

pub struct JmsClient<T> {
    transport: T,
    config: JmsConfig,
    decoder: Decoder,
}

impl<T: QueueTransport> JmsClient<T> {
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, JmsConfig::default())
    }

    pub fn with_config(transport: T, config: JmsConfig) -> Self {
        let decoder = Decoder::from_config(&config);
        Self {
            transport,
            config,
            decoder,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    pub fn config(&self) -> &JmsConfig {
        &self.config
    }

    pub fn decoder(&self) -> &Decoder {
        &self.decoder
    }

    /// A view bound to one queue URL.
    pub fn queue(&self, queue_url: impl Into<String>) -> JmsQueue<'_, T> {
        JmsQueue {
            client: self,
            url: queue_url.into(),
        }
    }

    pub async fn send_bytes_message(
        &self,
        message: OutboundMessage,
    ) -> Result<SendMessageResult, JmsError> {
        self.send(JmsMessageType::Byte, message).await
    }

    pub async fn send_text_message(
        &self,
        message: OutboundMessage,
    ) -> Result<SendMessageResult, JmsError> {
        self.send(JmsMessageType::Text, message).await
    }

    /// Encode and send a batch. Nothing reaches the transport if any entry is invalid.
    pub async fn send_jms_message_batch(
        &self,
        queue_url: &str,
        entries: &[OutboundEntry],
    ) -> Result<SendMessageBatchResult, JmsError> {
        let entries = encode_batch(entries)?;
        debug!("Sending {} JMS entries to {}", entries.len(), queue_url);
        let result = self
            .transport
            .send_message_batch(SendMessageBatchRequest {
                queue_url: queue_url.to_string(),
                entries,
            })
            .await?;
        if !result.failed.is_empty() {
            warn!(
                "{} of {} JMS batch entries were rejected by {}",
                result.failed.len(),
                result.failed.len() + result.successful.len(),
                queue_url
            );
        }
        Ok(result)
    }

    /// Receive and decode. The reserved attributes are always requested.
    pub async fn receive_jms_messages(
        &self,
        mut request: ReceiveMessageRequest,
    ) -> Result<Vec<JmsMessage>, JmsError> {
        request.message_attribute_names =
            required_receive_attribute_names(&request.message_attribute_names);
        let messages = self.transport.receive_message(request).await?;
        debug!("Received {} messages", messages.len());
        self.decoder.decode_all(messages)
    }

    /// Answer `request` on its reply-to queue.
    ///
    /// The reply carries the request's correlation id, or its message id when
    /// it has none. A byte body is sent as a byte message, text as text.
    pub async fn reply_to(
        &self,
        request: &JmsMessage,
        body: Body,
    ) -> Result<SendMessageResult, JmsError> {
        let reply_to = request.reply_to().ok_or(JmsError::NoReplyDestination)?;
        let message_type = body.message_type();
        let mut reply = OutboundMessage::new(reply_to.queue_url.clone(), body);
        if let Some(correlation_id) = request.correlation_id().or(request.message_id()) {
            reply = reply.with_correlation_id(correlation_id);
        }
        self.send(message_type, reply).await
    }

    async fn send(
        &self,
        message_type: JmsMessageType,
        message: OutboundMessage,
    ) -> Result<SendMessageResult, JmsError> {
        let request = encode_message(message_type, message)?;
        debug!("Sending JMS {} message to {}", message_type, request.queue_url);
        self.transport.send_message(request).await
    }
}

/// A [`JmsClient`] bound to a single queue.
pub struct JmsQueue<'a, T> {
    client: &'a JmsClient<T>,
    url: String,
}

impl<T: QueueTransport> JmsQueue<'_, T> {
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Start a message addressed to this queue.
    pub fn message(&self, body: impl Into<Body>) -> OutboundMessage {
        OutboundMessage::new(self.url.clone(), body)
    }

    pub async fn send_bytes_message(
        &self,
        mut message: OutboundMessage,
    ) -> Result<SendMessageResult, JmsError> {
        message.queue_url.clone_from(&self.url);
        self.client.send_bytes_message(message).await
    }

    pub async fn send_text_message(
        &self,
        mut message: OutboundMessage,
    ) -> Result<SendMessageResult, JmsError> {
        message.queue_url.clone_from(&self.url);
        self.client.send_text_message(message).await
    }

    pub async fn send_jms_messages(
        &self,
        entries: &[OutboundEntry],
    ) -> Result<SendMessageBatchResult, JmsError> {
        self.client.send_jms_message_batch(&self.url, entries).await
    }

    /// Receive using the client's configured defaults.
    pub async fn receive_jms_messages(
        &self,
        max_number_of_messages: Option<i32>,
    ) -> Result<Vec<JmsMessage>, JmsError> {
        let config = self.client.config();
        let request = ReceiveMessageRequest {
            queue_url: self.url.clone(),
            message_attribute_names: config.message_attribute_names.clone(),
            max_number_of_messages: max_number_of_messages.or(config.receive_max_messages),
            wait_time_seconds: config.receive_wait_seconds,
            visibility_timeout: None,
        };
        self.client.receive_jms_messages(request).await
    }
}
