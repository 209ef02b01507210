//! Queue transports the JMS layer sends through.
//!
//! Only the three operations the JMS layer intercepts are part of the trait.
//! Everything else a concrete transport offers stays reachable through its own
//! accessor (for example [`SqsTransport::client`]).

use async_trait::async_trait;

use crate::core::models::{
    ReceiveMessageRequest, SendMessageBatchRequest, SendMessageBatchResult, SendMessageRequest,
    SendMessageResult, TransportMessage,
};
use crate::errors::JmsError;

pub mod memory;
pub mod sqs;

pub use memory::InMemoryTransport;
pub use sqs::SqsTransport;

/// Upper bound SQS places on entries per batch and messages per receive.
pub const MAX_BATCH_SIZE: usize = 10;

#[async_trait]
pub trait QueueTransport: Send + Sync {
    async fn send_message(&self, request: SendMessageRequest)
    -> Result<SendMessageResult, JmsError>;

    async fn send_message_batch(
        &self,
        request: SendMessageBatchRequest,
    ) -> Result<SendMessageBatchResult, JmsError>;

    async fn receive_message(
        &self,
        request: ReceiveMessageRequest,
    ) -> Result<Vec<TransportMessage>, JmsError>;
}

#[async_trait]
impl<T: QueueTransport + ?Sized> QueueTransport for std::sync::Arc<T> {
    async fn send_message(
        &self,
        request: SendMessageRequest,
    ) -> Result<SendMessageResult, JmsError> {
        (**self).send_message(request).await
    }

    async fn send_message_batch(
        &self,
        request: SendMessageBatchRequest,
    ) -> Result<SendMessageBatchResult, JmsError> {
        (**self).send_message_batch(request).await
    }

    async fn receive_message(
        &self,
        request: ReceiveMessageRequest,
    ) -> Result<Vec<TransportMessage>, JmsError> {
        (**self).receive_message(request).await
    }
}
