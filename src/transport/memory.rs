//! In-memory test double for [`QueueTransport`].
//!
//! Each queue URL maps to a FIFO of messages. Received messages are removed
//! immediately; there is no visibility timeout or redelivery.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use super::{MAX_BATCH_SIZE, QueueTransport};
use crate::core::models::{
    BatchResultEntry, MessageAttributes, ReceiveMessageRequest, SendMessageBatchRequest,
    SendMessageBatchResult, SendMessageRequest, SendMessageResult, TransportMessage,
};
use crate::errors::JmsError;
use crate::jms::constants::{ALL_ATTRIBUTES, ALL_ATTRIBUTES_PATTERN};

#[derive(Debug, Default)]
pub struct InMemoryTransport {
    queues: Mutex<HashMap<String, VecDeque<TransportMessage>>>,
}

impl InMemoryTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a raw transport message, bypassing any encoding.
    pub fn push(&self, queue_url: &str, message: TransportMessage) {
        self.lock()
            .entry(queue_url.to_string())
            .or_default()
            .push_back(message);
    }

    /// Messages currently waiting on `queue_url`, oldest first.
    #[must_use]
    pub fn peek(&self, queue_url: &str) -> Vec<TransportMessage> {
        self.lock()
            .get(queue_url)
            .map(|queue| queue.iter().cloned().collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn depth(&self, queue_url: &str) -> usize {
        self.lock().get(queue_url).map_or(0, VecDeque::len)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, VecDeque<TransportMessage>>> {
        // A poisoned lock only means another test panicked mid-push.
        self.queues
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn enqueue(&self, queue_url: &str, body: String, message_attributes: MessageAttributes) -> String {
        let message_id = Uuid::new_v4().to_string();
        self.push(
            queue_url,
            TransportMessage {
                message_id: Some(message_id.clone()),
                receipt_handle: Some(Uuid::new_v4().to_string()),
                body,
                md5_of_body: None,
                attributes: HashMap::new(),
                message_attributes,
            },
        );
        message_id
    }
}

#[async_trait]
impl QueueTransport for InMemoryTransport {
    async fn send_message(
        &self,
        request: SendMessageRequest,
    ) -> Result<SendMessageResult, JmsError> {
        let message_id = self.enqueue(
            &request.queue_url,
            request.message_body,
            request.message_attributes,
        );
        Ok(SendMessageResult {
            message_id: Some(message_id),
            ..SendMessageResult::default()
        })
    }

    async fn send_message_batch(
        &self,
        request: SendMessageBatchRequest,
    ) -> Result<SendMessageBatchResult, JmsError> {
        if request.entries.is_empty() {
            return Err(JmsError::Transport("EmptyBatchRequest".to_string()));
        }
        if request.entries.len() > MAX_BATCH_SIZE {
            return Err(JmsError::Transport("TooManyEntriesInBatchRequest".to_string()));
        }
        let mut ids = HashSet::new();
        if !request.entries.iter().all(|e| ids.insert(e.id.as_str())) {
            return Err(JmsError::Transport("BatchEntryIdsNotDistinct".to_string()));
        }

        let successful = request
            .entries
            .into_iter()
            .map(|entry| {
                let message_id =
                    self.enqueue(&request.queue_url, entry.message_body, entry.message_attributes);
                BatchResultEntry {
                    id: entry.id,
                    message_id,
                }
            })
            .collect();

        Ok(SendMessageBatchResult {
            successful,
            failed: Vec::new(),
        })
    }

    async fn receive_message(
        &self,
        request: ReceiveMessageRequest,
    ) -> Result<Vec<TransportMessage>, JmsError> {
        let max = usize::try_from(request.max_number_of_messages.unwrap_or(1))
            .unwrap_or(1)
            .clamp(1, MAX_BATCH_SIZE);

        let mut queues = self.lock();
        let Some(queue) = queues.get_mut(&request.queue_url) else {
            return Ok(Vec::new());
        };
        let count = max.min(queue.len());
        Ok(queue
            .drain(..count)
            .map(|mut message| {
                message
                    .message_attributes
                    .retain(|name, _| selected(&request.message_attribute_names, name));
                message
            })
            .collect())
    }
}

/// SQS attribute-name selection: exact names, `All`, `.*` and `prefix.*`.
fn selected(requested: &[String], name: &str) -> bool {
    requested.iter().any(|pattern| {
        pattern == ALL_ATTRIBUTES
            || pattern == ALL_ATTRIBUTES_PATTERN
            || pattern == name
            || pattern
                .strip_suffix(".*")
                .is_some_and(|prefix| name.starts_with(prefix))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{BatchRequestEntry, MessageAttributeValue};

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn attribute_selection_patterns() {
        assert!(selected(&names(&["All"]), "anything"));
        assert!(selected(&names(&[".*"]), "anything"));
        assert!(selected(&names(&["JMS_SQS.*"]), "JMS_SQSMessageType"));
        assert!(selected(&names(&["tenant"]), "tenant"));
        assert!(!selected(&names(&["tenant"]), "trace"));
        assert!(!selected(&[], "tenant"));
    }

    #[tokio::test]
    async fn receive_filters_attributes_and_respects_max() {
        let transport = InMemoryTransport::new();
        for body in ["one", "two", "three"] {
            let mut attributes = MessageAttributes::new();
            attributes.insert("tenant".to_string(), MessageAttributeValue::string("acme"));
            attributes.insert("trace".to_string(), MessageAttributeValue::string("t"));
            transport
                .send_message(SendMessageRequest {
                    queue_url: "q".to_string(),
                    message_body: body.to_string(),
                    message_attributes: attributes,
                    ..SendMessageRequest::default()
                })
                .await
                .unwrap();
        }

        let mut request = ReceiveMessageRequest::new("q");
        request.message_attribute_names = names(&["tenant"]);
        request.max_number_of_messages = Some(2);
        let received = transport.receive_message(request).await.unwrap();

        assert_eq!(received.len(), 2);
        assert_eq!(received[0].body, "one");
        assert_eq!(received[1].body, "two");
        assert_eq!(received[0].message_attributes.len(), 1);
        assert!(received[0].message_attributes.contains_key("tenant"));
        assert_eq!(transport.depth("q"), 1);
    }

    #[tokio::test]
    async fn batch_rejects_duplicate_ids() {
        let transport = InMemoryTransport::new();
        let entry = BatchRequestEntry {
            id: "dup".to_string(),
            message_body: "x".to_string(),
            ..BatchRequestEntry::default()
        };
        let err = transport
            .send_message_batch(SendMessageBatchRequest {
                queue_url: "q".to_string(),
                entries: vec![entry.clone(), entry],
            })
            .await
            .unwrap_err();

        assert!(matches!(err, JmsError::Transport(ref code) if code == "BatchEntryIdsNotDistinct"));
        assert_eq!(transport.depth("q"), 0);
    }
}
