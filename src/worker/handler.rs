use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info};

use crate::client::JmsClient;
use crate::core::config::JmsConfig;
use crate::errors::JmsError;
use crate::lambda::decode_event;
use crate::transport::{QueueTransport, SqsTransport};

/// Outcome of handling one SQS event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EchoSummary {
    pub received: usize,
    pub replied: usize,
}

/// Lambda handler for the echo responder. Decodes the SQS event and answers
/// every message that names a reply-to queue.
pub async fn function_handler(event: LambdaEvent<Value>) -> Result<(), Error> {
    let config = JmsConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e)
    })?;
    let client = JmsClient::with_config(SqsTransport::from_env().await, config);

    let summary = handle_event(&client, &event.payload).await.map_err(|e| {
        error!("Failed to handle SQS event: {}", e);
        e
    })?;
    info!(
        "Handled {} JMS messages, sent {} replies",
        summary.received, summary.replied
    );
    Ok(())
}

/// Echo each request's body back to its reply-to queue.
///
/// # Errors
///
/// Fails on the first record that does not decode or whose reply cannot be sent,
/// so Lambda retries the whole event. Replies already sent for earlier records
/// are sent again on that retry.
pub async fn handle_event<T: QueueTransport>(
    client: &JmsClient<T>,
    payload: &Value,
) -> Result<EchoSummary, JmsError> {
    let messages = decode_event(client.decoder(), payload)?;
    let mut summary = EchoSummary {
        received: messages.len(),
        replied: 0,
    };

    for message in &messages {
        info!(
            "JMS {} message {:?} correlation={:?}",
            message.message_type(),
            message.message_id(),
            message.correlation_id()
        );
        let Some(reply_to) = message.reply_to() else {
            continue;
        };
        info!("Replying to {} at {}", reply_to.queue_name, reply_to.queue_url);
        client.reply_to(message, message.body()).await?;
        summary.replied += 1;
    }

    Ok(summary)
}
