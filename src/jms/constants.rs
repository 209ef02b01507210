//! Reserved message attribute names and receive-side attribute selection.
//!
//! The four `JMS_SQS*` names carry JMS metadata on the wire and are owned by
//! this crate: the encoder always writes them and the decoder always strips
//! them before handing attributes back to the caller.

/// Message type tag, `"byte"` or `"text"`.
pub const JMS_SQS_MESSAGE_TYPE: &str = "JMS_SQSMessageType";
pub const JMS_SQS_CORRELATION_ID: &str = "JMS_SQSCorrelationID";
pub const JMS_SQS_REPLY_TO_QUEUE_NAME: &str = "JMS_SQSReplyToQueueName";
pub const JMS_SQS_REPLY_TO_QUEUE_URL: &str = "JMS_SQSReplyToQueueURL";

pub const RESERVED_ATTRIBUTE_NAMES: [&str; 4] = [
    JMS_SQS_CORRELATION_ID,
    JMS_SQS_REPLY_TO_QUEUE_NAME,
    JMS_SQS_REPLY_TO_QUEUE_URL,
    JMS_SQS_MESSAGE_TYPE,
];

/// Keys of a logical reply-to map.
pub const QUEUE_NAME: &str = "QueueName";
pub const QUEUE_URL: &str = "QueueUrl";

/// Receive-side wildcards that already select every message attribute.
pub const ALL_ATTRIBUTES: &str = "All";
pub const ALL_ATTRIBUTES_PATTERN: &str = ".*";

#[must_use]
pub fn is_reserved(name: &str) -> bool {
    RESERVED_ATTRIBUTE_NAMES.contains(&name)
}

/// Widen a `MessageAttributeNames` selection so that the reserved attributes
/// are always returned by a receive call.
///
/// A selection containing `"All"` or `".*"` is returned unchanged. Otherwise the
/// result is the caller's names (deduplicated, original order) followed by any
/// reserved names not already present.
#[must_use]
pub fn required_receive_attribute_names(requested: &[String]) -> Vec<String> {
    if requested
        .iter()
        .any(|name| name == ALL_ATTRIBUTES || name == ALL_ATTRIBUTES_PATTERN)
    {
        return requested.to_vec();
    }

    let mut names: Vec<String> = Vec::with_capacity(requested.len() + RESERVED_ATTRIBUTE_NAMES.len());
    let reserved = RESERVED_ATTRIBUTE_NAMES.iter().map(|name| (*name).to_string());
    for name in requested.iter().cloned().chain(reserved) {
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}
