use thiserror::Error;

#[derive(Debug, Error)]
pub enum JmsError {
    #[error("JMSMessageType must be byte or text (entry {}): {value}", .entry_id.as_deref().unwrap_or("-"))]
    InvalidMessageType {
        entry_id: Option<String>,
        value: String,
    },

    #[error("Unknown JMS message type: {0}")]
    UnknownMessageType(String),

    #[error("MessageBody must be bytes: {0}")]
    InvalidBodyType(String),

    #[error("JMSReplyTo must be a map containing QueueName and QueueUrl: {0}")]
    InvalidReplyTo(String),

    #[error("JMSCorrelationId must be a string: {0}")]
    InvalidCorrelationId(String),

    #[error("Message missing attribute JMS_SQSMessageType (entry {})", .entry_id.as_deref().unwrap_or("-"))]
    MissingMessageType { entry_id: Option<String> },

    #[error("Message carries only one of the reply-to attributes: {0}")]
    MalformedReplyTo(String),

    #[error("Attribute {name} must have DataType String, found {data_type}")]
    InvalidAttributeType { name: String, data_type: String },

    #[error("Failed to decode base64 message body: {0}")]
    InvalidBase64(String),

    #[error("Message has no reply-to destination")]
    NoReplyDestination,

    #[error("Failed to interact with the queue transport: {0}")]
    Transport(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to parse SQS event: {0}")]
    Event(String),
}

impl From<base64::DecodeError> for JmsError {
    fn from(error: base64::DecodeError) -> Self {
        JmsError::InvalidBase64(error.to_string())
    }
}

impl From<serde_json::Error> for JmsError {
    fn from(error: serde_json::Error) -> Self {
        JmsError::Event(error.to_string())
    }
}

// Generic implementation for AWS SDK errors
impl<E, R> From<aws_sdk_sqs::error::SdkError<E, R>> for JmsError
where
    E: std::fmt::Display,
    R: std::fmt::Debug,
{
    fn from(error: aws_sdk_sqs::error::SdkError<E, R>) -> Self {
        JmsError::Transport(error.to_string())
    }
}
