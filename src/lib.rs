//! sqs-jms - JMS message semantics carried over Amazon SQS.
//!
//! SQS only knows string bodies and flat typed attributes. This crate layers
//! the JMS notions of a typed payload (byte or text), a correlation id and a
//! reply-to destination on top, using the same reserved attribute names as the
//! Amazon SQS Java Messaging Library so that Java JMS clients interoperate.
//!
//! # Architecture
//!
//! - `jms` holds the wire protocol: reserved attributes, encoder and decoder
//! - `transport` abstracts the queue (Amazon SQS or an in-memory double)
//! - `client` is the JMS-aware facade callers use
//! - `lambda` and `worker` consume SQS-triggered Lambda events
//!
//! # Example
//!
//! ```
//! use sqs_jms::client::JmsClient;
//! use sqs_jms::jms::ReplyTo;
//! use sqs_jms::transport::InMemoryTransport;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), sqs_jms::JmsError> {
//! let client = JmsClient::new(InMemoryTransport::new());
//! let queue = client.queue("https://sqs.us-east-1.amazonaws.com/123456789012/requests");
//!
//! queue
//!     .send_text_message(
//!         queue
//!             .message("hello")
//!             .with_correlation_id("abc123")
//!             .with_reply_to(ReplyTo::new("replies", "https://example/replies")),
//!     )
//!     .await?;
//!
//! let received = queue.receive_jms_messages(Some(10)).await?;
//! assert_eq!(received[0].text(), Some("hello"));
//! assert_eq!(received[0].correlation_id(), Some("abc123"));
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod core;
pub mod errors;
pub mod jms;
pub mod lambda;
pub mod transport;
pub mod worker;

pub use client::{JmsClient, JmsQueue};
pub use errors::JmsError;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// This function sets up tracing-subscriber with a JSON formatter suitable for
/// `CloudWatch` Logs integration. It should be called once at start-up.
///
/// # Example
///
/// ```
/// sqs_jms::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    tracing_subscriber::registry().with(fmt_layer).init();
}
