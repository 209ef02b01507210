//! JMS message protocol over an SQS-shaped transport.
//!
//! JMS metadata travels as four reserved String attributes (see [`constants`]);
//! byte bodies travel as base64 text. [`encode`] builds transport requests,
//! [`decode`] rebuilds [`JmsMessage`]s from what a receive call returns.

pub mod constants;
pub mod decode;
pub mod encode;
pub mod message;
pub mod outbound;
mod types;

pub use constants::required_receive_attribute_names;
pub use decode::{Decoder, decode_message, decode_messages};
pub use encode::{encode_batch, encode_message};
pub use message::{BytesMessage, JmsMessage, JmsProperties, TextMessage};
pub use outbound::{OutboundEntry, OutboundMessage};
pub use types::{Body, JmsMessageType, ReplyTo};
