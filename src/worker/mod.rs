//! Echo responder Lambda handler

pub mod handler;

// Re-export the main handler for convenience
pub use handler::{EchoSummary, function_handler as handler, handle_event};
