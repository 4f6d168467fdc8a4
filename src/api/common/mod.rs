//! Common API utilities shared across versions

pub mod tracing;

use serde::Serialize;

/// Plain `{ "message": ... }` acknowledgement body
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
