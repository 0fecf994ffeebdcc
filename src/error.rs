//! Error Types
//!
//! Errors surfaced by the messaging client seam and by the dispatcher.
//! Nothing here is fatal: the dispatcher entry point logs and moves on.

use thiserror::Error;

/// Failure reported by a [`MessagingClient`](crate::client::MessagingClient).
#[derive(Debug, Error)]
pub enum ClientError {
    /// The conversation id could not be turned into an address.
    #[error("invalid conversation id '{0}'")]
    InvalidConversation(String),

    /// The library rejected or failed to deliver the message.
    #[error("send failed: {0}")]
    Send(String),
}

/// Failure while handling a single inbound event.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Building the JSON parameters of an interactive control failed.
    #[error("failed to encode interactive parameters: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DispatchError>;
