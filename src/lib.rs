//! Wabase Bot
//!
//! Interactive WhatsApp menu bot. Inbound chat messages are deduplicated,
//! checked for a selected menu option and answered with a canned button
//! reply; anything else gets the intro menu.

pub mod client;
pub mod config;
pub mod connection;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod logging;

#[cfg(feature = "whatsapp")]
pub mod whatsapp;

pub use client::{MessagingClient, NativeFlowButton, OutboundContent};
pub use dispatch::{Dispatcher, Outcome};
pub use error::{ClientError, DispatchError};
pub use event::{ConnectionUpdate, DisconnectReason, InboundEvent, MessageBody, Selection};
