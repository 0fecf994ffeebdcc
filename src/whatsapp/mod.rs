//! WhatsApp Integration
//!
//! Runs the `whatsapp-rust` bot, converting its events into dispatcher
//! events and its client handle into a [`MessagingClient`](crate::client::MessagingClient).

mod agent;
mod client;
mod convert;

pub use agent::WhatsAppAgent;
pub use client::WhatsAppClient;
pub use convert::{inbound_event, outbound_message};
