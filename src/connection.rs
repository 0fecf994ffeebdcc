//! Connection Reporting
//!
//! Turns connection-state updates into operator-facing log lines. Reconnects
//! are the library's job; the only decision made here is whether the stored
//! session is still usable.

use crate::event::{ConnectionUpdate, DisconnectReason};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
    /// Keep running; the library handles reconnects.
    Continue,
    /// The device was unlinked. Restarting with the same session will not help.
    LoggedOut,
}

pub fn report_connection(update: &ConnectionUpdate) -> LinkStatus {
    match update {
        ConnectionUpdate::Open { user } => {
            tracing::info!(
                "WhatsApp: connected (user: {})",
                user.as_deref().unwrap_or("unknown")
            );
            LinkStatus::Continue
        }
        ConnectionUpdate::Connecting => {
            tracing::debug!("WhatsApp: connecting");
            LinkStatus::Continue
        }
        ConnectionUpdate::Close {
            reason: DisconnectReason::LoggedOut,
        } => {
            tracing::error!("WhatsApp: logged out. Delete the session folder and restart.");
            LinkStatus::LoggedOut
        }
        ConnectionUpdate::Close {
            reason: DisconnectReason::Transient(detail),
        } => {
            match detail {
                Some(d) => tracing::warn!("WhatsApp: connection closed ({}), waiting for auto reconnect", d),
                None => tracing::warn!("WhatsApp: connection closed, waiting for auto reconnect"),
            }
            LinkStatus::Continue
        }
    }
}
