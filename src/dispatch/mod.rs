//! Inbound Event Dispatcher
//!
//! Deduplicates chat messages, extracts the selected menu action and routes
//! it to a canned reply, or presents the intro menu when nothing was picked.
//! The dedup ledger and conversation store are injected as trait objects.

pub mod action;
pub mod dedup;
pub mod menu;
pub mod replies;
pub mod state;

#[cfg(test)]
mod tests;

pub use action::{Action, dispatch, extract_action_id};
pub use dedup::{Clock, DedupLedger, ExpiringLedger, TokioClock, spawn_sweeper};
pub use replies::ReplyCatalog;
pub use state::{ConversationState, ConversationStore, InMemoryConversationStore, Step};

use crate::client::MessagingClient;
use crate::error::Result;
use crate::event::InboundEvent;
use std::sync::Arc;

/// What happened to one inbound event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Missing id or body
    Ignored,
    /// Same id seen inside the dedup window
    Duplicate,
    /// An action id was found; `None` means it was not a known action
    Routed(Option<Action>),
    /// No action id; the intro menu was (re)sent
    MenuPresented,
}

pub struct Dispatcher {
    ledger: Arc<dyn DedupLedger>,
    states: Arc<dyn ConversationStore>,
    catalog: ReplyCatalog,
}

impl Dispatcher {
    pub fn new(
        ledger: Arc<dyn DedupLedger>,
        states: Arc<dyn ConversationStore>,
        catalog: ReplyCatalog,
    ) -> Self {
        Self {
            ledger,
            states,
            catalog,
        }
    }

    /// Dispatcher with in-memory stores and default replies.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(ExpiringLedger::new(dedup::DEFAULT_WINDOW)),
            Arc::new(InMemoryConversationStore::new()),
            ReplyCatalog::default(),
        )
    }

    /// Handle a batch delivered by the client: only the first message counts,
    /// and messages we authored ourselves are skipped.
    pub async fn on_messages_upsert(&self, client: &dyn MessagingClient, events: &[InboundEvent]) {
        let Some(event) = events.first() else {
            return;
        };
        if event.from_me {
            return;
        }
        self.on_inbound_event(client, event).await;
    }

    /// Entry point for one chat message. Errors are logged, never returned,
    /// so a bad event cannot stop processing of the next one.
    pub async fn on_inbound_event(&self, client: &dyn MessagingClient, event: &InboundEvent) {
        if let Err(e) = self.handle_event(client, event).await {
            tracing::error!(
                "Dispatcher: failed to handle message {} from {}: {}",
                event.id.as_deref().unwrap_or("<none>"),
                event.conversation,
                e
            );
        }
    }

    /// Process one event to completion and report what was done.
    pub async fn handle_event(
        &self,
        client: &dyn MessagingClient,
        event: &InboundEvent,
    ) -> Result<Outcome> {
        let (Some(id), Some(body)) = (event.id.as_deref(), event.body.as_ref()) else {
            return Ok(Outcome::Ignored);
        };

        if !self.ledger.admit(id) {
            tracing::debug!("Dispatcher: dropping duplicate message {}", id);
            return Ok(Outcome::Duplicate);
        }

        let from = event.conversation.as_str();

        if let Some(action_id) = extract_action_id(body) {
            tracing::info!("Dispatcher: action '{}' from {}", action_id, from);
            let ran = dispatch(client, &self.catalog, &action_id, from).await?;
            return Ok(Outcome::Routed(ran));
        }

        match self.states.get(from).step {
            Step::Start | Step::MenuMain => {
                menu::send_intro_menu(client, &self.catalog.footer, from).await?;
                self.states.set(from, ConversationState::at(Step::MenuMain));
                Ok(Outcome::MenuPresented)
            }
        }
    }
}
