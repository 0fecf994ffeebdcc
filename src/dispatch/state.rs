//! Conversation State Store
//!
//! Per-conversation menu step. Entries are overwritten on every transition
//! and live as long as the process; there is no capacity bound.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Step {
    /// No menu has been shown yet
    #[default]
    Start,
    /// The intro menu has been sent at least once
    MenuMain,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversationState {
    pub step: Step,
}

impl ConversationState {
    pub const fn at(step: Step) -> Self {
        Self { step }
    }
}

pub trait ConversationStore: Send + Sync {
    /// Current state, or `Step::Start` for a conversation never seen before.
    fn get(&self, conversation: &str) -> ConversationState;
    /// Replace the state for a conversation.
    fn set(&self, conversation: &str, state: ConversationState);
}

/// Process-lifetime store backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct InMemoryConversationStore {
    states: Mutex<HashMap<String, ConversationState>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, ConversationState>> {
        self.states.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ConversationStore for InMemoryConversationStore {
    fn get(&self, conversation: &str) -> ConversationState {
        self.lock().get(conversation).copied().unwrap_or_default()
    }

    fn set(&self, conversation: &str, state: ConversationState) {
        self.lock().insert(conversation.to_string(), state);
    }
}
