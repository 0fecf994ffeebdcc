//! Inbound Event Model
//!
//! Library-independent view of what the WhatsApp client delivers: chat
//! messages (with the three historical "selected option" encodings) and
//! connection-state updates.

/// One of the payload shapes a client may use to say "the user picked option X".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Interactive native-flow response; the option lives inside a JSON blob.
    NativeFlow { params_json: String },
    /// List message response carrying the selected row id.
    List { selected_row_id: String },
    /// Legacy buttons message response.
    Buttons { selected_button_id: String },
}

/// Message content relevant to dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageBody {
    pub text: Option<String>,
    pub selections: Vec<Selection>,
}

impl MessageBody {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            selections: Vec::new(),
        }
    }

    pub fn with_selection(selection: Selection) -> Self {
        Self {
            text: None,
            selections: vec![selection],
        }
    }
}

/// A chat message as seen by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    /// Unique message id; events without one are ignored.
    pub id: Option<String>,
    /// Conversation (chat JID) the message belongs to.
    pub conversation: String,
    /// Authored by the account the bot runs as.
    pub from_me: bool,
    /// Events without a body (receipts, protocol stubs) are ignored.
    pub body: Option<MessageBody>,
}

impl InboundEvent {
    pub fn new(id: impl Into<String>, conversation: impl Into<String>, body: MessageBody) -> Self {
        Self {
            id: Some(id.into()),
            conversation: conversation.into(),
            from_me: false,
            body: Some(body),
        }
    }
}

/// Why the connection closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisconnectReason {
    /// The linked device was removed; the stored session is no longer valid.
    LoggedOut,
    /// Anything the library will recover from on its own.
    Transient(Option<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionUpdate {
    Open { user: Option<String> },
    Connecting,
    Close { reason: DisconnectReason },
}
