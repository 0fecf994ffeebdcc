//! Messaging Client Seam
//!
//! The outbound surface of the external WhatsApp library, reduced to the one
//! operation the dispatcher needs. Production code wraps `whatsapp-rust`;
//! tests use the generated `MockMessagingClient`.

use crate::error::ClientError;
use async_trait::async_trait;

/// A single native-flow button: a control type name plus its JSON-encoded parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeFlowButton {
    /// Control type, e.g. `single_select`, `cta_call`, `cta_url`, `quick_reply`, `cta_copy`
    pub name: String,
    /// JSON blob the client renders the control from
    pub params_json: String,
}

impl NativeFlowButton {
    pub fn new(name: impl Into<String>, params_json: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params_json: params_json.into(),
        }
    }
}

/// Content of one outbound message: body text with footer and one or more
/// native-flow controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundContent {
    pub body: String,
    pub footer: String,
    pub buttons: Vec<NativeFlowButton>,
}

impl OutboundContent {
    /// Names of the native-flow controls carried by this message.
    pub fn button_names(&self) -> Vec<&str> {
        self.buttons.iter().map(|b| b.name.as_str()).collect()
    }
}

/// Outbound half of the messaging library.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagingClient: Send + Sync {
    /// Send one message to a conversation. Returns the id the library assigned to it.
    async fn send_message(
        &self,
        conversation: &str,
        content: OutboundContent,
    ) -> Result<String, ClientError>;
}
