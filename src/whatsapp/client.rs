//! `MessagingClient` over a live `whatsapp-rust` client handle.

use super::convert;
use crate::client::{MessagingClient, OutboundContent};
use crate::error::ClientError;
use async_trait::async_trait;
use std::sync::Arc;
use wacore_binary::jid::Jid;
use whatsapp_rust::client::Client;

pub struct WhatsAppClient {
    inner: Arc<Client>,
}

impl WhatsAppClient {
    pub fn new(inner: Arc<Client>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl MessagingClient for WhatsAppClient {
    async fn send_message(
        &self,
        conversation: &str,
        content: OutboundContent,
    ) -> Result<String, ClientError> {
        let jid: Jid = conversation
            .parse()
            .map_err(|_| ClientError::InvalidConversation(conversation.to_string()))?;

        self.inner
            .send_message(jid, convert::outbound_message(content))
            .await
            .map_err(|e| ClientError::Send(e.to_string()))
    }
}
