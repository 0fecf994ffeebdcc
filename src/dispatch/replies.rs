//! Reply Senders
//!
//! One canned interactive message per menu action. Each sender issues exactly
//! one `send_message`; client errors go back to the caller untouched.

use crate::client::{MessagingClient, NativeFlowButton, OutboundContent};
use crate::config::RepliesConfig;
use crate::error::Result;
use serde::Serialize;

/// Values baked into the canned replies.
#[derive(Debug, Clone)]
pub struct ReplyCatalog {
    pub footer: String,
    pub call_phone: String,
    pub link_url: String,
    pub copy_code: String,
}

impl Default for ReplyCatalog {
    fn default() -> Self {
        Self::from_config(&RepliesConfig::default(), crate::config::DEFAULT_FOOTER)
    }
}

impl ReplyCatalog {
    pub fn from_config(replies: &RepliesConfig, footer: &str) -> Self {
        Self {
            footer: footer.to_string(),
            call_phone: replies.call_phone.clone(),
            link_url: replies.link_url.clone(),
            copy_code: replies.copy_code.clone(),
        }
    }

    fn single_button(&self, body: &str, button: NativeFlowButton) -> OutboundContent {
        OutboundContent {
            body: body.to_string(),
            footer: self.footer.clone(),
            buttons: vec![button],
        }
    }
}

#[derive(Serialize)]
struct CallParams<'a> {
    display_text: &'a str,
    phone_number: &'a str,
}

#[derive(Serialize)]
struct UrlParams<'a> {
    display_text: &'a str,
    url: &'a str,
    merchant_url: &'a str,
}

#[derive(Serialize)]
struct QuickReplyParams<'a> {
    display_text: &'a str,
    id: &'a str,
}

#[derive(Serialize)]
struct CopyParams<'a> {
    display_text: &'a str,
    copy_code: &'a str,
}

pub async fn handle_call_button(
    client: &dyn MessagingClient,
    catalog: &ReplyCatalog,
    conversation: &str,
) -> Result<()> {
    let params = serde_json::to_string(&CallParams {
        display_text: "Call Us",
        phone_number: &catalog.call_phone,
    })?;
    let content = catalog.single_button(
        "📞 Call Button example\nTap the button below to start a call.",
        NativeFlowButton::new("cta_call", params),
    );
    client.send_message(conversation, content).await?;
    tracing::info!("Reply: sent call button to {}", conversation);
    Ok(())
}

pub async fn handle_url_button(
    client: &dyn MessagingClient,
    catalog: &ReplyCatalog,
    conversation: &str,
) -> Result<()> {
    let params = serde_json::to_string(&UrlParams {
        display_text: "Open Link",
        url: &catalog.link_url,
        merchant_url: &catalog.link_url,
    })?;
    let content = catalog.single_button(
        "🌐 URL Button example\nTap the button below to open the link.",
        NativeFlowButton::new("cta_url", params),
    );
    client.send_message(conversation, content).await?;
    tracing::info!("Reply: sent url button to {}", conversation);
    Ok(())
}

pub async fn handle_quick_reply_button(
    client: &dyn MessagingClient,
    catalog: &ReplyCatalog,
    conversation: &str,
) -> Result<()> {
    // Not one of the menu tokens, so tapping it is acknowledged by the router as a no-op.
    let params = serde_json::to_string(&QuickReplyParams {
        display_text: "Got it!",
        id: "quick_ack",
    })?;
    let content = catalog.single_button(
        "⚡ Quick Reply Button example\nTap the button below to answer instantly.",
        NativeFlowButton::new("quick_reply", params),
    );
    client.send_message(conversation, content).await?;
    tracing::info!("Reply: sent quick reply button to {}", conversation);
    Ok(())
}

pub async fn handle_copy_button(
    client: &dyn MessagingClient,
    catalog: &ReplyCatalog,
    conversation: &str,
) -> Result<()> {
    let params = serde_json::to_string(&CopyParams {
        display_text: "Copy Code",
        copy_code: &catalog.copy_code,
    })?;
    let content = catalog.single_button(
        "📋 Copy Button example\nTap the button below to copy the code.",
        NativeFlowButton::new("cta_copy", params),
    );
    client.send_message(conversation, content).await?;
    tracing::info!("Reply: sent copy button to {}", conversation);
    Ok(())
}
