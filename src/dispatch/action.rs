//! Action Router
//!
//! Pulls the user's chosen option out of whichever payload shape the client
//! delivered, then routes known tokens to their reply sender.

use super::replies::{self, ReplyCatalog};
use crate::client::MessagingClient;
use crate::error::Result;
use crate::event::{MessageBody, Selection};
use serde_json::Value;

/// Actions the intro menu offers. The token is the row id sent in the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Call,
    Url,
    QuickReply,
    Copy,
}

impl Action {
    /// All actions in menu order.
    pub const ALL: [Action; 4] = [Action::Call, Action::Url, Action::QuickReply, Action::Copy];

    pub const fn token(self) -> &'static str {
        match self {
            Action::Call => "call",
            Action::Url => "url",
            Action::QuickReply => "quick",
            Action::Copy => "copy",
        }
    }

    /// Exact, case-sensitive match on the token. Anything else is `None`.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.token() == token)
    }
}

type Extractor = fn(&MessageBody) -> Option<String>;

/// Payload inspectors in priority order; the first non-empty result wins.
const EXTRACTORS: [Extractor; 3] = [from_native_flow, from_list, from_buttons];

/// Extract the selected option id from a message, if any.
pub fn extract_action_id(body: &MessageBody) -> Option<String> {
    EXTRACTORS.iter().find_map(|extract| extract(body))
}

fn from_native_flow(body: &MessageBody) -> Option<String> {
    body.selections.iter().find_map(|s| match s {
        Selection::NativeFlow { params_json } => parse_native_flow_id(params_json),
        _ => None,
    })
}

fn from_list(body: &MessageBody) -> Option<String> {
    body.selections.iter().find_map(|s| match s {
        Selection::List { selected_row_id } => non_empty(selected_row_id),
        _ => None,
    })
}

fn from_buttons(body: &MessageBody) -> Option<String> {
    body.selections.iter().find_map(|s| match s {
        Selection::Buttons { selected_button_id } => non_empty(selected_button_id),
        _ => None,
    })
}

/// Read `id` from native-flow parameters. Malformed JSON is logged and
/// treated as "no id here" so lower-priority shapes still get a look.
fn parse_native_flow_id(params_json: &str) -> Option<String> {
    if params_json.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(params_json) {
        Ok(params) => params.get("id").and_then(Value::as_str).and_then(non_empty),
        Err(e) => {
            tracing::warn!("Router: failed to parse native flow params: {}", e);
            None
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

/// Route an action id to its reply sender. Unknown ids are ignored.
/// Returns the action that ran, if any.
pub async fn dispatch(
    client: &dyn MessagingClient,
    catalog: &ReplyCatalog,
    action_id: &str,
    conversation: &str,
) -> Result<Option<Action>> {
    let Some(action) = Action::from_token(action_id) else {
        tracing::debug!("Router: ignoring unknown action '{}' from {}", action_id, conversation);
        return Ok(None);
    };

    match action {
        Action::Call => replies::handle_call_button(client, catalog, conversation).await?,
        Action::Url => replies::handle_url_button(client, catalog, conversation).await?,
        Action::QuickReply => {
            replies::handle_quick_reply_button(client, catalog, conversation).await?
        }
        Action::Copy => replies::handle_copy_button(client, catalog, conversation).await?,
    }

    Ok(Some(action))
}
