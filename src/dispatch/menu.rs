//! Menu Presenter
//!
//! Builds the intro message: one `single_select` control whose row ids are
//! exactly the action tokens the router understands.

use super::action::Action;
use crate::client::{MessagingClient, NativeFlowButton, OutboundContent};
use crate::error::Result;
use serde::Serialize;

pub const INTRO_TEXT: &str = "🤖 Hello!\nChoose an option from the menu below:";

#[derive(Debug, Serialize)]
struct SingleSelect<'a> {
    title: &'a str,
    sections: Vec<Section<'a>>,
}

#[derive(Debug, Serialize)]
struct Section<'a> {
    title: &'a str,
    rows: Vec<Row<'a>>,
}

#[derive(Debug, Serialize)]
struct Row<'a> {
    title: &'a str,
    description: &'a str,
    id: &'a str,
}

fn row(action: Action) -> Row<'static> {
    let (title, description) = match action {
        Action::Call => ("Call Button", "Example: Call Button"),
        Action::Url => ("URL Button", "Example: URL Button"),
        Action::QuickReply => ("Quick Reply Button", "Example: Quick Reply Button"),
        Action::Copy => ("Copy Button", "Example: Copy Button"),
    };
    Row {
        title,
        description,
        id: action.token(),
    }
}

/// The intro menu content with the given footer.
pub fn intro_menu(footer: &str) -> Result<OutboundContent> {
    let params = serde_json::to_string(&SingleSelect {
        title: "Menu",
        sections: vec![Section {
            title: "Available Features",
            rows: Action::ALL.into_iter().map(row).collect(),
        }],
    })?;

    Ok(OutboundContent {
        body: INTRO_TEXT.to_string(),
        footer: footer.to_string(),
        buttons: vec![NativeFlowButton::new("single_select", params)],
    })
}

pub async fn send_intro_menu(
    client: &dyn MessagingClient,
    footer: &str,
    conversation: &str,
) -> Result<()> {
    let content = intro_menu(footer)?;
    client.send_message(conversation, content).await?;
    tracing::info!("Menu: sent intro menu to {}", conversation);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_menu_rows_are_action_tokens() {
        let content = intro_menu("footer").unwrap();
        let OutboundContent { body, footer, buttons } = content;
        assert_eq!(body, INTRO_TEXT);
        assert_eq!(footer, "footer");
        assert_eq!(buttons.len(), 1);
        assert_eq!(buttons[0].name, "single_select");

        let params: Value = serde_json::from_str(&buttons[0].params_json).unwrap();
        let ids: Vec<&str> = params["sections"][0]["rows"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["call", "url", "quick", "copy"]);
    }

    #[test]
    fn test_menu_rows_have_title_and_description() {
        let buttons = intro_menu("f").unwrap().buttons;
        let params: Value = serde_json::from_str(&buttons[0].params_json).unwrap();
        assert_eq!(params["title"], "Menu");
        for r in params["sections"][0]["rows"].as_array().unwrap() {
            assert!(r["title"].as_str().is_some_and(|t| !t.is_empty()));
            assert!(r["description"].as_str().is_some_and(|d| d.starts_with("Example: ")));
        }
    }
}
