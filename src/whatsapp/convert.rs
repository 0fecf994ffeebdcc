//! Conversions between `waproto` messages and the dispatcher's event model.

use crate::client::OutboundContent;
use crate::event::{InboundEvent, MessageBody, Selection};
use wacore::types::message::MessageInfo;
use waproto::whatsapp as wa;
use waproto::whatsapp::message::interactive_message;
use waproto::whatsapp::message::interactive_response_message;

/// Build an [`InboundEvent`] from a library message event.
pub fn inbound_event(msg: &wa::Message, info: &MessageInfo) -> InboundEvent {
    InboundEvent {
        id: (!info.id.is_empty()).then(|| info.id.clone()),
        conversation: info.source.chat.to_string(),
        from_me: info.source.is_from_me,
        body: message_body(unwrap_message(msg)),
    }
}

/// Strip device-sent, ephemeral and view-once wrappers.
fn unwrap_message(msg: &wa::Message) -> &wa::Message {
    msg.device_sent_message
        .as_ref()
        .and_then(|d| d.message.as_deref())
        .or_else(|| {
            msg.ephemeral_message
                .as_ref()
                .and_then(|e| e.message.as_deref())
        })
        .or_else(|| {
            msg.view_once_message
                .as_ref()
                .and_then(|v| v.message.as_deref())
        })
        .unwrap_or(msg)
}

fn message_body(msg: &wa::Message) -> Option<MessageBody> {
    if *msg == wa::Message::default() {
        return None;
    }

    let text = msg.conversation.clone().or_else(|| {
        msg.extended_text_message
            .as_ref()
            .and_then(|e| e.text.clone())
    });

    let mut selections = Vec::new();

    if let Some(response) = &msg.interactive_response_message
        && let Some(interactive_response_message::InteractiveResponseMessage::NativeFlowResponseMessage(flow)) =
            &response.interactive_response_message
        && let Some(params_json) = &flow.params_json
    {
        selections.push(Selection::NativeFlow {
            params_json: params_json.clone(),
        });
    }

    if let Some(list) = &msg.list_response_message
        && let Some(reply) = &list.single_select_reply
        && let Some(row_id) = &reply.selected_row_id
    {
        selections.push(Selection::List {
            selected_row_id: row_id.clone(),
        });
    }

    if let Some(buttons) = &msg.buttons_response_message
        && let Some(button_id) = &buttons.selected_button_id
    {
        selections.push(Selection::Buttons {
            selected_button_id: button_id.clone(),
        });
    }

    Some(MessageBody { text, selections })
}

/// Build the protocol message for an outbound content value.
pub fn outbound_message(content: OutboundContent) -> wa::Message {
    let OutboundContent {
        body,
        footer,
        buttons,
    } = content;

    let native_flow = interactive_message::NativeFlowMessage {
        buttons: buttons
            .into_iter()
            .map(|b| interactive_message::native_flow_message::NativeFlowButton {
                name: Some(b.name),
                button_params_json: Some(b.params_json),
            })
            .collect(),
        message_version: Some(1),
        ..Default::default()
    };

    wa::Message {
        interactive_message: Some(Box::new(wa::message::InteractiveMessage {
            body: Some(interactive_message::Body { text: Some(body) }),
            footer: Some(Box::new(interactive_message::Footer {
                text: Some(footer),
                ..Default::default()
            })),
            interactive_message: Some(interactive_message::InteractiveMessage::NativeFlowMessage(
                native_flow,
            )),
            ..Default::default()
        })),
        ..Default::default()
    }
}
