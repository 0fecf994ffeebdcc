use super::dedup::tests::ManualClock;
use super::*;
use crate::client::{MockMessagingClient, OutboundContent};
use crate::error::ClientError;
use crate::event::{MessageBody, Selection};
use std::time::Duration;

const CHAT: &str = "5511999887766@s.whatsapp.net";

struct Harness {
    dispatcher: Dispatcher,
    states: Arc<InMemoryConversationStore>,
    clock: ManualClock,
}

fn harness() -> Harness {
    let clock = ManualClock::new();
    let states = Arc::new(InMemoryConversationStore::new());
    let dispatcher = Dispatcher::new(
        Arc::new(ExpiringLedger::with_clock(dedup::DEFAULT_WINDOW, clock.clone())),
        states.clone(),
        ReplyCatalog::default(),
    );
    Harness {
        dispatcher,
        states,
        clock,
    }
}

fn is_menu(content: &OutboundContent) -> bool {
    content.button_names() == vec!["single_select"]
}

fn text_event(id: &str) -> InboundEvent {
    InboundEvent::new(id, CHAT, MessageBody::with_text("hi"))
}

fn action_event(id: &str, token: &str) -> InboundEvent {
    InboundEvent::new(
        id,
        CHAT,
        MessageBody::with_selection(Selection::NativeFlow {
            params_json: format!(r#"{{"id":"{token}"}}"#),
        }),
    )
}

#[tokio::test]
async fn test_fresh_conversation_gets_one_menu() {
    let h = harness();
    let mut client = MockMessagingClient::new();
    client
        .expect_send_message()
        .withf(|conv, content| conv == CHAT && is_menu(content))
        .times(1)
        .returning(|_, _| Ok("out-1".to_string()));

    let outcome = h.dispatcher.handle_event(&client, &text_event("m1")).await.unwrap();

    assert_eq!(outcome, Outcome::MenuPresented);
    assert_eq!(h.states.get(CHAT).step, Step::MenuMain);
}

#[tokio::test]
async fn test_menu_main_represents_menu() {
    let h = harness();
    h.states.set(CHAT, ConversationState::at(Step::MenuMain));

    let mut client = MockMessagingClient::new();
    client
        .expect_send_message()
        .withf(|_, content| is_menu(content))
        .times(2)
        .returning(|_, _| Ok("out".to_string()));

    for id in ["m1", "m2"] {
        let outcome = h.dispatcher.handle_event(&client, &text_event(id)).await.unwrap();
        assert_eq!(outcome, Outcome::MenuPresented);
    }
    assert_eq!(h.states.get(CHAT).step, Step::MenuMain);
}

#[tokio::test]
async fn test_action_routes_without_advancing_state() {
    let h = harness();
    let mut client = MockMessagingClient::new();
    client
        .expect_send_message()
        .withf(|_, content| content.button_names() == vec!["cta_copy"])
        .times(1)
        .returning(|_, _| Ok("out".to_string()));

    let outcome = h
        .dispatcher
        .handle_event(&client, &action_event("m1", "copy"))
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Routed(Some(Action::Copy)));
    assert!(h.states.is_empty());
}

#[tokio::test]
async fn test_unknown_action_sends_nothing() {
    let h = harness();
    let mut client = MockMessagingClient::new();
    client.expect_send_message().never();

    let outcome = h
        .dispatcher
        .handle_event(&client, &action_event("m1", "unknown"))
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Routed(None));
}

#[tokio::test]
async fn test_malformed_native_flow_falls_back_to_menu() {
    let h = harness();
    let mut client = MockMessagingClient::new();
    client
        .expect_send_message()
        .withf(|_, content| is_menu(content))
        .times(1)
        .returning(|_, _| Ok("out".to_string()));

    let event = InboundEvent::new(
        "m1",
        CHAT,
        MessageBody::with_selection(Selection::NativeFlow {
            params_json: "{broken".to_string(),
        }),
    );
    let outcome = h.dispatcher.handle_event(&client, &event).await.unwrap();

    assert_eq!(outcome, Outcome::MenuPresented);
}

#[tokio::test]
async fn test_duplicate_id_dispatched_once() {
    let h = harness();
    let mut client = MockMessagingClient::new();
    client
        .expect_send_message()
        .times(1)
        .returning(|_, _| Ok("out".to_string()));

    let event = action_event("dup", "call");
    let first = h.dispatcher.handle_event(&client, &event).await.unwrap();
    let second = h.dispatcher.handle_event(&client, &event).await.unwrap();

    assert_eq!(first, Outcome::Routed(Some(Action::Call)));
    assert_eq!(second, Outcome::Duplicate);
}

#[tokio::test]
async fn test_duplicate_id_accepted_after_window() {
    let h = harness();
    let mut client = MockMessagingClient::new();
    client
        .expect_send_message()
        .times(2)
        .returning(|_, _| Ok("out".to_string()));

    let event = action_event("dup", "url");
    h.dispatcher.handle_event(&client, &event).await.unwrap();
    h.clock.advance(Duration::from_secs(61));
    let again = h.dispatcher.handle_event(&client, &event).await.unwrap();

    assert_eq!(again, Outcome::Routed(Some(Action::Url)));
}

#[tokio::test]
async fn test_missing_id_or_body_is_ignored() {
    let h = harness();
    let mut client = MockMessagingClient::new();
    client.expect_send_message().never();

    let mut no_id = text_event("m1");
    no_id.id = None;
    let mut no_body = text_event("m2");
    no_body.body = None;

    assert_eq!(h.dispatcher.handle_event(&client, &no_id).await.unwrap(), Outcome::Ignored);
    assert_eq!(h.dispatcher.handle_event(&client, &no_body).await.unwrap(), Outcome::Ignored);
    assert!(h.states.is_empty());
}

#[tokio::test]
async fn test_send_failure_is_logged_not_propagated() {
    let h = harness();
    let mut client = MockMessagingClient::new();
    client
        .expect_send_message()
        .times(2)
        .returning(|_, _| Err(ClientError::Send("socket closed".to_string())));

    // Neither call panics or returns an error; the menu step is not recorded.
    h.dispatcher.on_inbound_event(&client, &text_event("m1")).await;
    h.dispatcher.on_inbound_event(&client, &action_event("m2", "quick")).await;

    assert_eq!(h.states.get(CHAT).step, Step::Start);
    assert!(h.states.is_empty());
}

#[tokio::test]
async fn test_upsert_processes_first_message_only() {
    let h = harness();
    let mut client = MockMessagingClient::new();
    client
        .expect_send_message()
        .withf(|_, content| content.button_names() == vec!["cta_call"])
        .times(1)
        .returning(|_, _| Ok("out".to_string()));

    let batch = [action_event("m1", "call"), action_event("m2", "url")];
    h.dispatcher.on_messages_upsert(&client, &batch).await;
}

#[tokio::test]
async fn test_upsert_skips_own_messages() {
    let h = harness();
    let mut client = MockMessagingClient::new();
    client.expect_send_message().never();

    let mut own = text_event("m1");
    own.from_me = true;
    h.dispatcher.on_messages_upsert(&client, &[own]).await;
    h.dispatcher.on_messages_upsert(&client, &[]).await;

    assert!(h.states.is_empty());
}

#[tokio::test]
async fn test_in_memory_dispatcher_routes_list_reply() {
    let dispatcher = Dispatcher::in_memory();
    let mut client = MockMessagingClient::new();
    client
        .expect_send_message()
        .withf(|_, content| content.button_names() == vec!["cta_url"])
        .times(1)
        .returning(|_, _| Ok("out".to_string()));

    let event = InboundEvent::new(
        "m1",
        CHAT,
        MessageBody::with_selection(Selection::List {
            selected_row_id: "url".to_string(),
        }),
    );
    let outcome = dispatcher.handle_event(&client, &event).await.unwrap();

    assert_eq!(outcome, Outcome::Routed(Some(Action::Url)));
}
