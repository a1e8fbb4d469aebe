//! End-to-end flows through the controller against a scripted backend.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use taleforge_client::controller::Confirmation;
use taleforge_client::infrastructure::MemoryStorage;
use taleforge_client::ports::outbound::ScriptedApi;
use taleforge_client::presentation::{character_list, RenderedList};
use taleforge_client::state::View;
use taleforge_client::AppController;
use taleforge_domain::{CharacterId, ChatId};

fn controller(api: &ScriptedApi) -> AppController {
    AppController::new(Arc::new(api.clone()), Arc::new(MemoryStorage::new()))
}

fn script_startup(api: &ScriptedApi, characters: serde_json::Value) {
    api.respond("GET", "/api/characters", characters);
    api.respond("GET", "/api/chats", json!([]));
    api.respond("GET", "/api/scenarios", json!([]));
}

#[tokio::test]
async fn loading_a_character_list_renders_items_with_no_selection() {
    let api = ScriptedApi::new();
    script_startup(
        &api,
        json!([{"id": "c1", "name": "Aria"}, {"id": "c2", "name": "Nova"}]),
    );

    let controller = controller(&api);
    controller.startup().await;
    controller.enter_app();

    let rendered = character_list::render(controller.state());
    let items = rendered.items();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|item| !item.active));
    assert_eq!(controller.views().current(), View::Welcome);
}

#[tokio::test(start_paused = true)]
async fn a_slow_response_for_a_superseded_selection_is_discarded() {
    let api = ScriptedApi::new();
    script_startup(
        &api,
        json!([{"id": "c1", "name": "Aria"}, {"id": "c2", "name": "Nova"}]),
    );
    // c2 is clicked first but its detail fetch resolves last.
    api.respond_after(
        "GET",
        "/api/characters/c2",
        json!({"id": "c2", "name": "Nova"}),
        Duration::from_millis(300),
    );
    api.respond_after(
        "GET",
        "/api/characters/c1",
        json!({"id": "c1", "name": "Aria"}),
        Duration::from_millis(50),
    );

    let controller = controller(&api);
    controller.startup().await;

    let second = CharacterId::from("c2");
    let first = CharacterId::from("c1");
    tokio::join!(
        controller.select_character(&second),
        controller.select_character(&first),
    );

    assert_eq!(
        controller.state().current_character().expect("current").id,
        CharacterId::from("c1")
    );
    assert_eq!(controller.views().current(), View::Chat);
}

#[tokio::test(start_paused = true)]
async fn opening_a_chat_supersedes_an_earlier_character_selection() {
    let api = ScriptedApi::new();
    script_startup(
        &api,
        json!([{"id": "c1", "name": "Aria"}, {"id": "c2", "name": "Nova"}]),
    );
    // The c2 selection is still in flight when the user opens one of
    // Aria's chats; the late c2 response must not win.
    api.respond_after(
        "GET",
        "/api/characters/c2",
        json!({"id": "c2", "name": "Nova"}),
        Duration::from_millis(300),
    );
    api.respond("GET", "/api/chats/ch1", json!({"id": "ch1", "character_id": "c1"}));

    let controller = controller(&api);
    controller.startup().await;

    let slow = CharacterId::from("c2");
    let chat = ChatId::from("ch1");
    tokio::join!(
        controller.select_character(&slow),
        controller.open_chat(&chat),
    );

    let current = controller.state().current_character().expect("current");
    assert_eq!(current.id, CharacterId::from("c1"));
    assert_eq!(
        controller.state().current_chat().expect("chat").character_id,
        CharacterId::from("c1")
    );
}

#[tokio::test]
async fn a_sent_message_appends_the_returned_turn() {
    let api = ScriptedApi::new();
    script_startup(&api, json!([{"id": "c1", "name": "Aria"}]));
    api.respond("GET", "/api/chats/ch1", json!({"id": "ch1", "character_id": "c1"}));
    api.respond(
        "POST",
        "/api/chat/ch1",
        json!({
            "response": "Well met, traveler.",
            "mood": "cheerful",
            "location": "the market square"
        }),
    );

    let controller = controller(&api);
    controller.startup().await;
    controller.open_chat(&ChatId::from("ch1")).await;

    controller.send_message("Hello there").await;

    let chat = controller.state().current_chat().expect("current chat");
    assert_eq!(chat.conversations.len(), 1);
    assert_eq!(
        chat.conversations[0].character_response,
        "Well met, traveler."
    );
    assert_eq!(chat.location, "the market square");
    assert_eq!(chat.character_state.mood.as_deref(), Some("cheerful"));
    assert!(!controller.notifier().is_loading());
}

#[tokio::test]
async fn deleting_the_only_character_lands_on_welcome_with_a_placeholder() {
    let api = ScriptedApi::new();
    script_startup(&api, json!([{"id": "c1", "name": "Aria"}]));
    api.respond("GET", "/api/characters/c1", json!({"id": "c1", "name": "Aria"}));
    api.respond("DELETE", "/api/characters/c1", json!({}));

    let controller = controller(&api);
    controller.startup().await;
    controller.select_character(&CharacterId::from("c1")).await;
    assert_eq!(controller.views().current(), View::Chat);

    controller
        .delete_character(&CharacterId::from("c1"), Confirmation::Confirmed)
        .await;

    assert_eq!(controller.views().current(), View::Welcome);
    assert!(controller.state().characters().is_empty());
    assert!(matches!(
        character_list::render(controller.state()),
        RenderedList::Placeholder(character_list::EMPTY_PLACEHOLDER)
    ));
}

#[tokio::test]
async fn deleting_the_active_character_falls_back_to_the_first_remaining() {
    let api = ScriptedApi::new();
    script_startup(
        &api,
        json!([{"id": "c1", "name": "Aria"}, {"id": "c2", "name": "Nova"}]),
    );
    api.respond("GET", "/api/characters/c2", json!({"id": "c2", "name": "Nova"}));
    api.respond("DELETE", "/api/characters/c2", json!({}));

    let controller = controller(&api);
    controller.startup().await;
    controller.select_character(&CharacterId::from("c2")).await;

    controller
        .delete_character(&CharacterId::from("c2"), Confirmation::Confirmed)
        .await;

    // Still in the app, now pointed at the surviving character.
    assert_eq!(controller.views().current(), View::Chat);
    assert_eq!(
        controller.state().current_character().expect("current").id,
        CharacterId::from("c1")
    );
}

#[tokio::test]
async fn opening_a_saved_chat_restores_its_character_and_view() {
    let api = ScriptedApi::new();
    script_startup(&api, json!([{"id": "c1", "name": "Aria"}]));
    api.respond(
        "GET",
        "/api/chats/ch1",
        json!({
            "id": "ch1",
            "character_id": "c1",
            "title": "First meeting",
            "conversations": [{
                "input": {"user_message": "Hello"},
                "character_response": "Hi there."
            }]
        }),
    );

    let controller = controller(&api);
    controller.startup().await;
    controller.open_chat(&ChatId::from("ch1")).await;

    assert_eq!(controller.views().current(), View::Chat);
    let chat = controller.state().current_chat().expect("current chat");
    assert_eq!(chat.conversations.len(), 1);
    assert_eq!(
        controller.state().current_character().expect("current").id,
        CharacterId::from("c1")
    );
}

#[tokio::test]
async fn a_failed_delete_leaves_the_collection_unchanged() {
    let api = ScriptedApi::new();
    script_startup(&api, json!([{"id": "c1", "name": "Aria"}]));
    api.fail(
        "DELETE",
        "/api/characters/c1",
        taleforge_client::ports::outbound::ApiError::Status {
            status: 500,
            body: "<html>Internal Server Error</html>".to_string(),
        },
    );

    let controller = controller(&api);
    controller.startup().await;
    controller
        .delete_character(&CharacterId::from("c1"), Confirmation::Confirmed)
        .await;

    assert_eq!(controller.state().characters().len(), 1);
    // The HTML error body is not surfaced verbatim.
    let shown = controller.notifier().current().expect("notification");
    assert!(!shown.message.contains("<html>"));
    assert!(!controller.notifier().is_loading());
}
