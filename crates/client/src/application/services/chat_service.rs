//! Chat service - chat instance CRUD, history, and location generation.

use std::sync::Arc;

use taleforge_domain::{CharacterOverlay, ChatId, ChatInstance, Turn, TurnInput};

use crate::application::dto::{
    ChatMessageResponse, CreateChatRequest, GenerateRequest, GeneratedContent,
    SendMessageRequest, UpdateChatRequest,
};
use crate::application::error::ServiceError;
use crate::application::services::{body, parse};
use crate::ports::outbound::RawApiPort;

/// One completed message round trip: the turn to append plus the
/// character's updated per-chat presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatExchange {
    pub turn: Turn,
    pub overlay: CharacterOverlay,
}

#[derive(Clone)]
pub struct ChatService {
    api: Arc<dyn RawApiPort>,
}

impl ChatService {
    pub fn new(api: Arc<dyn RawApiPort>) -> Self {
        Self { api }
    }

    /// List all chat instances.
    pub async fn list(&self) -> Result<Vec<ChatInstance>, ServiceError> {
        let value = self.api.get_json("/api/chats").await?;
        parse(value)
    }

    /// Fetch one chat instance with its conversation turns.
    pub async fn get(&self, id: &ChatId) -> Result<ChatInstance, ServiceError> {
        let value = self.api.get_json(&format!("/api/chats/{id}")).await?;
        parse(value)
    }

    /// Fetch the conversation history for a chat.
    pub async fn history(&self, id: &ChatId) -> Result<Vec<Turn>, ServiceError> {
        let value = self.api.get_json(&format!("/api/chat/history/{id}")).await?;
        parse(value)
    }

    /// Create a new chat instance bound to a character.
    pub async fn create(&self, request: &CreateChatRequest) -> Result<ChatInstance, ServiceError> {
        let value = self.api.post_json("/api/chats", &body(request)).await?;
        parse(value)
    }

    /// Update a chat's title or location.
    pub async fn update(
        &self,
        id: &ChatId,
        request: &UpdateChatRequest,
    ) -> Result<ChatInstance, ServiceError> {
        let value = self
            .api
            .put_json(&format!("/api/chats/{id}"), &body(request))
            .await?;
        parse(value)
    }

    /// Delete a chat instance.
    pub async fn delete(&self, id: &ChatId) -> Result<(), ServiceError> {
        self.api.delete(&format!("/api/chats/{id}")).await?;
        Ok(())
    }

    /// Send a message or player action into a chat and get the
    /// character's turn back.
    pub async fn send_message(
        &self,
        id: &ChatId,
        input: &TurnInput,
        use_local_model: bool,
    ) -> Result<ChatExchange, ServiceError> {
        let request = match input {
            TurnInput::UserMessage(message) => SendMessageRequest {
                message: message.clone(),
                use_local_model,
                is_player_action: None,
                action_success: None,
            },
            TurnInput::PlayerAction {
                description,
                success,
                details,
            } => SendMessageRequest {
                // Actions ride in the message field as encoded JSON.
                message: serde_json::json!({
                    "action": description,
                    "details": details.clone().unwrap_or_default(),
                })
                .to_string(),
                use_local_model,
                is_player_action: Some(true),
                action_success: *success,
            },
        };

        let value = self
            .api
            .post_json(&format!("/api/chat/{id}"), &body(&request))
            .await?;
        let response: ChatMessageResponse = parse(value)?;
        Ok(exchange(input.clone(), response))
    }

    /// Generate a location description for a chat setting.
    pub async fn generate_location(&self, prompt: &str) -> Result<String, ServiceError> {
        let request = GenerateRequest {
            prompt: prompt.to_string(),
        };
        let value = self
            .api
            .post_json("/api/generate-location", &body(&request))
            .await?;
        let content: GeneratedContent = parse(value)?;
        Ok(content.content)
    }
}

fn exchange(input: TurnInput, response: ChatMessageResponse) -> ChatExchange {
    let emotions = flatten_emotions(&response.emotions);
    let overlay = CharacterOverlay {
        mood: non_empty(&response.mood),
        emotions: non_empty(&emotions),
        opinion_of_user: non_empty(&response.opinion_of_user),
        action: non_empty(&response.action),
    };
    ChatExchange {
        turn: Turn {
            input,
            character_response: response.response,
            mood: response.mood,
            emotions,
            action: response.action,
            location: response.location,
            scene_description: response.scene_description,
        },
        overlay,
    }
}

/// The server reports emotions as `{"joy": "high", ...}`; display code
/// wants one line of text.
fn flatten_emotions(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text.clone(),
        serde_json::Value::Object(map) => map
            .iter()
            .map(|(name, level)| match level.as_str() {
                Some(level) => format!("{name}: {level}"),
                None => name.clone(),
            })
            .collect::<Vec<_>>()
            .join(", "),
        _ => String::new(),
    }
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::ScriptedApi;
    use serde_json::json;
    use taleforge_domain::CharacterId;

    #[tokio::test]
    async fn create_sends_character_reference() {
        let api = ScriptedApi::new();
        api.respond(
            "POST",
            "/api/chats",
            json!({"id": "ch1", "character_id": "c1"}),
        );

        let service = ChatService::new(Arc::new(api.clone()));
        let chat = service
            .create(&CreateChatRequest {
                character_id: CharacterId::from("c1"),
                title: None,
                location: Some("tavern".to_string()),
            })
            .await
            .expect("create chat");

        assert_eq!(chat.id, ChatId::from("ch1"));
        let sent = api.sent();
        assert_eq!(sent.len(), 1);
        let request_body = sent[0].body.clone().expect("request body");
        assert_eq!(request_body["character_id"], "c1");
        // Absent title must not be serialized at all.
        assert!(request_body.get("title").is_none());
    }

    #[tokio::test]
    async fn send_message_returns_the_turn_and_overlay() {
        let api = ScriptedApi::new();
        api.respond(
            "POST",
            "/api/chat/ch1",
            json!({
                "response": "The gate is barred.",
                "mood": "wary",
                "emotions": {"suspicion": "high"},
                "opinion_of_user": "cautious",
                "action": "blocking the path",
                "location": "the north gate",
                "scene_description": "Dusk settles over the wall."
            }),
        );

        let service = ChatService::new(Arc::new(api.clone()));
        let exchange = service
            .send_message(
                &ChatId::from("ch1"),
                &TurnInput::UserMessage("Let me in".to_string()),
                false,
            )
            .await
            .expect("exchange");

        assert_eq!(exchange.turn.character_response, "The gate is barred.");
        assert_eq!(exchange.turn.emotions, "suspicion: high");
        assert_eq!(exchange.turn.location, "the north gate");
        assert_eq!(exchange.overlay.mood.as_deref(), Some("wary"));
        assert_eq!(exchange.overlay.opinion_of_user.as_deref(), Some("cautious"));

        let sent = api.sent();
        let request_body = sent[0].body.clone().expect("request body");
        assert_eq!(request_body["message"], "Let me in");
        assert!(request_body.get("is_player_action").is_none());
    }

    #[tokio::test]
    async fn player_actions_ride_in_the_message_field() {
        let api = ScriptedApi::new();
        api.respond(
            "POST",
            "/api/chat/ch1",
            json!({"response": "You slip past unseen."}),
        );

        let service = ChatService::new(Arc::new(api.clone()));
        let input = TurnInput::PlayerAction {
            description: "sneak past the guard".to_string(),
            success: Some(true),
            details: Some("rolled 18".to_string()),
        };
        service
            .send_message(&ChatId::from("ch1"), &input, false)
            .await
            .expect("exchange");

        let sent = api.sent();
        let request_body = sent[0].body.clone().expect("request body");
        assert_eq!(request_body["is_player_action"], true);
        assert_eq!(request_body["action_success"], true);
        let encoded: serde_json::Value =
            serde_json::from_str(request_body["message"].as_str().expect("message"))
                .expect("encoded action");
        assert_eq!(encoded["action"], "sneak past the guard");
    }

    #[tokio::test]
    async fn history_parses_turns() {
        let api = ScriptedApi::new();
        api.respond(
            "GET",
            "/api/chat/history/ch1",
            json!([{
                "input": {"user_message": "Hello"},
                "character_response": "Hi there.",
                "mood": "cheerful"
            }]),
        );

        let service = ChatService::new(Arc::new(api));
        let turns = service
            .history(&ChatId::from("ch1"))
            .await
            .expect("history");
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].mood, "cheerful");
    }
}
