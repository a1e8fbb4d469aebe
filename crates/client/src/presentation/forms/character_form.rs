//! Character editor form.

use taleforge_domain::{Character, CharacterId, StatBlock};

use crate::application::dto::SaveCharacterRequest;
use crate::application::services::CharacterService;
use crate::state::{AppState, Notifier};

use super::SubmitOutcome;

/// Focus target for the required name field.
pub const NAME_FIELD: &str = "character-name";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    Closed,
    Create,
    Edit(CharacterId),
}

/// Editable field values, mirrored into the request on submit.
#[derive(Debug, Clone, Default)]
pub struct CharacterFields {
    pub name: String,
    pub description: String,
    pub personality: String,
    pub greeting: String,
    pub category: String,
    pub appearance: String,
    pub speaking_style: String,
    pub stats: Option<StatBlock>,
}

pub struct CharacterForm {
    service: CharacterService,
    state: AppState,
    notifier: Notifier,
    mode: Mode,
    pub fields: CharacterFields,
    in_flight: bool,
}

impl CharacterForm {
    pub fn new(service: CharacterService, state: AppState, notifier: Notifier) -> Self {
        Self {
            service,
            state,
            notifier,
            mode: Mode::Closed,
            fields: CharacterFields::default(),
            in_flight: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.mode != Mode::Closed
    }

    /// Open blank for a new character.
    pub fn open_create(&mut self) {
        self.mode = Mode::Create;
        self.fields = CharacterFields::default();
        self.in_flight = false;
    }

    /// Open pre-filled for an existing character.
    pub fn open_edit(&mut self, character: &Character) {
        self.mode = Mode::Edit(character.id.clone());
        self.fields = CharacterFields {
            name: character.name.clone(),
            description: character.description.clone(),
            personality: character.personality.clone(),
            greeting: character.greeting.clone(),
            category: character.category.clone(),
            appearance: character.appearance.clone(),
            speaking_style: character.speaking_style.clone(),
            stats: character.stats.clone(),
        };
        self.in_flight = false;
    }

    pub fn close(&mut self) {
        self.mode = Mode::Closed;
        self.in_flight = false;
    }

    /// Ask the server to draft one field from the current form context.
    pub async fn generate_field(&self, field_name: &str) -> Option<String> {
        let context = serde_json::json!({
            "name": self.fields.name,
            "description": self.fields.description,
        });
        match self.service.generate_field(field_name, context).await {
            Ok(content) => Some(content),
            Err(error) => {
                self.notifier.error(error.user_message());
                None
            }
        }
    }

    /// Validate, round-trip, merge, close. See `SubmitOutcome`.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if self.in_flight {
            return SubmitOutcome::InFlight;
        }
        let name = self.fields.name.trim();
        if name.is_empty() {
            self.notifier.error("Character name is required");
            return SubmitOutcome::Rejected { field: NAME_FIELD };
        }

        let request = SaveCharacterRequest {
            name: name.to_string(),
            description: self.fields.description.clone(),
            personality: self.fields.personality.clone(),
            greeting: self.fields.greeting.clone(),
            category: self.fields.category.clone(),
            appearance: self.fields.appearance.clone(),
            speaking_style: self.fields.speaking_style.clone(),
            stats: self.fields.stats.clone().map(StatBlock::clamped),
        };

        self.in_flight = true;
        let _guard = self.notifier.begin_loading();
        let result = match &self.mode {
            Mode::Edit(id) => self.service.update(id, &request).await,
            _ => self.service.create(&request).await,
        };
        self.in_flight = false;

        match result {
            Ok(saved) => {
                self.state.upsert_character(saved);
                self.close();
                self.notifier.success("Character saved");
                SubmitOutcome::Saved
            }
            Err(error) => {
                self.notifier.error(error.user_message());
                SubmitOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::ScriptedApi;
    use crate::state::StateBus;
    use serde_json::json;
    use std::sync::Arc;

    fn form(api: &ScriptedApi) -> CharacterForm {
        let bus = StateBus::new();
        CharacterForm::new(
            CharacterService::new(Arc::new(api.clone())),
            AppState::new(bus.clone()),
            Notifier::new(bus),
        )
    }

    #[tokio::test]
    async fn blank_name_is_rejected_without_a_network_call() {
        let api = ScriptedApi::new();
        let mut form = form(&api);
        form.open_create();
        form.fields.name = "   ".to_string();

        let outcome = form.submit().await;
        assert_eq!(outcome, SubmitOutcome::Rejected { field: NAME_FIELD });
        assert!(form.is_open());
        assert!(api.sent().is_empty());
    }

    #[tokio::test]
    async fn successful_create_merges_and_closes() {
        let api = ScriptedApi::new();
        api.respond(
            "POST",
            "/api/characters",
            json!({"id": "c1", "name": "Aria"}),
        );
        let mut form = form(&api);
        form.open_create();
        form.fields.name = "Aria".to_string();

        let outcome = form.submit().await;
        assert_eq!(outcome, SubmitOutcome::Saved);
        assert!(!form.is_open());
    }

    #[tokio::test]
    async fn failed_round_trip_keeps_the_form_open() {
        let api = ScriptedApi::new();
        api.fail(
            "POST",
            "/api/characters",
            crate::ports::outbound::ApiError::Timeout,
        );
        let mut form = form(&api);
        form.open_create();
        form.fields.name = "Aria".to_string();

        let outcome = form.submit().await;
        assert_eq!(outcome, SubmitOutcome::Failed);
        assert!(form.is_open());
    }

    #[tokio::test]
    async fn edit_round_trips_to_the_id_path() {
        let api = ScriptedApi::new();
        api.respond(
            "PUT",
            "/api/characters/c1",
            json!({"id": "c1", "name": "Aria"}),
        );
        let mut form = form(&api);
        let mut existing = Character::new("Aria");
        existing.id = CharacterId::from("c1");
        form.open_edit(&existing);

        let outcome = form.submit().await;
        assert_eq!(outcome, SubmitOutcome::Saved);
        assert_eq!(api.request_count("PUT", "/api/characters/c1"), 1);
    }

    #[tokio::test]
    async fn out_of_range_stats_are_clamped_before_sending() {
        let api = ScriptedApi::new();
        api.respond(
            "POST",
            "/api/characters",
            json!({"id": "c1", "name": "Aria"}),
        );
        let mut form = form(&api);
        form.open_create();
        form.fields.name = "Aria".to_string();
        form.fields.stats = Some(StatBlock {
            strength: 25,
            ..StatBlock::default()
        });

        form.submit().await;
        let sent = api.sent();
        let body = sent[0].body.clone().expect("request body");
        assert_eq!(body["stats"]["strength"], 20);
    }
}
