//! Application controller - wires services, state, views, and
//! notifications together.
//!
//! Every user-facing operation funnels through here: failures become
//! notifications, never unhandled errors, and the loading indicator is
//! held by a guard for the duration of each round trip.

use std::sync::Arc;

use taleforge_domain::{CharacterId, ChatId, ScenarioId, TurnInput};

use crate::application::dto::CreateChatRequest;
use crate::application::services::{
    CharacterService, ChatService, PromptService, ScenarioService, SettingsService, SystemService,
};
use crate::ports::outbound::{RawApiPort, StorageProvider};
use crate::presentation::forms::{CharacterForm, ScenarioForm, SettingsForm};
use crate::state::{
    AppState, CharacterRemoval, ChatRemoval, Notifier, SidebarTab, StateBus, View, ViewController,
};

/// The user's answer to a destructive prompt. A delete is only issued
/// on `Confirmed`; there is no default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Cancelled,
}

#[derive(Clone)]
pub struct AppController {
    characters: CharacterService,
    chats: ChatService,
    scenarios: ScenarioService,
    settings: SettingsService,
    system: SystemService,
    prompts: PromptService,
    state: AppState,
    views: ViewController,
    notifier: Notifier,
}

impl AppController {
    pub fn new(api: Arc<dyn RawApiPort>, storage: Arc<dyn StorageProvider>) -> Self {
        let bus = StateBus::new();
        Self {
            characters: CharacterService::new(api.clone()),
            chats: ChatService::new(api.clone()),
            scenarios: ScenarioService::new(api.clone()),
            settings: SettingsService::new(storage),
            system: SystemService::new(api.clone()),
            prompts: PromptService::new(api),
            state: AppState::new(bus.clone()),
            views: ViewController::new(bus.clone()),
            notifier: Notifier::new(bus),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn views(&self) -> &ViewController {
        &self.views
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn character_service(&self) -> &CharacterService {
        &self.characters
    }

    pub fn system_service(&self) -> &SystemService {
        &self.system
    }

    pub fn prompt_service(&self) -> &PromptService {
        &self.prompts
    }

    pub fn character_form(&self) -> CharacterForm {
        CharacterForm::new(
            self.characters.clone(),
            self.state.clone(),
            self.notifier.clone(),
        )
    }

    pub fn scenario_form(&self) -> ScenarioForm {
        ScenarioForm::new(
            self.scenarios.clone(),
            self.state.clone(),
            self.notifier.clone(),
        )
    }

    pub fn settings_form(&self) -> SettingsForm {
        SettingsForm::new(
            self.settings.clone(),
            self.system.clone(),
            self.state.clone(),
            self.notifier.clone(),
        )
    }

    /// Load persisted settings and the entity collections. Always lands
    /// on the homepage; each fetch failure is surfaced and the rest of
    /// startup continues.
    pub async fn startup(&self) {
        self.state.update_settings(self.settings.load());
        self.views.set_view(View::Homepage);

        let _guard = self.notifier.begin_loading();
        match self.characters.list().await {
            Ok(characters) => self.state.set_characters(characters),
            Err(error) => self.notifier.error(error.user_message()),
        }
        match self.chats.list().await {
            Ok(chats) => self.state.set_chats(chats),
            Err(error) => self.notifier.error(error.user_message()),
        }
        match self.scenarios.list().await {
            Ok(scenarios) => self.state.set_scenarios(scenarios),
            Err(error) => self.notifier.error(error.user_message()),
        }
    }

    /// Load a character's full detail and make it current.
    ///
    /// Selections are guarded by a load ticket: when the user clicks a
    /// second character before the first detail fetch resolves, the
    /// slow response is discarded and the view never flips back.
    pub async fn select_character(&self, id: &CharacterId) {
        let ticket = self.state.begin_character_load();
        let _guard = self.notifier.begin_loading();
        match self.characters.get(id).await {
            Ok(character) => {
                if self.state.complete_character_load(&ticket, character) {
                    self.views.set_view(View::Chat);
                }
            }
            Err(error) => {
                // Prior view and selection stay as they were.
                self.notifier.error(error.user_message());
            }
        }
    }

    /// Open a saved chat: load it, make its character current, and
    /// switch to the chat view.
    pub async fn open_chat(&self, id: &ChatId) {
        let ticket = self.state.begin_chat_load();
        let _guard = self.notifier.begin_loading();
        let chat = match self.chats.get(id).await {
            Ok(chat) => chat,
            Err(error) => {
                self.notifier.error(error.user_message());
                return;
            }
        };

        let character = match self.state.find_character(&chat.character_id) {
            Some(character) => Some(character),
            // Not in the loaded collection; fetch it. A missing
            // character degrades the chat rather than blocking it.
            None => self.characters.get(&chat.character_id).await.ok(),
        };

        if self.state.complete_chat_load(&ticket, chat) {
            self.state.set_current_character(character);
            self.views.set_view(View::Chat);
        }
    }

    /// Start a fresh chat with a character.
    pub async fn start_chat(&self, character_id: &CharacterId) {
        let _guard = self.notifier.begin_loading();
        let request = CreateChatRequest {
            character_id: character_id.clone(),
            title: None,
            location: None,
        };
        match self.chats.create(&request).await {
            Ok(chat) => {
                self.state.upsert_chat(chat.clone());
                self.state.set_current_character(self.state.find_character(character_id));
                self.state.set_current_chat(Some(chat));
                self.views.set_view(View::Chat);
            }
            Err(error) => self.notifier.error(error.user_message()),
        }
    }

    /// Send a free-text message into the open chat.
    pub async fn send_message(&self, text: &str) {
        self.submit_input(TurnInput::UserMessage(text.to_string()))
            .await;
    }

    /// Submit a player action into the open chat.
    pub async fn perform_action(&self, description: &str, success: bool, details: Option<String>) {
        self.submit_input(TurnInput::PlayerAction {
            description: description.to_string(),
            success: Some(success),
            details,
        })
        .await;
    }

    async fn submit_input(&self, input: TurnInput) {
        let Some(chat) = self.state.current_chat() else {
            self.notifier.error("No chat is open");
            return;
        };
        let use_local_model = self.state.settings().use_local_model;
        let _guard = self.notifier.begin_loading();
        match self.chats.send_message(&chat.id, &input, use_local_model).await {
            Ok(exchange) => {
                if !self.state.append_turn(exchange.turn, exchange.overlay) {
                    tracing::warn!(id = %chat.id, "chat closed while its response was in flight");
                }
            }
            Err(error) => self.notifier.error(error.user_message()),
        }
    }

    /// Switch the sidebar tab.
    pub fn select_tab(&self, tab: SidebarTab) {
        self.state.set_active_tab(tab);
    }

    /// Show or hide the sidebar.
    pub fn toggle_sidebar(&self) {
        self.state.set_sidebar_visible(!self.state.sidebar_visible());
    }

    /// Leave the homepage: the chat view when a character is selected,
    /// the welcome view otherwise.
    pub fn enter_app(&self) {
        if self.state.current_character().is_some() {
            self.views.set_view(View::Chat);
        } else {
            self.views.set_view(View::Welcome);
        }
    }

    /// Back to the homepage. Clears the current chat so a fresh load
    /// never resumes it implicitly.
    pub fn go_home(&self) {
        self.state.set_current_chat(None);
        self.views.set_view(View::Homepage);
    }

    /// Delete a character after explicit confirmation. When the active
    /// character was deleted, selection falls back to the first
    /// remaining character, or the welcome view when none remain.
    pub async fn delete_character(&self, id: &CharacterId, confirmation: Confirmation) {
        if confirmation == Confirmation::Cancelled {
            return;
        }
        let _guard = self.notifier.begin_loading();
        if let Err(error) = self.characters.delete(id).await {
            self.notifier.error(error.user_message());
            return;
        }
        match self.state.remove_character(id) {
            CharacterRemoval::RemovedCurrent { fallback: None } => {
                self.views.set_view(View::Welcome);
            }
            CharacterRemoval::RemovedCurrent { .. } | CharacterRemoval::Removed => {}
            CharacterRemoval::NotFound => {
                tracing::warn!(id = %id, "deleted character was not in local state");
            }
        }
        self.notifier.success("Character deleted");
    }

    /// Delete a chat instance after explicit confirmation.
    pub async fn delete_chat(&self, id: &ChatId, confirmation: Confirmation) {
        if confirmation == Confirmation::Cancelled {
            return;
        }
        let _guard = self.notifier.begin_loading();
        if let Err(error) = self.chats.delete(id).await {
            self.notifier.error(error.user_message());
            return;
        }
        match self.state.remove_chat(id) {
            ChatRemoval::RemovedCurrent { fallback: None } => {
                self.views.set_view(View::Welcome);
            }
            ChatRemoval::RemovedCurrent { .. } | ChatRemoval::Removed => {}
            ChatRemoval::NotFound => {
                tracing::warn!(id = %id, "deleted chat was not in local state");
            }
        }
        self.notifier.success("Chat deleted");
    }

    /// Delete a scenario after explicit confirmation.
    pub async fn delete_scenario(&self, id: &ScenarioId, confirmation: Confirmation) {
        if confirmation == Confirmation::Cancelled {
            return;
        }
        let _guard = self.notifier.begin_loading();
        match self.scenarios.delete(id).await {
            Ok(()) => {
                self.state.remove_scenario(id);
                self.notifier.success("Scenario deleted");
            }
            Err(error) => self.notifier.error(error.user_message()),
        }
    }
}
