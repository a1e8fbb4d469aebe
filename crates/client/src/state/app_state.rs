//! Application state - the aggregate root.
//!
//! One instance exists per running client. All writes go through the
//! mutation methods here; nothing else holds a mutable path into the
//! collections, which is what keeps the invariants enforceable:
//!
//! - ids are unique within each collection (upsert replaces by id);
//! - the current character/chat slots are rebuilt on switch, never
//!   mutated in place;
//! - deleting the current entity falls back to the first remaining one,
//!   or to empty when the collection is drained;
//! - a network response for a superseded selection is discarded via
//!   load tickets rather than applied.

use std::sync::{Arc, Mutex, MutexGuard};

use taleforge_domain::{
    Character, CharacterId, CharacterOverlay, ChatId, ChatInstance, Scenario, ScenarioId,
    Settings, Turn,
};

use super::bus::{StateBus, StateEvent};

/// Sidebar tab selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SidebarTab {
    #[default]
    Characters,
    Chats,
    Scenarios,
}

/// Outcome of removing a character.
#[derive(Debug, Clone, PartialEq)]
pub enum CharacterRemoval {
    NotFound,
    /// A non-current character was removed; the current slot is intact.
    Removed,
    /// The current character was removed and the slot fell back.
    RemovedCurrent { fallback: Option<Character> },
}

/// Outcome of removing a chat instance.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatRemoval {
    NotFound,
    Removed,
    RemovedCurrent { fallback: Option<ChatInstance> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadKind {
    Character,
    Chat,
}

/// Proof that a selection load is still the most recent one.
///
/// Issued when a detail fetch begins; the matching `complete_*` call
/// applies the response only if no newer load has started since. This
/// is how a slow response for character A cannot overwrite a later
/// selection of character B.
#[derive(Debug, Clone)]
pub struct LoadTicket {
    kind: LoadKind,
    epoch: u64,
}

#[derive(Default)]
struct LoadSlot {
    epoch: u64,
}

impl LoadSlot {
    fn begin(&mut self) -> u64 {
        self.epoch += 1;
        self.epoch
    }

    fn is_current(&self, epoch: u64) -> bool {
        self.epoch == epoch
    }

    /// Invalidate any in-flight load (e.g. the entity was deleted).
    fn invalidate(&mut self) {
        self.epoch += 1;
    }
}

#[derive(Default)]
struct Inner {
    characters: Vec<Character>,
    chats: Vec<ChatInstance>,
    scenarios: Vec<Scenario>,
    current_character: Option<Character>,
    current_chat: Option<ChatInstance>,
    settings: Settings,
    active_tab: SidebarTab,
    sidebar_visible: bool,
    character_load: LoadSlot,
    chat_load: LoadSlot,
}

/// The single mutable container for entities and UI state.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Mutex<Inner>>,
    bus: StateBus,
}

impl AppState {
    pub fn new(bus: StateBus) -> Self {
        let inner = Inner {
            sidebar_visible: true,
            ..Inner::default()
        };
        Self {
            inner: Arc::new(Mutex::new(inner)),
            bus,
        }
    }

    pub fn bus(&self) -> &StateBus {
        &self.bus
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    pub fn characters(&self) -> Vec<Character> {
        self.lock().characters.clone()
    }

    pub fn chats(&self) -> Vec<ChatInstance> {
        self.lock().chats.clone()
    }

    pub fn scenarios(&self) -> Vec<Scenario> {
        self.lock().scenarios.clone()
    }

    pub fn current_character(&self) -> Option<Character> {
        self.lock().current_character.clone()
    }

    pub fn current_chat(&self) -> Option<ChatInstance> {
        self.lock().current_chat.clone()
    }

    pub fn settings(&self) -> Settings {
        self.lock().settings.clone()
    }

    pub fn find_character(&self, id: &CharacterId) -> Option<Character> {
        self.lock().characters.iter().find(|c| &c.id == id).cloned()
    }

    pub fn active_tab(&self) -> SidebarTab {
        self.lock().active_tab
    }

    pub fn sidebar_visible(&self) -> bool {
        self.lock().sidebar_visible
    }

    // ------------------------------------------------------------------
    // Character mutations
    // ------------------------------------------------------------------

    pub fn set_characters(&self, characters: Vec<Character>) {
        self.lock().characters = characters;
        self.bus.dispatch(StateEvent::CharactersChanged);
    }

    /// Replace by id, or append when the id is new. Keeps the current
    /// slot in sync when the upserted character is the current one.
    pub fn upsert_character(&self, character: Character) {
        let current_changed = {
            let mut inner = self.lock();
            match inner.characters.iter_mut().find(|c| c.id == character.id) {
                Some(slot) => *slot = character.clone(),
                None => inner.characters.push(character.clone()),
            }
            let is_current = inner
                .current_character
                .as_ref()
                .is_some_and(|c| c.id == character.id);
            if is_current {
                inner.current_character = None;
                inner.current_character = Some(character);
            }
            is_current
        };
        self.bus.dispatch(StateEvent::CharactersChanged);
        if current_changed {
            self.bus.dispatch(StateEvent::CurrentCharacterChanged);
        }
    }

    pub fn remove_character(&self, id: &CharacterId) -> CharacterRemoval {
        let (removal, events) = {
            let mut inner = self.lock();
            let before = inner.characters.len();
            inner.characters.retain(|c| &c.id != id);
            if inner.characters.len() == before {
                return CharacterRemoval::NotFound;
            }

            // Any in-flight detail load for this character must not
            // resurrect it.
            inner.character_load.invalidate();

            let was_current = inner
                .current_character
                .as_ref()
                .is_some_and(|c| &c.id == id);
            if was_current {
                let fallback = inner.characters.first().cloned();
                inner.current_character = fallback.clone();
                (
                    CharacterRemoval::RemovedCurrent { fallback },
                    vec![
                        StateEvent::CharactersChanged,
                        StateEvent::CurrentCharacterChanged,
                    ],
                )
            } else {
                (
                    CharacterRemoval::Removed,
                    vec![StateEvent::CharactersChanged],
                )
            }
        };
        for event in events {
            self.bus.dispatch(event);
        }
        removal
    }

    /// Switch the current character. The slot is rebuilt, not mutated
    /// in place, so no stale merged data survives a switch. A direct
    /// switch supersedes any in-flight detail load, so a slow response
    /// for an earlier selection cannot land on top of this one.
    pub fn set_current_character(&self, character: Option<Character>) {
        {
            let mut inner = self.lock();
            inner.character_load.invalidate();
            inner.current_character = None;
            inner.current_character = character;
        }
        self.bus.dispatch(StateEvent::CurrentCharacterChanged);
    }

    /// Start a character detail load, superseding any earlier one.
    pub fn begin_character_load(&self) -> LoadTicket {
        let epoch = self.lock().character_load.begin();
        LoadTicket {
            kind: LoadKind::Character,
            epoch,
        }
    }

    /// Apply a finished character load if it is still the latest.
    /// Returns false when the response was stale and discarded.
    pub fn complete_character_load(&self, ticket: &LoadTicket, character: Character) -> bool {
        if ticket.kind != LoadKind::Character {
            return false;
        }
        let applied = {
            let mut inner = self.lock();
            if !inner.character_load.is_current(ticket.epoch) {
                tracing::debug!(id = %character.id, "discarding stale character load");
                false
            } else {
                match inner.characters.iter_mut().find(|c| c.id == character.id) {
                    Some(slot) => *slot = character.clone(),
                    None => inner.characters.push(character.clone()),
                }
                inner.current_character = None;
                inner.current_character = Some(character);
                true
            }
        };
        if applied {
            self.bus.dispatch(StateEvent::CharactersChanged);
            self.bus.dispatch(StateEvent::CurrentCharacterChanged);
        }
        applied
    }

    // ------------------------------------------------------------------
    // Chat mutations
    // ------------------------------------------------------------------

    pub fn set_chats(&self, chats: Vec<ChatInstance>) {
        self.lock().chats = chats;
        self.bus.dispatch(StateEvent::ChatsChanged);
    }

    pub fn upsert_chat(&self, chat: ChatInstance) {
        let current_changed = {
            let mut inner = self.lock();
            match inner.chats.iter_mut().find(|c| c.id == chat.id) {
                Some(slot) => *slot = chat.clone(),
                None => inner.chats.push(chat.clone()),
            }
            let is_current = inner.current_chat.as_ref().is_some_and(|c| c.id == chat.id);
            if is_current {
                inner.current_chat = None;
                inner.current_chat = Some(chat);
            }
            is_current
        };
        self.bus.dispatch(StateEvent::ChatsChanged);
        if current_changed {
            self.bus.dispatch(StateEvent::CurrentChatChanged);
        }
    }

    pub fn remove_chat(&self, id: &ChatId) -> ChatRemoval {
        let (removal, events) = {
            let mut inner = self.lock();
            let before = inner.chats.len();
            inner.chats.retain(|c| &c.id != id);
            if inner.chats.len() == before {
                return ChatRemoval::NotFound;
            }

            inner.chat_load.invalidate();

            let was_current = inner.current_chat.as_ref().is_some_and(|c| &c.id == id);
            if was_current {
                let fallback = inner.chats.first().cloned();
                inner.current_chat = fallback.clone();
                (
                    ChatRemoval::RemovedCurrent { fallback },
                    vec![StateEvent::ChatsChanged, StateEvent::CurrentChatChanged],
                )
            } else {
                (ChatRemoval::Removed, vec![StateEvent::ChatsChanged])
            }
        };
        for event in events {
            self.bus.dispatch(event);
        }
        removal
    }

    /// Switch the current chat, superseding any in-flight chat load.
    pub fn set_current_chat(&self, chat: Option<ChatInstance>) {
        {
            let mut inner = self.lock();
            inner.chat_load.invalidate();
            inner.current_chat = None;
            inner.current_chat = chat;
        }
        self.bus.dispatch(StateEvent::CurrentChatChanged);
    }

    /// Append a resolved turn to the current chat and carry the
    /// character's updated presentation and location along with it.
    /// Returns false when no chat is open.
    pub fn append_turn(&self, turn: Turn, overlay: CharacterOverlay) -> bool {
        {
            let mut inner = self.lock();
            let Some(mut chat) = inner.current_chat.take() else {
                return false;
            };
            let location = turn.location.clone();
            chat.push_turn(turn);
            if !location.is_empty() {
                chat.location = location;
            }
            if !overlay.is_empty() {
                chat.character_state = overlay;
            }
            if let Some(slot) = inner.chats.iter_mut().find(|c| c.id == chat.id) {
                *slot = chat.clone();
            }
            inner.current_chat = Some(chat);
        }
        self.bus.dispatch(StateEvent::ChatsChanged);
        self.bus.dispatch(StateEvent::CurrentChatChanged);
        true
    }

    pub fn begin_chat_load(&self) -> LoadTicket {
        let epoch = self.lock().chat_load.begin();
        LoadTicket {
            kind: LoadKind::Chat,
            epoch,
        }
    }

    pub fn complete_chat_load(&self, ticket: &LoadTicket, chat: ChatInstance) -> bool {
        if ticket.kind != LoadKind::Chat {
            return false;
        }
        let applied = {
            let mut inner = self.lock();
            if !inner.chat_load.is_current(ticket.epoch) {
                tracing::debug!(id = %chat.id, "discarding stale chat load");
                false
            } else {
                match inner.chats.iter_mut().find(|c| c.id == chat.id) {
                    Some(slot) => *slot = chat.clone(),
                    None => inner.chats.push(chat.clone()),
                }
                inner.current_chat = None;
                inner.current_chat = Some(chat);
                true
            }
        };
        if applied {
            self.bus.dispatch(StateEvent::ChatsChanged);
            self.bus.dispatch(StateEvent::CurrentChatChanged);
        }
        applied
    }

    // ------------------------------------------------------------------
    // Scenario mutations
    // ------------------------------------------------------------------

    pub fn set_scenarios(&self, scenarios: Vec<Scenario>) {
        self.lock().scenarios = scenarios;
        self.bus.dispatch(StateEvent::ScenariosChanged);
    }

    pub fn upsert_scenario(&self, scenario: Scenario) {
        {
            let mut inner = self.lock();
            match inner.scenarios.iter_mut().find(|s| s.id == scenario.id) {
                Some(slot) => *slot = scenario,
                None => inner.scenarios.push(scenario),
            }
        }
        self.bus.dispatch(StateEvent::ScenariosChanged);
    }

    pub fn remove_scenario(&self, id: &ScenarioId) -> bool {
        let removed = {
            let mut inner = self.lock();
            let before = inner.scenarios.len();
            inner.scenarios.retain(|s| &s.id != id);
            inner.scenarios.len() != before
        };
        if removed {
            self.bus.dispatch(StateEvent::ScenariosChanged);
        }
        removed
    }

    // ------------------------------------------------------------------
    // Settings and transient UI state
    // ------------------------------------------------------------------

    pub fn update_settings(&self, settings: Settings) {
        self.lock().settings = settings;
        self.bus.dispatch(StateEvent::SettingsChanged);
    }

    pub fn set_active_tab(&self, tab: SidebarTab) {
        self.lock().active_tab = tab;
    }

    pub fn set_sidebar_visible(&self, visible: bool) {
        self.lock().sidebar_visible = visible;
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
