//! Saved-chat list projection.

use crate::state::AppState;

use super::list::{ListItem, RenderedList};

pub const EMPTY_PLACEHOLDER: &str = "No saved chats";

/// Subtitle shown when the chat's character no longer exists. The row
/// stays listed and deletable; only opening it is degraded.
pub const UNKNOWN_CHARACTER: &str = "Unknown character";

pub fn render(state: &AppState) -> RenderedList {
    let chats = state.chats();
    if chats.is_empty() {
        return RenderedList::Placeholder(EMPTY_PLACEHOLDER);
    }
    let current = state.current_chat().map(|c| c.id);
    RenderedList::Items(
        chats
            .iter()
            .map(|chat| {
                let character = state.find_character(&chat.character_id);
                let name = character
                    .as_ref()
                    .map_or(UNKNOWN_CHARACTER, |c| c.name.as_str());
                ListItem {
                    id: chat.id.as_str().to_string(),
                    title: chat.title_or_default(name),
                    subtitle: name.to_string(),
                    active: current.as_ref() == Some(&chat.id),
                    can_edit: true,
                    can_delete: true,
                }
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StateBus;
    use taleforge_domain::{Character, CharacterId, ChatId, ChatInstance};

    fn character(id: &str, name: &str) -> Character {
        let mut c = Character::new(name);
        c.id = CharacterId::from(id);
        c
    }

    fn chat(id: &str, character_id: &str) -> ChatInstance {
        let mut c = ChatInstance::new(CharacterId::from(character_id));
        c.id = ChatId::from(id);
        c
    }

    #[test]
    fn titles_fall_back_to_the_character_name() {
        let state = AppState::new(StateBus::new());
        state.set_characters(vec![character("c1", "Aria")]);
        state.set_chats(vec![chat("ch1", "c1")]);

        let rendered = render(&state);
        assert_eq!(rendered.items()[0].title, "Chat with Aria");
    }

    #[test]
    fn an_orphaned_chat_stays_listed_with_a_degraded_subtitle() {
        let state = AppState::new(StateBus::new());
        state.set_chats(vec![chat("ch1", "gone")]);

        let rendered = render(&state);
        let items = rendered.items();
        assert_eq!(items[0].subtitle, UNKNOWN_CHARACTER);
        assert!(items[0].can_delete);
    }

    #[test]
    fn empty_collection_renders_the_placeholder() {
        let state = AppState::new(StateBus::new());
        assert_eq!(render(&state), RenderedList::Placeholder(EMPTY_PLACEHOLDER));
    }
}
