//! Chat view projection - header and transcript for the open chat.

use taleforge_domain::{CharacterPresentation, StatBlock, Turn};

use crate::state::AppState;

use super::chat_list::UNKNOWN_CHARACTER;

/// Everything the chat header shows: title, the character as it
/// currently presents (chat overlay merged over the entity), and the
/// stat panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatHeader {
    pub title: String,
    pub character_name: String,
    pub presentation: CharacterPresentation,
    pub location: String,
    pub stats: StatBlock,
}

/// Project the current chat, or `None` when no chat is open.
pub fn render(state: &AppState) -> Option<ChatHeader> {
    let chat = state.current_chat()?;
    let character = state.find_character(&chat.character_id);

    let (name, presentation, stats) = match &character {
        Some(character) => (
            character.name.clone(),
            chat.character_state.apply_to(character),
            character.effective_stats(),
        ),
        None => (
            UNKNOWN_CHARACTER.to_string(),
            CharacterPresentation {
                mood: chat.character_state.mood.clone().unwrap_or_default(),
                emotions: chat.character_state.emotions.clone().unwrap_or_default(),
                opinion_of_user: chat
                    .character_state
                    .opinion_of_user
                    .clone()
                    .unwrap_or_default(),
                action: chat.character_state.action.clone().unwrap_or_default(),
            },
            StatBlock::default(),
        ),
    };

    Some(ChatHeader {
        title: chat.title_or_default(&name),
        character_name: name,
        presentation,
        location: chat.location.clone(),
        stats,
    })
}

/// The transcript is the chat's turn list verbatim; turns are
/// append-only so the projection never reorders or edits them.
pub fn transcript(state: &AppState) -> Vec<Turn> {
    state
        .current_chat()
        .map(|chat| chat.conversations)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StateBus;
    use taleforge_domain::{Character, CharacterId, CharacterOverlay, ChatInstance};

    fn character(id: &str, name: &str) -> Character {
        let mut c = Character::new(name);
        c.id = CharacterId::from(id);
        c
    }

    #[test]
    fn no_open_chat_renders_nothing() {
        let state = AppState::new(StateBus::new());
        assert!(render(&state).is_none());
        assert!(transcript(&state).is_empty());
    }

    #[test]
    fn overlay_mood_overrides_the_character_mood() {
        let state = AppState::new(StateBus::new());
        state.set_characters(vec![character("c1", "Aria")]);

        let mut chat = ChatInstance::new(CharacterId::from("c1"));
        chat.character_state = CharacterOverlay {
            mood: Some("furious".to_string()),
            ..Default::default()
        };
        state.set_current_chat(Some(chat));

        let header = render(&state).expect("header");
        assert_eq!(header.title, "Chat with Aria");
        assert_eq!(header.presentation.mood, "furious");
        assert_eq!(header.presentation.action, "standing still");
        assert_eq!(header.stats, StatBlock::default());
    }

    #[test]
    fn an_orphaned_chat_degrades_instead_of_failing() {
        let state = AppState::new(StateBus::new());
        state.set_current_chat(Some(ChatInstance::new(CharacterId::from("gone"))));

        let header = render(&state).expect("header");
        assert_eq!(header.character_name, UNKNOWN_CHARACTER);
        assert_eq!(header.title, "Chat with Unknown character");
    }
}
