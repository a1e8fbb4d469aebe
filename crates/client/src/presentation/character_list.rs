//! Character list projection.

use taleforge_domain::Character;

use crate::state::AppState;

use super::list::{ListItem, RenderedList};

pub const EMPTY_PLACEHOLDER: &str = "No characters available";

/// Project the character collection for the sidebar.
///
/// The active flag comes from the current-character reference, so a
/// re-render after any mutation is a pure function of state.
pub fn render(state: &AppState) -> RenderedList {
    let characters = state.characters();
    if characters.is_empty() {
        return RenderedList::Placeholder(EMPTY_PLACEHOLDER);
    }
    let current = state.current_character().map(|c| c.id);
    RenderedList::Items(
        characters
            .iter()
            .map(|character| item(character, current.as_ref() == Some(&character.id)))
            .collect(),
    )
}

fn item(character: &Character, active: bool) -> ListItem {
    ListItem {
        id: character.id.as_str().to_string(),
        title: character.name.clone(),
        subtitle: character.category.clone(),
        active,
        can_edit: true,
        can_delete: true,
    }
}
