//! Scenario grid projection for the homepage.

use taleforge_domain::Scenario;

use crate::state::AppState;

use super::list::{ListItem, RenderedList};

pub const EMPTY_PLACEHOLDER: &str = "No scenarios yet";

pub fn render(state: &AppState) -> RenderedList {
    let scenarios = state.scenarios();
    if scenarios.is_empty() {
        return RenderedList::Placeholder(EMPTY_PLACEHOLDER);
    }
    RenderedList::Items(scenarios.iter().map(card).collect())
}

fn card(scenario: &Scenario) -> ListItem {
    ListItem {
        id: scenario.id.as_str().to_string(),
        title: scenario.title.clone(),
        subtitle: scenario.description.clone(),
        active: false,
        can_edit: true,
        can_delete: true,
    }
}
