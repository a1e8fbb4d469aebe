//! Scenario authoring form.
//!
//! The world-size selector gates which sections the form shows, and the
//! entity generators fill the size-appropriate number of entries.

use taleforge_domain::{NamedSection, Scenario, ScenarioId, WorldSize};

use crate::application::dto::GenerateEntitiesRequest;
use crate::application::services::ScenarioService;
use crate::state::{AppState, Notifier};

use super::SubmitOutcome;

/// Focus target for the required title field.
pub const TITLE_FIELD: &str = "scenario-title";

/// Which optional sections the form shows for the selected world size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionVisibility {
    pub conflicts: bool,
    pub settlements: bool,
    pub political_structure: bool,
    pub geography: bool,
    pub economy: bool,
}

impl SectionVisibility {
    pub fn for_size(size: WorldSize) -> Self {
        let large = size.shows_large_world_sections();
        Self {
            conflicts: size.shows_conflicts(),
            settlements: large,
            political_structure: large,
            geography: large,
            economy: large,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    Closed,
    Create,
    Edit(ScenarioId),
}

#[derive(Debug, Clone, Default)]
pub struct ScenarioFields {
    pub title: String,
    pub description: String,
    pub starting_location: String,
    pub world_size: WorldSize,
    pub world_rules: String,
    pub locations: Vec<NamedSection>,
    pub npcs: Vec<NamedSection>,
    pub conflicts: Vec<NamedSection>,
    pub settlements: Vec<NamedSection>,
    pub political_structure: String,
    pub geography: String,
    pub economy: String,
}

pub struct ScenarioForm {
    service: ScenarioService,
    state: AppState,
    notifier: Notifier,
    mode: Mode,
    pub fields: ScenarioFields,
    in_flight: bool,
}

impl ScenarioForm {
    pub fn new(service: ScenarioService, state: AppState, notifier: Notifier) -> Self {
        Self {
            service,
            state,
            notifier,
            mode: Mode::Closed,
            fields: ScenarioFields::default(),
            in_flight: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.mode != Mode::Closed
    }

    pub fn open_create(&mut self) {
        self.mode = Mode::Create;
        self.fields = ScenarioFields::default();
        self.in_flight = false;
    }

    pub fn open_edit(&mut self, scenario: &Scenario) {
        self.mode = Mode::Edit(scenario.id.clone());
        self.fields = ScenarioFields {
            title: scenario.title.clone(),
            description: scenario.description.clone(),
            starting_location: scenario.starting_location.clone(),
            world_size: scenario.world_size,
            world_rules: scenario.world_rules.clone(),
            locations: scenario.locations.clone(),
            npcs: scenario.npcs.clone(),
            conflicts: scenario.conflicts.clone(),
            settlements: scenario.settlements.clone(),
            political_structure: scenario.political_structure.clone(),
            geography: scenario.geography.clone(),
            economy: scenario.economy.clone(),
        };
        self.in_flight = false;
    }

    pub fn close(&mut self) {
        self.mode = Mode::Closed;
        self.in_flight = false;
    }

    /// Sections visible for the currently selected world size.
    pub fn visible_sections(&self) -> SectionVisibility {
        SectionVisibility::for_size(self.fields.world_size)
    }

    /// Changing the size never deletes authored content; hidden
    /// sections keep their entries and are simply dropped on submit.
    pub fn set_world_size(&mut self, size: WorldSize) {
        self.fields.world_size = size;
    }

    /// Fill one collection up to the size-suggested count.
    pub async fn generate_entities(&mut self, entity_type: &str) -> bool {
        let (existing, target) = match entity_type {
            "location" => (
                &self.fields.locations,
                self.fields.world_size.suggested_location_count(),
            ),
            "npc" => (
                &self.fields.npcs,
                self.fields.world_size.suggested_npc_count(),
            ),
            _ => (&self.fields.conflicts, 3),
        };
        let count = target.saturating_sub(existing.len());
        if count == 0 {
            return true;
        }
        let request = GenerateEntitiesRequest {
            entity_type: entity_type.to_string(),
            count: count as u32,
            context: serde_json::json!({
                "title": self.fields.title,
                "description": self.fields.description,
            }),
            existing_entities: existing.iter().map(|e| e.name.clone()).collect(),
        };

        let _guard = self.notifier.begin_loading();
        match self.service.generate_entities(&request).await {
            Ok(entities) => {
                let slot = match entity_type {
                    "location" => &mut self.fields.locations,
                    "npc" => &mut self.fields.npcs,
                    _ => &mut self.fields.conflicts,
                };
                slot.extend(entities);
                true
            }
            Err(error) => {
                self.notifier.error(error.user_message());
                false
            }
        }
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        if self.in_flight {
            return SubmitOutcome::InFlight;
        }
        let title = self.fields.title.trim();
        if title.is_empty() {
            self.notifier.error("Scenario title is required");
            return SubmitOutcome::Rejected { field: TITLE_FIELD };
        }

        let scenario = self.to_scenario(title);

        self.in_flight = true;
        let _guard = self.notifier.begin_loading();
        let result = match &self.mode {
            Mode::Edit(_) => self.service.update(&scenario).await,
            _ => self.service.create(&scenario).await,
        };
        self.in_flight = false;

        match result {
            Ok(saved) => {
                self.state.upsert_scenario(saved);
                self.close();
                self.notifier.success("Scenario saved");
                SubmitOutcome::Saved
            }
            Err(error) => {
                self.notifier.error(error.user_message());
                SubmitOutcome::Failed
            }
        }
    }

    /// Build the submission payload. Sections hidden at the selected
    /// size are sent empty, whatever the form still holds.
    fn to_scenario(&self, title: &str) -> Scenario {
        let visible = self.visible_sections();
        let mut scenario = Scenario::new(title, self.fields.world_size);
        if let Mode::Edit(id) = &self.mode {
            scenario.id = id.clone();
        }
        scenario.description = self.fields.description.clone();
        scenario.starting_location = self.fields.starting_location.clone();
        scenario.world_rules = self.fields.world_rules.clone();
        scenario.locations = self.fields.locations.clone();
        scenario.npcs = self.fields.npcs.clone();
        if visible.conflicts {
            scenario.conflicts = self.fields.conflicts.clone();
        }
        if visible.settlements {
            scenario.settlements = self.fields.settlements.clone();
            scenario.political_structure = self.fields.political_structure.clone();
            scenario.geography = self.fields.geography.clone();
            scenario.economy = self.fields.economy.clone();
        }
        scenario
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::ScriptedApi;
    use crate::state::StateBus;
    use serde_json::json;
    use std::sync::Arc;

    fn form(api: &ScriptedApi) -> ScenarioForm {
        let bus = StateBus::new();
        ScenarioForm::new(
            ScenarioService::new(Arc::new(api.clone())),
            AppState::new(bus.clone()),
            Notifier::new(bus),
        )
    }

    #[test]
    fn small_worlds_hide_every_gated_section() {
        let visible = SectionVisibility::for_size(WorldSize::Small);
        assert!(!visible.conflicts);
        assert!(!visible.settlements);
        assert!(!visible.political_structure);
        assert!(!visible.geography);
        assert!(!visible.economy);
    }

    #[test]
    fn medium_worlds_show_conflicts_only() {
        let visible = SectionVisibility::for_size(WorldSize::Medium);
        assert!(visible.conflicts);
        assert!(!visible.settlements);
        assert!(!visible.geography);
    }

    #[test]
    fn large_worlds_show_all_sections() {
        let visible = SectionVisibility::for_size(WorldSize::Large);
        assert!(visible.conflicts);
        assert!(visible.settlements);
        assert!(visible.political_structure);
        assert!(visible.geography);
        assert!(visible.economy);
    }

    #[tokio::test]
    async fn blank_title_is_rejected_locally() {
        let api = ScriptedApi::new();
        let mut form = form(&api);
        form.open_create();

        let outcome = form.submit().await;
        assert_eq!(outcome, SubmitOutcome::Rejected { field: TITLE_FIELD });
        assert!(api.sent().is_empty());
    }

    #[tokio::test]
    async fn hidden_sections_are_submitted_empty() {
        let api = ScriptedApi::new();
        api.respond("POST", "/api/scenarios", json!({"id": "s1", "title": "Hamlet"}));
        let mut form = form(&api);
        form.open_create();
        form.fields.title = "Hamlet".to_string();
        form.fields.conflicts = vec![NamedSection {
            name: "Feud".to_string(),
            description: String::new(),
        }];
        form.set_world_size(WorldSize::Small);

        form.submit().await;
        let sent = api.sent();
        let body = sent[0].body.clone().expect("request body");
        assert_eq!(body["conflicts"], json!([]));
        // The authored entries survive in the form for a later resize.
        assert_eq!(form.fields.conflicts.len(), 1);
    }

    #[tokio::test]
    async fn entity_generation_tops_up_to_the_suggested_count() {
        let api = ScriptedApi::new();
        api.respond(
            "POST",
            "/api/generate-entities",
            json!({"entities": [
                {"name": "The Broken Mill"},
                {"name": "Crow's Rest"}
            ]}),
        );
        let mut form = form(&api);
        form.open_create();
        form.fields.title = "Frontier".to_string();
        form.fields.locations = vec![NamedSection {
            name: "Village square".to_string(),
            description: String::new(),
        }];

        // Small world suggests 3 locations; 1 exists, so ask for 2.
        assert!(form.generate_entities("location").await);
        assert_eq!(form.fields.locations.len(), 3);
        let sent = api.sent();
        let body = sent[0].body.clone().expect("request body");
        assert_eq!(body["count"], 2);
        assert_eq!(body["existing_entities"], json!(["Village square"]));
    }
}
