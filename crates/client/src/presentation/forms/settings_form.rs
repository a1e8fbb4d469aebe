//! Settings form.
//!
//! Saving is local (key-value storage plus state), so unlike the entity
//! forms there is no round trip that can fail; the connection test is
//! the only network operation here and is explicitly user-triggered.

use taleforge_domain::Settings;

use crate::application::dto::TestConnectionRequest;
use crate::application::services::{SettingsService, SystemService};
use crate::state::{AppState, Notifier};

pub struct SettingsForm {
    settings: SettingsService,
    system: SystemService,
    state: AppState,
    notifier: Notifier,
    open: bool,
    pub fields: Settings,
    testing: bool,
}

impl SettingsForm {
    pub fn new(
        settings: SettingsService,
        system: SystemService,
        state: AppState,
        notifier: Notifier,
    ) -> Self {
        Self {
            settings,
            system,
            state,
            notifier,
            open: false,
            fields: Settings::default(),
            testing: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Open pre-filled with the current settings.
    pub fn open(&mut self) {
        self.fields = self.state.settings();
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Persist and apply. Storage writes are best-effort, so this
    /// always succeeds from the user's point of view.
    pub fn save(&mut self) {
        self.settings.save(&self.fields);
        self.state.update_settings(self.fields.clone());
        self.notifier.success("Settings saved");
        self.close();
    }

    /// Check the entered key and model against the provider without
    /// saving anything.
    pub async fn test_connection(&mut self) -> bool {
        if self.testing {
            return false;
        }
        self.testing = true;
        let _guard = self.notifier.begin_loading();
        let request = TestConnectionRequest {
            api_key: self.fields.api_key.clone(),
            model: self.fields.model.clone(),
            local_model_url: self
                .fields
                .use_local_model
                .then(|| self.fields.local_model_url.clone()),
        };
        let outcome = self.system.test_connection(&request).await;
        self.testing = false;

        match outcome {
            Ok(result) if result.success => {
                self.notifier.success(result.message);
                true
            }
            Ok(result) => {
                self.notifier.error(result.message);
                false
            }
            Err(error) => {
                self.notifier.error(error.user_message());
                false
            }
        }
    }
}
