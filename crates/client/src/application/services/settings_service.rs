//! Settings service - loads and saves user preferences through the
//! storage port.
//!
//! Load fills every missing or unparsable key with its built-in
//! default. Save writes each key individually and keeps going when a
//! single write fails; preference storage is best-effort, not
//! transactional.

use std::sync::Arc;

use taleforge_domain::Settings;

use crate::ports::outbound::{storage_keys, StorageProvider};

#[derive(Clone)]
pub struct SettingsService {
    storage: Arc<dyn StorageProvider>,
}

impl SettingsService {
    pub fn new(storage: Arc<dyn StorageProvider>) -> Self {
        Self { storage }
    }

    /// Last-saved settings, with defaults for any missing key.
    pub fn load(&self) -> Settings {
        let defaults = Settings::default();
        let get = |key: &str| self.storage.load(key);

        Settings {
            api_key: get(storage_keys::API_KEY).unwrap_or(defaults.api_key),
            model: get(storage_keys::MODEL).unwrap_or(defaults.model),
            use_local_model: get(storage_keys::USE_LOCAL_MODEL)
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.use_local_model),
            local_model_url: get(storage_keys::LOCAL_MODEL_URL).unwrap_or(defaults.local_model_url),
            theme: get(storage_keys::THEME).unwrap_or(defaults.theme),
            font_size: get(storage_keys::FONT_SIZE).unwrap_or(defaults.font_size),
            message_display: get(storage_keys::MESSAGE_DISPLAY).unwrap_or(defaults.message_display),
            temperature: get(storage_keys::TEMPERATURE)
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.temperature),
            response_length: get(storage_keys::RESPONSE_LENGTH).unwrap_or(defaults.response_length),
            conversation_memory: get(storage_keys::CONVERSATION_MEMORY)
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.conversation_memory),
            interaction_mode: get(storage_keys::INTERACTION_MODE)
                .unwrap_or(defaults.interaction_mode),
        }
    }

    /// Mirror settings back to storage, one key at a time.
    pub fn save(&self, settings: &Settings) {
        let pairs: [(&str, String); 11] = [
            (storage_keys::API_KEY, settings.api_key.clone()),
            (storage_keys::MODEL, settings.model.clone()),
            (
                storage_keys::USE_LOCAL_MODEL,
                settings.use_local_model.to_string(),
            ),
            (
                storage_keys::LOCAL_MODEL_URL,
                settings.local_model_url.clone(),
            ),
            (storage_keys::THEME, settings.theme.clone()),
            (storage_keys::FONT_SIZE, settings.font_size.clone()),
            (
                storage_keys::MESSAGE_DISPLAY,
                settings.message_display.clone(),
            ),
            (storage_keys::TEMPERATURE, settings.temperature.to_string()),
            (
                storage_keys::RESPONSE_LENGTH,
                settings.response_length.clone(),
            ),
            (
                storage_keys::CONVERSATION_MEMORY,
                settings.conversation_memory.to_string(),
            ),
            (
                storage_keys::INTERACTION_MODE,
                settings.interaction_mode.clone(),
            ),
        ];

        for (key, value) in pairs {
            // StorageProvider::save is infallible by contract; failing
            // backends log internally and continue.
            self.storage.save(key, &value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::MemoryStorage;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let storage = Arc::new(MemoryStorage::new());
        storage.save(storage_keys::THEME, "dark");

        let service = SettingsService::new(storage);
        let settings = service.load();
        assert_eq!(settings.theme, "dark");
        assert_eq!(settings.model, "openai/gpt-3.5-turbo");
        assert_eq!(settings.temperature, 0.7);
    }

    #[test]
    fn unparsable_numeric_key_falls_back() {
        let storage = Arc::new(MemoryStorage::new());
        storage.save(storage_keys::TEMPERATURE, "warm");
        storage.save(storage_keys::CONVERSATION_MEMORY, "-3");

        let service = SettingsService::new(storage);
        let settings = service.load();
        assert_eq!(settings.temperature, 0.7);
        assert_eq!(settings.conversation_memory, 10);
    }

    #[test]
    fn save_then_load_round_trips() {
        let storage = Arc::new(MemoryStorage::new());
        let service = SettingsService::new(storage);

        let mut settings = Settings::default();
        settings.theme = "dark".to_string();
        settings.temperature = 0.9;
        settings.conversation_memory = 25;
        service.save(&settings);

        assert_eq!(service.load(), settings);
    }
}
