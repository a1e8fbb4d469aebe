//! Storage port - durable key-value preference storage.

/// Key-value storage for user preferences.
///
/// Matches the semantics of browser local storage: string keys, string
/// values, best-effort durability. Implementations must not panic on
/// write failure; they log and move on.
pub trait StorageProvider: Send + Sync {
    fn save(&self, key: &str, value: &str);
    fn load(&self, key: &str) -> Option<String>;
    fn remove(&self, key: &str);
}

/// The persisted preference keys. Names match the entries the original
/// client kept in browser storage, so an existing profile reads back
/// cleanly.
pub mod storage_keys {
    pub const API_KEY: &str = "apiKey";
    pub const MODEL: &str = "model";
    pub const USE_LOCAL_MODEL: &str = "useLocalModel";
    pub const LOCAL_MODEL_URL: &str = "localModelUrl";
    pub const THEME: &str = "theme";
    pub const FONT_SIZE: &str = "fontSize";
    pub const MESSAGE_DISPLAY: &str = "messageDisplay";
    pub const TEMPERATURE: &str = "temperature";
    pub const RESPONSE_LENGTH: &str = "responseLength";
    pub const CONVERSATION_MEMORY: &str = "conversationMemory";
    pub const INTERACTION_MODE: &str = "interactionMode";

    /// Every key the settings store reads and writes.
    pub const ALL: &[&str] = &[
        API_KEY,
        MODEL,
        USE_LOCAL_MODEL,
        LOCAL_MODEL_URL,
        THEME,
        FONT_SIZE,
        MESSAGE_DISPLAY,
        TEMPERATURE,
        RESPONSE_LENGTH,
        CONVERSATION_MEMORY,
        INTERACTION_MODE,
    ];
}
