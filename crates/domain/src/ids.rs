use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Backend ids are opaque strings (the server hands out short ids like
// "c1" as well as UUIDs), so ids wrap String rather than Uuid. `new()`
// mints a UUIDv4 string for entities created on the client.
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

// Core entity ids
define_id!(CharacterId);
define_id!(ChatId);
define_id!(ScenarioId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_as_plain_strings() {
        let id = CharacterId::from("c1");
        let json = serde_json::to_string(&id).expect("serialize id");
        assert_eq!(json, "\"c1\"");

        let back: CharacterId = serde_json::from_str(&json).expect("deserialize id");
        assert_eq!(back, id);
    }

    #[test]
    fn minted_ids_are_unique() {
        assert_ne!(ChatId::new(), ChatId::new());
    }
}
