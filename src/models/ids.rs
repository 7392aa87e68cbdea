//! Identifiers for players and teams.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier of a player or team as it appears in the source datasets.
///
/// Player ids are numeric in the published files but are kept as strings so
/// team codes ("MAN", "BER") can share the same type in team-level views.
/// Deserializes from either a JSON string or an integer.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => Self(s),
            RawId::Number(n) => Self(n.to_string()),
        })
    }
}

impl EntityId {
    /// Create a new EntityId.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Team abbreviation, e.g. "MAN".
pub type TeamCode = String;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_serialization_is_transparent() {
        let id = EntityId::from("1234");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"1234\"");

        let deserialized: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_entity_id_display() {
        let id = EntityId::new("MAN");
        assert_eq!(format!("{}", id), "MAN");
    }

    #[test]
    fn test_entity_id_deserializes_from_integer() {
        let id: EntityId = serde_json::from_str("42").unwrap();
        assert_eq!(id.as_str(), "42");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"42\"");
    }

    #[test]
    fn test_entity_id_debug() {
        let id = EntityId::new("debug-test");
        let debug_str = format!("{:?}", id);
        assert!(debug_str.contains("debug-test"));
    }

    #[test]
    fn test_entity_id_ordering() {
        let mut ids = vec![EntityId::from("b"), EntityId::from("a")];
        ids.sort();
        assert_eq!(ids[0].as_str(), "a");
    }
}
