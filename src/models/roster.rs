//! Roster lookup and column-header metadata.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{EntityId, GameRecord};

/// One player as listed on a season roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub country: Option<String>,
}

/// Season roster keyed by player id.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    entries: HashMap<EntityId, RosterEntry>,
}

impl Roster {
    pub fn new(entries: Vec<RosterEntry>) -> Self {
        Self {
            entries: entries.into_iter().map(|e| (e.id.clone(), e)).collect(),
        }
    }

    pub fn get(&self, id: &EntityId) -> Option<&RosterEntry> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fill identity fields of rows from the roster.
    ///
    /// Rows without a roster entry keep what they had. Returns the number of
    /// rows that matched.
    pub fn enrich(&self, records: &mut [GameRecord]) -> usize {
        let mut matched = 0;
        for record in records.iter_mut() {
            let Some(entry) = self.entries.get(&record.entity_id) else {
                continue;
            };
            matched += 1;
            let identity = &mut record.identity;
            if identity.name.is_empty() {
                identity.name = entry.name.clone();
            }
            if identity.position.is_none() {
                identity.position = entry.position.clone();
            }
            if identity.age.is_none() {
                identity.age = entry.age;
            }
            if identity.country.is_none() {
                identity.country = entry.country.clone();
            }
        }
        matched
    }
}

/// Display metadata for a table column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnHeader {
    /// Column key, matching a field name
    pub name: String,

    #[serde(alias = "abbr")]
    pub abbreviation: String,

    #[serde(default, alias = "desc")]
    pub description: String,
}

/// Abbreviation for a column, falling back to the column key.
pub fn header_label<'a>(headers: &'a [ColumnHeader], name: &'a str) -> &'a str {
    headers
        .iter()
        .find(|h| h.name == name)
        .map(|h| h.abbreviation.as_str())
        .unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(id: &str, name: &str) -> RosterEntry {
        RosterEntry {
            id: EntityId::from(id),
            name: name.to_string(),
            position: Some("D".to_string()),
            age: Some(27),
            country: Some("GER".to_string()),
        }
    }

    #[test]
    fn test_enrich_fills_missing_identity() {
        let roster = Roster::new(vec![entry("7", "Player Seven")]);
        let date = NaiveDate::from_ymd_opt(2024, 10, 1).unwrap();
        let mut rows = vec![
            GameRecord::new("7", "MAN", date),
            GameRecord::new("8", "MAN", date),
        ];

        let matched = roster.enrich(&mut rows);

        assert_eq!(matched, 1);
        assert_eq!(rows[0].identity.name, "Player Seven");
        assert_eq!(rows[0].identity.age, Some(27));
        assert_eq!(rows[1].identity.name, "");
    }

    #[test]
    fn test_enrich_keeps_existing_name() {
        let roster = Roster::new(vec![entry("7", "Roster Name")]);
        let date = NaiveDate::from_ymd_opt(2024, 10, 1).unwrap();
        let mut rows = vec![GameRecord::new("7", "MAN", date).with_name("Row Name")];

        roster.enrich(&mut rows);

        assert_eq!(rows[0].identity.name, "Row Name");
        assert_eq!(rows[0].identity.position.as_deref(), Some("D"));
    }

    #[test]
    fn test_column_header_aliases() {
        let json = r#"[{"name": "goals", "abbr": "G", "desc": "Goals scored"}]"#;
        let headers: Vec<ColumnHeader> = serde_json::from_str(json).unwrap();

        assert_eq!(headers[0].abbreviation, "G");
        assert_eq!(header_label(&headers, "goals"), "G");
        assert_eq!(header_label(&headers, "assists"), "assists");
    }
}
