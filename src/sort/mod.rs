//! Multi-key ordering of derived records.
//!
//! A [`SortSpec`] is an ordered tie-break chain. Keys written with a leading
//! `+` sort ascending whatever the global direction is.

mod lookup;

pub use lookup::*;

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::{DerivedRecord, Field};

/// Global sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        }
    }
}

/// One entry of a tie-break chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SortKey {
    pub field: Field,
    pub always_ascending: bool,
}

impl SortKey {
    pub fn new(field: impl Into<Field>) -> Self {
        Self {
            field: field.into(),
            always_ascending: false,
        }
    }

    pub fn ascending(field: impl Into<Field>) -> Self {
        Self {
            field: field.into(),
            always_ascending: true,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.always_ascending {
            write!(f, "+")?;
        }
        write!(f, "{}", self.field)
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.strip_prefix('+') {
            Some(rest) => Ok(SortKey::ascending(rest.parse::<Field>()?)),
            None => Ok(SortKey::new(s.parse::<Field>()?)),
        }
    }
}

impl TryFrom<String> for SortKey {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<SortKey> for String {
    fn from(key: SortKey) -> Self {
        key.to_string()
    }
}

/// Tie-break chain plus global direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub keys: Vec<SortKey>,
    pub direction: Direction,
}

impl SortSpec {
    pub fn new(keys: Vec<SortKey>, direction: Direction) -> Self {
        Self { keys, direction }
    }

    /// Parse a comma-separated chain such as `"points,goals,+name"`.
    pub fn parse_chain(chain: &str, direction: Direction) -> Result<Self, String> {
        let keys = chain
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(str::parse)
            .collect::<Result<Vec<SortKey>, String>>()?;
        Ok(Self::new(keys, direction))
    }
}

/// Order two records by the first key on which they differ.
pub fn compare(a: &DerivedRecord, b: &DerivedRecord, spec: &SortSpec) -> Ordering {
    for key in &spec.keys {
        let ordering = key.field.value(a).total_cmp(&key.field.value(b));
        if ordering == Ordering::Equal {
            continue;
        }
        return if key.always_ascending {
            ordering
        } else {
            spec.direction.apply(ordering)
        };
    }
    Ordering::Equal
}

/// Stable in-place sort.
pub fn sort_records(records: &mut [DerivedRecord], spec: &SortSpec) {
    records.sort_by(|a, b| compare(a, b, spec));
}

/// Current column selection of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    column: Field,
    spec: SortSpec,
}

impl SortState {
    /// State with `column` selected and its default chain.
    pub fn new(column: Field) -> Self {
        Self {
            column,
            spec: lookup(column),
        }
    }

    pub fn column(&self) -> Field {
        self.column
    }

    pub fn spec(&self) -> &SortSpec {
        &self.spec
    }

    /// Select a column: a new column replaces the chain and resets the
    /// direction, the current column only flips the direction.
    pub fn select(&mut self, column: Field) {
        if column == self.column {
            self.spec.direction = self.spec.direction.flipped();
        } else {
            *self = SortState::new(column);
        }
    }
}
