//! Addressable table columns.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{DerivedRecord, Metric, Stat};

/// Any column a table can display or sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Field {
    Name,
    Team,
    Position,
    Age,
    Country,
    Stat(Stat),
    Metric(Metric),
}

impl Field {
    /// Categorical columns read naturally in ascending order.
    pub fn is_categorical(&self) -> bool {
        matches!(
            self,
            Field::Name | Field::Team | Field::Position | Field::Country
        )
    }

    /// Value of this column for a record.
    pub fn value(&self, record: &DerivedRecord) -> FieldValue {
        let identity = &record.record.identity;
        match self {
            Field::Name => FieldValue::Text(identity.name.clone()),
            Field::Team => FieldValue::Text(record.record.team.clone()),
            Field::Position => identity
                .position
                .clone()
                .map(FieldValue::Text)
                .unwrap_or(FieldValue::Missing),
            Field::Age => identity
                .age
                .map(|age| FieldValue::Number(f64::from(age)))
                .unwrap_or(FieldValue::Missing),
            Field::Country => identity
                .country
                .clone()
                .map(FieldValue::Text)
                .unwrap_or(FieldValue::Missing),
            Field::Stat(stat) => FieldValue::Number(record.record.stats.get(*stat)),
            Field::Metric(metric) => FieldValue::Number(record.metric(*metric)),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Name => write!(f, "name"),
            Field::Team => write!(f, "team"),
            Field::Position => write!(f, "position"),
            Field::Age => write!(f, "age"),
            Field::Country => write!(f, "country"),
            Field::Stat(stat) => write!(f, "{}", stat),
            Field::Metric(metric) => write!(f, "{}", metric),
        }
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "name" => return Ok(Field::Name),
            "team" => return Ok(Field::Team),
            "position" => return Ok(Field::Position),
            "age" => return Ok(Field::Age),
            "country" => return Ok(Field::Country),
            _ => {}
        }
        if let Ok(stat) = s.parse::<Stat>() {
            return Ok(Field::Stat(stat));
        }
        s.parse::<Metric>()
            .map(Field::Metric)
            .map_err(|_| format!("unknown field: {}", s))
    }
}

impl TryFrom<String> for Field {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Field> for String {
    fn from(field: Field) -> Self {
        field.to_string()
    }
}

impl From<Stat> for Field {
    fn from(stat: Stat) -> Self {
        Field::Stat(stat)
    }
}

impl From<Metric> for Field {
    fn from(metric: Metric) -> Self {
        Field::Metric(metric)
    }
}

/// A column value with a total order: `Missing < Number < Text`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Missing,
    Number(f64),
    Text(String),
}

impl FieldValue {
    fn rank(&self) -> u8 {
        match self {
            FieldValue::Missing => 0,
            FieldValue::Number(_) => 1,
            FieldValue::Text(_) => 2,
        }
    }

    pub fn total_cmp(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::Number(a), FieldValue::Number(b)) => a.total_cmp(b),
            (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Missing => write!(f, "-"),
            FieldValue::Number(n) if n.fract() == 0.0 => write!(f, "{}", n),
            FieldValue::Number(n) => write!(f, "{:.2}", n),
            FieldValue::Text(s) => write!(f, "{}", s),
        }
    }
}
