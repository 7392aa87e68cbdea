//! Column typing and row assembly shared by the CSV and JSON readers.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde_json::Value;
use tracing::debug;

use crate::models::{
    season_for_date, EntityId, GameRecord, HomeRoad, Identity, SeasonType, Stat, StatLine,
};

/// Boolean situation columns carried on game rows.
pub const SITUATION_COLUMNS: [&str; 3] = ["overtime", "shootout", "back_to_back"];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d.%m.%Y", "%Y/%m/%d"];

/// Declared type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Float,
    Boolean,
    String,
}

/// Type of a known column, or `None` for columns the reader ignores.
pub fn column_type(column: &str) -> Option<ColumnType> {
    match column {
        "player_id" | "entity_id" | "id" | "age" | "season" | "round" => Some(ColumnType::Integer),
        "team" | "name" | "position" | "country" | "game_date" | "date" | "season_type"
        | "home_road" => Some(ColumnType::String),
        c if SITUATION_COLUMNS.contains(&c) => Some(ColumnType::Boolean),
        c => c.parse::<Stat>().ok().map(|stat| {
            if stat.is_fractional() {
                ColumnType::Float
            } else {
                ColumnType::Integer
            }
        }),
    }
}

/// A typed cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Text(String),
}

impl CellValue {
    /// Parse raw text as `ty`. Empty text is [`CellValue::Empty`]; text that
    /// does not parse as the column type is `None`.
    pub fn parse(text: &str, ty: ColumnType) -> Option<CellValue> {
        let text = text.trim();
        if text.is_empty() {
            return Some(CellValue::Empty);
        }
        match ty {
            ColumnType::Integer => text.parse().ok().map(CellValue::Integer),
            ColumnType::Float => text
                .replace(',', ".")
                .parse()
                .ok()
                .map(CellValue::Float),
            ColumnType::Boolean => parse_bool(text).map(CellValue::Boolean),
            ColumnType::String => Some(CellValue::Text(text.to_string())),
        }
    }

    /// Convert a JSON value to `ty`, accepting numbers given as strings.
    pub fn from_json(value: &Value, ty: ColumnType) -> Option<CellValue> {
        match (value, ty) {
            (Value::Null, _) => Some(CellValue::Empty),
            (Value::String(s), _) => CellValue::parse(s, ty),
            (Value::Bool(b), ColumnType::Boolean) => Some(CellValue::Boolean(*b)),
            (Value::Number(n), ColumnType::Integer) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
                .map(CellValue::Integer),
            (Value::Number(n), ColumnType::Float) => n.as_f64().map(CellValue::Float),
            (Value::Number(n), ColumnType::Boolean) => n.as_i64().map(|i| CellValue::Boolean(i != 0)),
            (Value::Number(n), ColumnType::String) => Some(CellValue::Text(n.to_string())),
            _ => None,
        }
    }

    fn as_f64(&self) -> f64 {
        match self {
            CellValue::Integer(i) => *i as f64,
            CellValue::Float(f) => *f,
            CellValue::Boolean(b) => f64::from(u8::from(*b)),
            CellValue::Empty | CellValue::Text(_) => 0.0,
        }
    }

    fn into_text(self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Integer(i) => Some(i.to_string()),
            CellValue::Float(f) => Some(f.to_string()),
            CellValue::Boolean(b) => Some(b.to_string()),
            CellValue::Text(s) => Some(s),
        }
    }

    fn as_u32(&self) -> Option<u32> {
        match self {
            CellValue::Integer(i) => u32::try_from(*i).ok(),
            _ => None,
        }
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "x" => Some(true),
        "false" | "0" | "no" | "n" => Some(false),
        _ => None,
    }
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}

/// Row counts of one parsed dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub total: usize,
    pub kept: usize,
    pub dropped: usize,
}

impl ParseStats {
    pub fn record(&mut self, kept: bool) {
        self.total += 1;
        if kept {
            self.kept += 1;
        } else {
            self.dropped += 1;
        }
    }
}

/// Accumulates typed cells of one row into a [`GameRecord`].
#[derive(Debug, Default)]
pub struct RowBuilder {
    entity_id: Option<String>,
    team: Option<String>,
    identity: Identity,
    game_date: Option<NaiveDate>,
    season: Option<u16>,
    season_type: SeasonType,
    home_road: Option<HomeRoad>,
    round: Option<u32>,
    situations: BTreeMap<String, bool>,
    stats: StatLine,
    invalid: bool,
}

impl RowBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw text cell and record it.
    pub fn push_text(&mut self, column: &str, text: &str) {
        let Some(ty) = column_type(column) else {
            return;
        };
        match CellValue::parse(text, ty) {
            Some(value) => self.set(column, value),
            None => self.reject(column, text),
        }
    }

    /// Convert a JSON cell and record it.
    pub fn push_json(&mut self, column: &str, value: &Value) {
        let Some(ty) = column_type(column) else {
            return;
        };
        match CellValue::from_json(value, ty) {
            Some(cell) => self.set(column, cell),
            None => self.reject(column, &value.to_string()),
        }
    }

    fn reject(&mut self, column: &str, raw: &str) {
        debug!("Unparsable value {:?} in column {}", raw, column);
        self.invalid = true;
    }

    /// Record a typed value for `column`.
    pub fn set(&mut self, column: &str, value: CellValue) {
        match column {
            "player_id" | "entity_id" | "id" => self.entity_id = value.into_text(),
            "team" => self.team = value.into_text(),
            "name" => self.identity.name = value.into_text().unwrap_or_default(),
            "position" => self.identity.position = value.into_text(),
            "country" => self.identity.country = value.into_text(),
            "age" => self.identity.age = value.as_u32(),
            "season" => self.season = value.as_u32().and_then(|s| u16::try_from(s).ok()),
            "round" => self.round = value.as_u32(),
            "season_type" => {
                if let Some(tag) = value.into_text() {
                    self.season_type = SeasonType::from_tag(&tag);
                }
            }
            "home_road" => match value.into_text() {
                Some(tag) => {
                    self.home_road = HomeRoad::from_tag(&tag);
                    if self.home_road.is_none() {
                        self.reject(column, &tag);
                    }
                }
                None => self.home_road = None,
            },
            "game_date" | "date" => match value.into_text() {
                Some(text) => {
                    self.game_date = parse_date(&text);
                    if self.game_date.is_none() {
                        self.reject(column, &text);
                    }
                }
                None => self.game_date = None,
            },
            c if SITUATION_COLUMNS.contains(&c) => {
                if let CellValue::Boolean(flag) = value {
                    self.situations.insert(c.to_string(), flag);
                }
            }
            c => {
                if let Ok(stat) = c.parse::<Stat>() {
                    self.stats.set(stat, value.as_f64());
                }
            }
        }
    }

    /// Finish the row. Returns `None` when a cell failed to parse or the
    /// entity id, team or game date is missing. Team rows without an id use
    /// the team code as entity id.
    pub fn finish(self, default_season: Option<u16>) -> Option<GameRecord> {
        if self.invalid {
            return None;
        }
        let team = self.team.filter(|t| !t.is_empty())?;
        let entity_id = self
            .entity_id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| team.clone());
        let game_date = self.game_date?;

        Some(GameRecord {
            entity_id: EntityId::new(entity_id),
            team,
            identity: self.identity,
            game_date,
            season: self
                .season
                .or(default_season)
                .unwrap_or_else(|| season_for_date(game_date)),
            season_type: self.season_type,
            home_road: self.home_road.unwrap_or(HomeRoad::Home),
            round: self.round,
            situations: self.situations,
            stats: self.stats,
        })
    }
}
