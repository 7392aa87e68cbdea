//! Per-game rows as loaded from the season datasets.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::{EntityId, Stat, StatLine, TeamCode};

/// Part of the season a game belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SeasonType {
    #[default]
    RegularSeason,
    Playoffs,
    Other,
}

impl SeasonType {
    /// Parse the tag used in the source files. Unknown tags map to `Other`.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "regular" | "regular_season" | "rs" => SeasonType::RegularSeason,
            "playoffs" | "playoff" | "po" => SeasonType::Playoffs,
            _ => SeasonType::Other,
        }
    }
}

impl std::fmt::Display for SeasonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeasonType::RegularSeason => write!(f, "regular_season"),
            SeasonType::Playoffs => write!(f, "playoffs"),
            SeasonType::Other => write!(f, "other"),
        }
    }
}

/// Home or road side of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeRoad {
    Home,
    Road,
}

impl HomeRoad {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "home" | "h" => Some(HomeRoad::Home),
            "road" | "away" | "r" | "a" => Some(HomeRoad::Road),
            _ => None,
        }
    }
}

impl std::fmt::Display for HomeRoad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HomeRoad::Home => write!(f, "home"),
            HomeRoad::Road => write!(f, "road"),
        }
    }
}

/// Display attributes carried alongside the numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub position: Option<String>,
    pub age: Option<u32>,
    pub country: Option<String>,
}

/// One game's counting stats for one player or team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    /// Player id, or the team code for team rows
    pub entity_id: EntityId,

    /// Team the entity played for in this game
    pub team: TeamCode,

    #[serde(flatten)]
    pub identity: Identity,

    pub game_date: NaiveDate,

    pub season: u16,

    pub season_type: SeasonType,

    pub home_road: HomeRoad,

    /// Playoff or schedule round, when the source provides one
    pub round: Option<u32>,

    /// Named boolean situation flags (e.g. "overtime")
    #[serde(default)]
    pub situations: BTreeMap<String, bool>,

    pub stats: StatLine,
}

impl GameRecord {
    /// Create a row with default tags and no stats.
    pub fn new(
        entity_id: impl Into<EntityId>,
        team: impl Into<TeamCode>,
        game_date: NaiveDate,
    ) -> Self {
        Self {
            entity_id: entity_id.into(),
            team: team.into(),
            identity: Identity::default(),
            game_date,
            season: season_for_date(game_date),
            season_type: SeasonType::default(),
            home_road: HomeRoad::Home,
            round: None,
            situations: BTreeMap::new(),
            stats: StatLine::new(),
        }
    }

    /// Builder method to set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.identity.name = name.into();
        self
    }

    /// Builder method to set the season type.
    pub fn with_season_type(mut self, season_type: SeasonType) -> Self {
        self.season_type = season_type;
        self
    }

    /// Builder method to set home/road.
    pub fn with_home_road(mut self, home_road: HomeRoad) -> Self {
        self.home_road = home_road;
        self
    }

    /// Builder method to set the round.
    pub fn with_round(mut self, round: u32) -> Self {
        self.round = Some(round);
        self
    }

    /// Builder method to set a situation flag.
    pub fn with_situation(mut self, name: impl Into<String>, value: bool) -> Self {
        self.situations.insert(name.into(), value);
        self
    }

    /// Builder method to set a stat.
    pub fn with_stat(mut self, stat: Stat, value: f64) -> Self {
        self.stats.set(stat, value);
        self
    }

    pub fn weekday(&self) -> Weekday {
        self.game_date.weekday()
    }

    /// Value of a situation flag; absent flags are false.
    pub fn situation(&self, name: &str) -> bool {
        self.situations.get(name).copied().unwrap_or(false)
    }
}

/// Season a date falls in, named by its starting year.
///
/// Seasons start in August: a game on 2025-01-10 belongs to season 2024.
pub fn season_for_date(date: NaiveDate) -> u16 {
    let year = if date.month() >= 8 {
        date.year()
    } else {
        date.year() - 1
    };
    u16::try_from(year).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_season_type_from_tag() {
        assert_eq!(SeasonType::from_tag("regular"), SeasonType::RegularSeason);
        assert_eq!(SeasonType::from_tag("Playoffs"), SeasonType::Playoffs);
        assert_eq!(SeasonType::from_tag("preseason"), SeasonType::Other);
    }

    #[test]
    fn test_home_road_from_tag() {
        assert_eq!(HomeRoad::from_tag("home"), Some(HomeRoad::Home));
        assert_eq!(HomeRoad::from_tag("Away"), Some(HomeRoad::Road));
        assert_eq!(HomeRoad::from_tag("neutral"), None);
    }

    #[test]
    fn test_season_for_date() {
        assert_eq!(season_for_date(date(2024, 9, 20)), 2024);
        assert_eq!(season_for_date(date(2025, 3, 1)), 2024);
        assert_eq!(season_for_date(date(2025, 8, 1)), 2025);
    }

    #[test]
    fn test_game_record_builder() {
        let record = GameRecord::new("7", "MAN", date(2024, 10, 4))
            .with_name("Player Seven")
            .with_home_road(HomeRoad::Road)
            .with_round(3)
            .with_situation("overtime", true)
            .with_stat(Stat::Goals, 2.0);

        assert_eq!(record.entity_id.as_str(), "7");
        assert_eq!(record.identity.name, "Player Seven");
        assert_eq!(record.season, 2024);
        assert_eq!(record.round, Some(3));
        assert!(record.situation("overtime"));
        assert!(!record.situation("shootout"));
        assert_eq!(record.stats.get(Stat::Goals), 2.0);
        assert_eq!(record.weekday(), Weekday::Fri);
    }

    #[test]
    fn test_game_record_serialization() {
        let record = GameRecord::new("7", "MAN", date(2024, 10, 4)).with_stat(Stat::Goals, 1.0);

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: GameRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.entity_id, record.entity_id);
        assert_eq!(deserialized.stats.get(Stat::Goals), 1.0);
    }
}
