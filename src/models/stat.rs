//! Additive counting statistics.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Rink area a shot was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Zone {
    Slot,
    Left,
    Right,
    BlueLine,
    NeutralZone,
}

impl Zone {
    pub const ALL: [Zone; 5] = [
        Zone::Slot,
        Zone::Left,
        Zone::Right,
        Zone::BlueLine,
        Zone::NeutralZone,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Zone::Slot => "slot",
            Zone::Left => "left",
            Zone::Right => "right",
            Zone::BlueLine => "blue_line",
            Zone::NeutralZone => "neutral_zone",
        }
    }
}

/// All shot attempts, or shots on goal only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShotKind {
    Attempts,
    OnGoal,
}

impl ShotKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShotKind::Attempts => "shots",
            ShotKind::OnGoal => "sog",
        }
    }
}

/// Whether a count belongs to the entity or its opponents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Side {
    For,
    Against,
}

/// A per-zone shot count, e.g. `slot_sog_against`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ZoneStat {
    pub zone: Zone,
    pub kind: ShotKind,
    pub side: Side,
}

impl ZoneStat {
    pub fn new(zone: Zone, kind: ShotKind, side: Side) -> Self {
        Self { zone, kind, side }
    }

    /// Every zone/kind/side combination.
    pub fn all() -> impl Iterator<Item = ZoneStat> {
        Zone::ALL.into_iter().flat_map(|zone| {
            [ShotKind::Attempts, ShotKind::OnGoal]
                .into_iter()
                .flat_map(move |kind| {
                    [Side::For, Side::Against]
                        .into_iter()
                        .map(move |side| ZoneStat::new(zone, kind, side))
                })
        })
    }

    /// Zone counts of one side only.
    pub fn for_side(side: Side) -> impl Iterator<Item = ZoneStat> {
        Self::all().filter(move |z| z.side == side)
    }

    fn parse(s: &str) -> Option<Self> {
        let (rest, side) = match s.strip_suffix("_against") {
            Some(rest) => (rest, Side::Against),
            None => (s, Side::For),
        };
        let (zone, kind) = if let Some(z) = rest.strip_suffix("_shots") {
            (z, ShotKind::Attempts)
        } else if let Some(z) = rest.strip_suffix("_sog") {
            (z, ShotKind::OnGoal)
        } else {
            return None;
        };
        let zone = Zone::ALL.into_iter().find(|candidate| candidate.as_str() == zone)?;
        Some(Self::new(zone, kind, side))
    }
}

impl fmt::Display for ZoneStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.zone.as_str(), self.kind.as_str())?;
        if self.side == Side::Against {
            write!(f, "_against")?;
        }
        Ok(())
    }
}

/// A counting statistic that is summed across games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Stat {
    GamesPlayed,
    Goals,
    Assists,
    PrimaryAssists,
    SecondaryAssists,
    Points,
    PlusMinus,
    PenaltyMinutes,
    ShotsOnGoal,
    ShotsMissed,
    ShotsBlocked,
    /// Shots on goal against.
    ShotsAgainst,
    ShotsMissedAgainst,
    ShotsBlockedAgainst,
    GoalsAgainst,
    /// Ice time in seconds.
    TimeOnIce,
    FaceoffsWon,
    FaceoffsLost,
    Wins,
    Losses,
    OtWins,
    OtLosses,
    SoWins,
    SoLosses,
    PpGoals,
    PpOpportunities,
    PpGoalsAgainst,
    ShGoals,
    ShOpportunities,
    Attendance,
    Capacity,
    Zone(ZoneStat),
}

const NAMED_STATS: [(Stat, &str); 31] = [
    (Stat::GamesPlayed, "games_played"),
    (Stat::Goals, "goals"),
    (Stat::Assists, "assists"),
    (Stat::PrimaryAssists, "primary_assists"),
    (Stat::SecondaryAssists, "secondary_assists"),
    (Stat::Points, "points"),
    (Stat::PlusMinus, "plus_minus"),
    (Stat::PenaltyMinutes, "penalty_minutes"),
    (Stat::ShotsOnGoal, "shots_on_goal"),
    (Stat::ShotsMissed, "shots_missed"),
    (Stat::ShotsBlocked, "shots_blocked"),
    (Stat::ShotsAgainst, "shots_against"),
    (Stat::ShotsMissedAgainst, "shots_missed_against"),
    (Stat::ShotsBlockedAgainst, "shots_blocked_against"),
    (Stat::GoalsAgainst, "goals_against"),
    (Stat::TimeOnIce, "time_on_ice"),
    (Stat::FaceoffsWon, "faceoffs_won"),
    (Stat::FaceoffsLost, "faceoffs_lost"),
    (Stat::Wins, "wins"),
    (Stat::Losses, "losses"),
    (Stat::OtWins, "ot_wins"),
    (Stat::OtLosses, "ot_losses"),
    (Stat::SoWins, "so_wins"),
    (Stat::SoLosses, "so_losses"),
    (Stat::PpGoals, "pp_goals"),
    (Stat::PpOpportunities, "pp_opportunities"),
    (Stat::PpGoalsAgainst, "pp_goals_against"),
    (Stat::ShGoals, "sh_goals"),
    (Stat::ShOpportunities, "sh_opportunities"),
    (Stat::Attendance, "attendance"),
    (Stat::Capacity, "capacity"),
];

impl Stat {
    /// Stable snake_case column name.
    pub fn name(&self) -> String {
        self.to_string()
    }

    /// Whether the source files carry this stat as a fractional number.
    pub fn is_fractional(&self) -> bool {
        matches!(self, Stat::TimeOnIce)
    }

    /// Every stat, named ones first, then zone counts.
    pub fn all() -> impl Iterator<Item = Stat> {
        NAMED_STATS
            .iter()
            .map(|(stat, _)| *stat)
            .chain(ZoneStat::all().map(Stat::Zone))
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Stat::Zone(zone) = self {
            return write!(f, "{}", zone);
        }
        let name = NAMED_STATS
            .iter()
            .find(|(stat, _)| stat == self)
            .map(|(_, name)| *name)
            .unwrap_or("unknown");
        write!(f, "{}", name)
    }
}

impl FromStr for Stat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NAMED_STATS
            .iter()
            .find(|(_, name)| *name == s)
            .map(|(stat, _)| *stat)
            .or_else(|| ZoneStat::parse(s).map(Stat::Zone))
            .ok_or_else(|| format!("unknown stat: {}", s))
    }
}

impl TryFrom<String> for Stat {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Stat> for String {
    fn from(stat: Stat) -> Self {
        stat.to_string()
    }
}

/// Summed counting stats for one row or one group.
///
/// Absent stats read as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatLine(BTreeMap<Stat, f64>);

impl StatLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// A line with every given stat present and zero.
    pub fn zeroed(fields: &[Stat]) -> Self {
        Self(fields.iter().map(|stat| (*stat, 0.0)).collect())
    }

    pub fn get(&self, stat: Stat) -> f64 {
        self.0.get(&stat).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, stat: Stat, value: f64) {
        self.0.insert(stat, value);
    }

    pub fn contains(&self, stat: Stat) -> bool {
        self.0.contains_key(&stat)
    }

    /// Add `value` into `stat`.
    pub fn add(&mut self, stat: Stat, value: f64) {
        *self.0.entry(stat).or_insert(0.0) += value;
    }

    /// Add the given fields of `other` into this line.
    pub fn add_fields(&mut self, other: &StatLine, fields: &[Stat]) {
        for stat in fields {
            self.add(*stat, other.get(*stat));
        }
    }

    /// Add every stat of `other` into this line.
    pub fn merge(&mut self, other: &StatLine) {
        for (stat, value) in &other.0 {
            self.add(*stat, *value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Stat, f64)> + '_ {
        self.0.iter().map(|(stat, value)| (*stat, *value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Stat, f64)> for StatLine {
    fn from_iter<I: IntoIterator<Item = (Stat, f64)>>(iter: I) -> Self {
        let mut line = StatLine::new();
        for (stat, value) in iter {
            line.add(stat, value);
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_names_round_trip_through_parse() {
        for stat in Stat::all() {
            let parsed: Stat = stat.name().parse().unwrap();
            assert_eq!(parsed, stat, "{}", stat);
        }
    }

    #[test]
    fn test_zone_stat_names() {
        let stat = Stat::Zone(ZoneStat::new(Zone::BlueLine, ShotKind::OnGoal, Side::Against));
        assert_eq!(stat.name(), "blue_line_sog_against");

        let stat: Stat = "neutral_zone_shots".parse().unwrap();
        assert_eq!(
            stat,
            Stat::Zone(ZoneStat::new(Zone::NeutralZone, ShotKind::Attempts, Side::For))
        );
    }

    #[test]
    fn test_unknown_stat() {
        assert!("hits".parse::<Stat>().is_err());
        assert!("crease_shots".parse::<Stat>().is_err());
    }

    #[test]
    fn test_zone_stat_count() {
        assert_eq!(ZoneStat::all().count(), 20);
        assert_eq!(ZoneStat::for_side(Side::For).count(), 10);
        assert_eq!(Stat::all().count(), 51);
    }

    #[test]
    fn test_stat_serializes_as_name() {
        let json = serde_json::to_string(&Stat::ShotsOnGoal).unwrap();
        assert_eq!(json, "\"shots_on_goal\"");
    }

    #[test]
    fn test_stat_line_missing_reads_zero() {
        let line = StatLine::new();
        assert_eq!(line.get(Stat::Goals), 0.0);
        assert!(!line.contains(Stat::Goals));
    }

    #[test]
    fn test_stat_line_add_fields_only_copies_selected() {
        let mut a = StatLine::zeroed(&[Stat::Goals]);
        let b: StatLine = [(Stat::Goals, 2.0), (Stat::Assists, 1.0)].into_iter().collect();

        a.add_fields(&b, &[Stat::Goals]);

        assert_eq!(a.get(Stat::Goals), 2.0);
        assert!(!a.contains(Stat::Assists));
    }

    #[test]
    fn test_stat_line_merge() {
        let mut a: StatLine = [(Stat::Goals, 2.0)].into_iter().collect();
        let b: StatLine = [(Stat::Goals, 3.0), (Stat::Assists, 1.0)].into_iter().collect();

        a.merge(&b);

        assert_eq!(a.get(Stat::Goals), 5.0);
        assert_eq!(a.get(Stat::Assists), 1.0);
    }
}
