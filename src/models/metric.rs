//! Derived (non-additive) statistics.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ZoneStat;

/// A statistic computed from summed counting stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Metric {
    GoalsPerGame,
    AssistsPerGame,
    PointsPerGame,
    ShotsOnGoalPerGame,
    PenaltyMinutesPerGame,
    /// Seconds of ice time per game.
    TimeOnIcePerGame,
    GoalsPer60,
    AssistsPer60,
    PointsPer60,
    ShotsOnGoalPer60,
    ShotPctg,
    SavePctg,
    GoalsAgainstAverage,
    FaceoffPctg,
    Pdo,
    CorsiForPctg,
    CorsiAgainstPctg,
    FenwickForPctg,
    FenwickAgainstPctg,
    PpPctg,
    PkPctg,
    PtPctg,
    GoalDifferential,
    UtilizedCapacityPctg,
    /// Share of a zone in the matching shot total.
    ZoneShare(ZoneStat),
}

const NAMED_METRICS: [(Metric, &str); 24] = [
    (Metric::GoalsPerGame, "goals_per_game"),
    (Metric::AssistsPerGame, "assists_per_game"),
    (Metric::PointsPerGame, "points_per_game"),
    (Metric::ShotsOnGoalPerGame, "shots_on_goal_per_game"),
    (Metric::PenaltyMinutesPerGame, "penalty_minutes_per_game"),
    (Metric::TimeOnIcePerGame, "time_on_ice_per_game"),
    (Metric::GoalsPer60, "goals_per_60"),
    (Metric::AssistsPer60, "assists_per_60"),
    (Metric::PointsPer60, "points_per_60"),
    (Metric::ShotsOnGoalPer60, "shots_on_goal_per_60"),
    (Metric::ShotPctg, "shot_pctg"),
    (Metric::SavePctg, "save_pctg"),
    (Metric::GoalsAgainstAverage, "goals_against_average"),
    (Metric::FaceoffPctg, "faceoff_pctg"),
    (Metric::Pdo, "pdo"),
    (Metric::CorsiForPctg, "corsi_for_pctg"),
    (Metric::CorsiAgainstPctg, "corsi_against_pctg"),
    (Metric::FenwickForPctg, "fenwick_for_pctg"),
    (Metric::FenwickAgainstPctg, "fenwick_against_pctg"),
    (Metric::PpPctg, "pp_pctg"),
    (Metric::PkPctg, "pk_pctg"),
    (Metric::PtPctg, "pt_pctg"),
    (Metric::GoalDifferential, "goal_differential"),
    (Metric::UtilizedCapacityPctg, "utilized_capacity_pctg"),
];

impl Metric {
    pub fn name(&self) -> String {
        self.to_string()
    }

    /// Every metric, named ones first, then zone shares.
    pub fn all() -> impl Iterator<Item = Metric> {
        NAMED_METRICS
            .iter()
            .map(|(metric, _)| *metric)
            .chain(ZoneStat::all().map(Metric::ZoneShare))
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Metric::ZoneShare(zone) = self {
            return write!(f, "{}_pctg", zone);
        }
        let name = NAMED_METRICS
            .iter()
            .find(|(metric, _)| metric == self)
            .map(|(_, name)| *name)
            .unwrap_or("unknown");
        write!(f, "{}", name)
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(metric) = NAMED_METRICS
            .iter()
            .find(|(_, name)| *name == s)
            .map(|(metric, _)| *metric)
        {
            return Ok(metric);
        }
        s.strip_suffix("_pctg")
            .and_then(|zone| ZoneStat::all().find(|z| z.to_string() == zone))
            .map(Metric::ZoneShare)
            .ok_or_else(|| format!("unknown metric: {}", s))
    }
}

impl TryFrom<String> for Metric {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Metric> for String {
    fn from(metric: Metric) -> Self {
        metric.to_string()
    }
}
