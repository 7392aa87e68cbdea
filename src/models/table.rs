//! Table variants and the stat sets they aggregate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Field, Grouping, Metric, ShotKind, Side, Stat, Zone, ZoneStat};

/// A statistics table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    #[default]
    Skaters,
    Goalies,
    Teams,
}

impl TableKind {
    pub const ALL: [TableKind; 3] = [TableKind::Skaters, TableKind::Goalies, TableKind::Teams];

    pub fn as_str(&self) -> &'static str {
        match self {
            TableKind::Skaters => "skaters",
            TableKind::Goalies => "goalies",
            TableKind::Teams => "teams",
        }
    }

    pub fn grouping(&self) -> Grouping {
        match self {
            TableKind::Skaters | TableKind::Goalies => Grouping::EntityTeam,
            TableKind::Teams => Grouping::Team,
        }
    }

    /// Additive stats summed for this table.
    pub fn fields(&self) -> Vec<Stat> {
        match self {
            TableKind::Skaters => {
                let mut fields = vec![
                    Stat::GamesPlayed,
                    Stat::Goals,
                    Stat::Assists,
                    Stat::PrimaryAssists,
                    Stat::SecondaryAssists,
                    Stat::Points,
                    Stat::PlusMinus,
                    Stat::PenaltyMinutes,
                    Stat::ShotsOnGoal,
                    Stat::ShotsMissed,
                    Stat::ShotsBlocked,
                    Stat::ShotsAgainst,
                    Stat::ShotsMissedAgainst,
                    Stat::ShotsBlockedAgainst,
                    Stat::GoalsAgainst,
                    Stat::TimeOnIce,
                    Stat::FaceoffsWon,
                    Stat::FaceoffsLost,
                    Stat::PpGoals,
                    Stat::ShGoals,
                ];
                fields.extend(ZoneStat::for_side(Side::For).map(Stat::Zone));
                fields
            }
            TableKind::Goalies => vec![
                Stat::GamesPlayed,
                Stat::TimeOnIce,
                Stat::GoalsAgainst,
                Stat::ShotsAgainst,
                Stat::Wins,
                Stat::Losses,
                Stat::OtLosses,
                Stat::SoWins,
                Stat::SoLosses,
                Stat::Goals,
                Stat::Assists,
                Stat::Points,
                Stat::PenaltyMinutes,
            ],
            TableKind::Teams => {
                let mut fields = vec![
                    Stat::GamesPlayed,
                    Stat::Points,
                    Stat::Wins,
                    Stat::Losses,
                    Stat::OtWins,
                    Stat::OtLosses,
                    Stat::SoWins,
                    Stat::SoLosses,
                    Stat::Goals,
                    Stat::GoalsAgainst,
                    Stat::ShotsOnGoal,
                    Stat::ShotsMissed,
                    Stat::ShotsBlocked,
                    Stat::ShotsAgainst,
                    Stat::ShotsMissedAgainst,
                    Stat::ShotsBlockedAgainst,
                    Stat::TimeOnIce,
                    Stat::FaceoffsWon,
                    Stat::FaceoffsLost,
                    Stat::PenaltyMinutes,
                    Stat::PpGoals,
                    Stat::PpOpportunities,
                    Stat::PpGoalsAgainst,
                    Stat::ShGoals,
                    Stat::ShOpportunities,
                    Stat::Attendance,
                    Stat::Capacity,
                ];
                fields.extend(ZoneStat::all().map(Stat::Zone));
                fields
            }
        }
    }

    /// Columns shown in the rendered table, in order.
    pub fn display_columns(&self) -> Vec<Field> {
        match self {
            TableKind::Skaters => vec![
                Field::Name,
                Field::Team,
                Field::Position,
                Stat::GamesPlayed.into(),
                Stat::Goals.into(),
                Stat::Assists.into(),
                Stat::Points.into(),
                Stat::PlusMinus.into(),
                Stat::PenaltyMinutes.into(),
                Stat::ShotsOnGoal.into(),
                Metric::ShotPctg.into(),
                Metric::PointsPerGame.into(),
                Metric::PointsPer60.into(),
                Metric::TimeOnIcePerGame.into(),
                Metric::FaceoffPctg.into(),
                Metric::CorsiForPctg.into(),
                Metric::Pdo.into(),
                Metric::ZoneShare(ZoneStat::new(
                    Zone::Slot,
                    ShotKind::Attempts,
                    Side::For,
                ))
                .into(),
            ],
            TableKind::Goalies => vec![
                Field::Name,
                Field::Team,
                Stat::GamesPlayed.into(),
                Stat::Wins.into(),
                Stat::Losses.into(),
                Stat::ShotsAgainst.into(),
                Stat::GoalsAgainst.into(),
                Metric::SavePctg.into(),
                Metric::GoalsAgainstAverage.into(),
                Stat::TimeOnIce.into(),
            ],
            TableKind::Teams => vec![
                Field::Team,
                Field::Name,
                Stat::GamesPlayed.into(),
                Stat::Points.into(),
                Stat::Wins.into(),
                Stat::OtWins.into(),
                Stat::OtLosses.into(),
                Stat::Losses.into(),
                Stat::Goals.into(),
                Stat::GoalsAgainst.into(),
                Metric::GoalDifferential.into(),
                Metric::PtPctg.into(),
                Metric::PpPctg.into(),
                Metric::PkPctg.into(),
                Metric::ShotPctg.into(),
                Metric::SavePctg.into(),
                Metric::Pdo.into(),
                Metric::CorsiForPctg.into(),
                Metric::FenwickForPctg.into(),
                Metric::UtilizedCapacityPctg.into(),
            ],
        }
    }

    /// Column selected when a table is first shown.
    pub fn default_sort(&self) -> Field {
        match self {
            TableKind::Skaters | TableKind::Teams => Field::Stat(Stat::Points),
            TableKind::Goalies => Field::Metric(Metric::SavePctg),
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TableKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TableKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown table: {} (expected skaters, goalies or teams)", s))
    }
}
