//! Default tie-break chains per primary column.

use crate::models::{Field, Metric, Stat};

use super::{Direction, SortKey, SortSpec};

/// Direction a column starts in when selected.
pub fn default_direction(column: Field) -> Direction {
    match column {
        field if field.is_categorical() => Direction::Ascending,
        // lower is better
        Field::Metric(Metric::GoalsAgainstAverage) => Direction::Ascending,
        _ => Direction::Descending,
    }
}

/// Tie-break chain for a primary column, the column itself first.
pub fn lookup(column: Field) -> SortSpec {
    let chain: Vec<SortKey> = match column {
        Field::Name => vec![SortKey::new(Field::Name), SortKey::ascending(Field::Team)],
        Field::Team => vec![SortKey::new(Field::Team), SortKey::ascending(Field::Name)],
        Field::Position => vec![
            SortKey::new(Field::Position),
            SortKey::ascending(Field::Name),
            SortKey::ascending(Field::Team),
        ],
        Field::Stat(Stat::Points) => vec![
            SortKey::new(Stat::Points),
            SortKey::ascending(Stat::GamesPlayed),
            SortKey::new(Stat::Wins),
            SortKey::new(Stat::Goals),
            SortKey::new(Metric::GoalDifferential),
            SortKey::ascending(Field::Name),
            SortKey::ascending(Field::Team),
        ],
        Field::Stat(Stat::Goals) => vec![
            SortKey::new(Stat::Goals),
            SortKey::new(Stat::Points),
            SortKey::ascending(Stat::GamesPlayed),
            SortKey::ascending(Field::Name),
        ],
        Field::Stat(Stat::Assists) => vec![
            SortKey::new(Stat::Assists),
            SortKey::new(Stat::Points),
            SortKey::new(Stat::Goals),
            SortKey::ascending(Field::Name),
        ],
        Field::Stat(Stat::Wins) => vec![
            SortKey::new(Stat::Wins),
            SortKey::new(Stat::Points),
            SortKey::ascending(Stat::GamesPlayed),
            SortKey::ascending(Field::Name),
        ],
        Field::Metric(Metric::ShotPctg) => vec![
            SortKey::new(Metric::ShotPctg),
            SortKey::new(Stat::Goals),
            SortKey::ascending(Stat::ShotsOnGoal),
            SortKey::ascending(Field::Name),
        ],
        Field::Metric(Metric::SavePctg) => vec![
            SortKey::new(Metric::SavePctg),
            SortKey::new(Stat::ShotsAgainst),
            SortKey::ascending(Stat::GoalsAgainst),
            SortKey::ascending(Field::Name),
        ],
        Field::Metric(Metric::GoalsAgainstAverage) => vec![
            SortKey::new(Metric::GoalsAgainstAverage),
            SortKey::new(Stat::TimeOnIce),
            SortKey::ascending(Field::Name),
        ],
        Field::Metric(Metric::PtPctg) => vec![
            SortKey::new(Metric::PtPctg),
            SortKey::new(Stat::Points),
            SortKey::new(Metric::GoalDifferential),
            SortKey::ascending(Field::Team),
        ],
        Field::Metric(Metric::GoalDifferential) => vec![
            SortKey::new(Metric::GoalDifferential),
            SortKey::new(Stat::Goals),
            SortKey::ascending(Field::Team),
        ],
        Field::Metric(Metric::PointsPerGame) => vec![
            SortKey::new(Metric::PointsPerGame),
            SortKey::new(Stat::Points),
            SortKey::ascending(Field::Name),
        ],
        Field::Metric(Metric::FaceoffPctg) => vec![
            SortKey::new(Metric::FaceoffPctg),
            SortKey::new(Stat::FaceoffsWon),
            SortKey::ascending(Field::Name),
        ],
        other => vec![
            SortKey::new(other),
            SortKey::ascending(Field::Name),
            SortKey::ascending(Field::Team),
        ],
    };

    SortSpec::new(chain, default_direction(column))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_starts_with_column() {
        for column in [
            Field::Name,
            Field::Team,
            Field::Age,
            Field::Stat(Stat::Points),
            Field::Stat(Stat::PenaltyMinutes),
            Field::Metric(Metric::PtPctg),
            Field::Metric(Metric::CorsiForPctg),
        ] {
            let spec = lookup(column);
            assert_eq!(spec.keys[0], SortKey::new(column), "{}", column);
        }
    }

    #[test]
    fn test_default_directions() {
        assert_eq!(lookup(Field::Name).direction, Direction::Ascending);
        assert_eq!(lookup(Field::Team).direction, Direction::Ascending);
        assert_eq!(lookup(Field::Stat(Stat::Goals)).direction, Direction::Descending);
        assert_eq!(lookup(Field::Age).direction, Direction::Descending);
        assert_eq!(
            lookup(Field::Metric(Metric::GoalsAgainstAverage)).direction,
            Direction::Ascending
        );
    }

    #[test]
    fn test_fallback_chain() {
        let spec = lookup(Field::Stat(Stat::PenaltyMinutes));
        assert_eq!(
            spec.keys,
            vec![
                SortKey::new(Stat::PenaltyMinutes),
                SortKey::ascending(Field::Name),
                SortKey::ascending(Field::Team),
            ]
        );
    }

    #[test]
    fn test_points_breaks_ties_on_fewer_games() {
        let spec = lookup(Field::Stat(Stat::Points));
        assert_eq!(spec.keys[1], SortKey::ascending(Stat::GamesPlayed));
    }
}
