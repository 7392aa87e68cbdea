//! Table and profile pipelines: filter, aggregate, derive, sort.

mod render;

pub use render::*;

use serde::Serialize;
use tracing::debug;

use crate::aggregate::{aggregate, Filter};
use crate::calculate::derive_all;
use crate::models::{DerivedRecord, EntityId, Field, GameRecord, TableKind};
use crate::sort::{sort_records, SortState};

/// Everything one table view depends on.
#[derive(Debug, Clone)]
pub struct ViewConfig {
    pub table: TableKind,
    pub filter: Filter,
    pub sort: SortState,
    pub limit: Option<usize>,
}

impl ViewConfig {
    /// Unfiltered view of `table` sorted by its default column.
    pub fn new(table: TableKind) -> Self {
        Self {
            table,
            filter: Filter::all(),
            sort: SortState::new(table.default_sort()),
            limit: None,
        }
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_sort(mut self, sort: SortState) -> Self {
        self.sort = sort;
        self
    }

    /// Select columns in order, as repeated header clicks would.
    pub fn select_columns(mut self, columns: impl IntoIterator<Item = Field>) -> Self {
        for column in columns {
            self.sort.select(column);
        }
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Rows of a table view, sorted.
pub fn build_view(records: &[GameRecord], config: &ViewConfig) -> Vec<DerivedRecord> {
    let grouping = config.table.grouping();
    let fields = config.table.fields();
    let predicate = config.filter.predicate();

    let aggregation = aggregate(records, |r| grouping.key(r), predicate, &fields);
    let mut rows = derive_all(aggregation.display_records());
    sort_records(&mut rows, config.sort.spec());

    if let Some(limit) = config.limit {
        rows.truncate(limit);
    }

    debug!(
        "Built {} view: {} input rows, {} output rows",
        config.table,
        records.len(),
        rows.len()
    );
    rows
}

/// One season line of a profile.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileRow {
    pub season: u16,
    #[serde(flatten)]
    pub record: DerivedRecord,
}

/// Season-by-season lines of one player or team, plus the career total.
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub entity_id: EntityId,
    pub table: TableKind,
    pub seasons: Vec<ProfileRow>,
    pub career: Option<DerivedRecord>,
}

/// Build a profile from per-season game rows.
///
/// Each season yields one line, combined across teams when the entity
/// changed teams. The career line sums every season.
pub fn build_profile<'a, I>(
    table: TableKind,
    entity_id: &EntityId,
    filter: &Filter,
    seasons: I,
) -> Profile
where
    I: IntoIterator<Item = (u16, &'a [GameRecord])>,
{
    let grouping = table.grouping();
    let fields = table.fields();
    let predicate = filter.predicate();

    let mut rows = Vec::new();
    let mut career_rows: Vec<GameRecord> = Vec::new();

    for (season, records) in seasons {
        let own: Vec<GameRecord> = records
            .iter()
            .filter(|r| &grouping.key(r).entity_id() == entity_id)
            .cloned()
            .collect();
        if own.is_empty() {
            continue;
        }

        let aggregation = aggregate(&own, |r| grouping.key(r), &predicate, &fields);
        rows.extend(
            derive_all(aggregation.display_records())
                .into_iter()
                .map(|record| ProfileRow { season, record }),
        );
        career_rows.extend(own);
    }

    rows.sort_by_key(|row| row.season);

    let career = if career_rows.is_empty() {
        None
    } else {
        let aggregation = aggregate(&career_rows, |r| grouping.key(r), &predicate, &fields);
        derive_all(aggregation.display_records()).into_iter().next()
    };

    Profile {
        entity_id: entity_id.clone(),
        table,
        seasons: rows,
        career,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HomeRoad, Metric, Stat};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn skater(id: &str, team: &str, day: u32, goals: f64, assists: f64) -> GameRecord {
        GameRecord::new(id, team, date(2024, 10, day))
            .with_name(format!("Player {}", id))
            .with_stat(Stat::GamesPlayed, 1.0)
            .with_stat(Stat::Goals, goals)
            .with_stat(Stat::Assists, assists)
            .with_stat(Stat::Points, goals + assists)
    }

    fn team_names(rows: &[DerivedRecord]) -> Vec<(&str, &str)> {
        rows.iter()
            .map(|r| (r.record.identity.name.as_str(), r.record.team.as_str()))
            .collect()
    }

    #[test]
    fn test_empty_input_gives_empty_view() {
        let rows = build_view(&[], &ViewConfig::new(TableKind::Skaters));
        assert!(rows.is_empty());
    }

    #[test]
    fn test_view_sorts_by_points() {
        let records = vec![
            skater("1", "MAN", 1, 1.0, 0.0),
            skater("2", "MAN", 1, 2.0, 2.0),
            skater("3", "EBB", 1, 0.0, 2.0),
        ];

        let rows = build_view(&records, &ViewConfig::new(TableKind::Skaters));

        assert_eq!(
            team_names(&rows),
            vec![("Player 2", "MAN"), ("Player 3", "EBB"), ("Player 1", "MAN")]
        );
    }

    #[test]
    fn test_view_shows_combined_record_for_traded_player() {
        let records = vec![
            skater("9", "MAN", 1, 2.0, 0.0),
            skater("9", "EBB", 20, 3.0, 1.0),
            skater("4", "EBB", 1, 1.0, 0.0),
        ];

        let rows = build_view(&records, &ViewConfig::new(TableKind::Skaters));

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].record.team, "2 Tms");
        assert_eq!(rows[0].record.stats.get(Stat::Goals), 5.0);
    }

    #[test]
    fn test_filter_keeps_zeroed_rows() {
        let records = vec![
            skater("1", "MAN", 1, 1.0, 0.0).with_home_road(HomeRoad::Road),
            skater("2", "MAN", 2, 2.0, 0.0),
        ];
        let config = ViewConfig::new(TableKind::Skaters)
            .with_filter(Filter::all().with_home_road(HomeRoad::Home));

        let rows = build_view(&records, &config);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].record.identity.name, "Player 1");
        assert_eq!(rows[1].record.stats.get(Stat::Points), 0.0);
        assert_eq!(rows[1].metric(Metric::PointsPerGame), 0.0);
    }

    #[test]
    fn test_select_columns_and_limit() {
        let records = vec![
            skater("1", "MAN", 1, 3.0, 0.0),
            skater("2", "MAN", 1, 1.0, 0.0),
            skater("3", "MAN", 1, 2.0, 0.0),
        ];
        let config = ViewConfig::new(TableKind::Skaters)
            .select_columns([Field::Stat(Stat::Goals), Field::Stat(Stat::Goals)])
            .with_limit(2);

        let rows = build_view(&records, &config);

        assert_eq!(
            team_names(&rows),
            vec![("Player 2", "MAN"), ("Player 3", "MAN")]
        );
    }

    #[test]
    fn test_profile_per_season_and_career() {
        let season_2023 = vec![
            GameRecord::new("9", "MAN", date(2023, 10, 1))
                .with_stat(Stat::GamesPlayed, 1.0)
                .with_stat(Stat::Goals, 1.0),
            skater("4", "MAN", 1, 5.0, 0.0),
        ];
        let season_2024 = vec![
            skater("9", "MAN", 1, 2.0, 0.0),
            skater("9", "EBB", 20, 3.0, 0.0),
        ];
        let id = EntityId::new("9");

        let profile = build_profile(
            TableKind::Skaters,
            &id,
            &Filter::all(),
            [
                (2024, season_2024.as_slice()),
                (2023, season_2023.as_slice()),
            ],
        );

        let lines: Vec<(u16, &str, f64)> = profile
            .seasons
            .iter()
            .map(|row| {
                (
                    row.season,
                    row.record.record.team.as_str(),
                    row.record.record.stats.get(Stat::Goals),
                )
            })
            .collect();
        assert_eq!(lines, vec![(2023, "MAN", 1.0), (2024, "2 Tms", 5.0)]);

        let career = profile.career.unwrap();
        assert_eq!(career.record.stats.get(Stat::Goals), 6.0);
        assert_eq!(career.record.stats.get(Stat::GamesPlayed), 3.0);
    }

    #[test]
    fn test_profile_unknown_entity() {
        let records = vec![skater("1", "MAN", 1, 1.0, 0.0)];
        let profile = build_profile(
            TableKind::Skaters,
            &EntityId::new("404"),
            &Filter::all(),
            [(2024, records.as_slice())],
        );
        assert!(profile.seasons.is_empty());
        assert!(profile.career.is_none());
    }
}
