//! Semicolon-separated game rows.

use tracing::debug;

use crate::models::GameRecord;

use super::{ParseStats, RowBuilder, StorageError};

/// Parse a semicolon-separated game file with a header line.
///
/// Rows whose field count differs from the header, rows with unparsable
/// cells and rows missing their identity are dropped.
pub fn parse_game_csv(
    text: &str,
    season: Option<u16>,
) -> Result<(Vec<GameRecord>, ParseStats), StorageError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_ascii_lowercase())
        .collect();

    let mut records = Vec::new();
    let mut stats = ParseStats::default();

    for (line, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                debug!("Skipping unreadable row {}: {}", line + 2, e);
                stats.record(false);
                continue;
            }
        };

        if record.len() != headers.len() {
            debug!(
                "Skipping row {}: {} fields, expected {}",
                line + 2,
                record.len(),
                headers.len()
            );
            stats.record(false);
            continue;
        }

        let mut row = RowBuilder::new();
        for (column, cell) in headers.iter().zip(record.iter()) {
            row.push_text(column, cell);
        }

        match row.finish(season) {
            Some(game) => {
                records.push(game);
                stats.record(true);
            }
            None => {
                debug!("Skipping row {}: incomplete or invalid", line + 2);
                stats.record(false);
            }
        }
    }

    debug!(
        "Parsed {} of {} rows ({} dropped)",
        stats.kept, stats.total, stats.dropped
    );
    Ok((records, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HomeRoad, Stat};

    const SAMPLE: &str = "\
player_id;team;name;game_date;home_road;goals;assists;time_on_ice;overtime
1;MAN;Ann;2024-10-04;home;1;2;900.5;0
1;MAN;Ann;2024-10-06;road;0;1;850;1
2;MAN;Ben;2024-10-04;home;2
3;;Cid;2024-10-04;home;0;0;700;0
4;EBB;Dan;2024-10-04;away;;1;600;false
";

    #[test]
    fn test_parse_game_csv() {
        let (records, stats) = parse_game_csv(SAMPLE, Some(2024)).unwrap();

        assert_eq!(stats.total, 5);
        assert_eq!(stats.kept, 3);
        assert_eq!(stats.dropped, 2);

        assert_eq!(records[0].entity_id.as_str(), "1");
        assert_eq!(records[0].stats.get(Stat::Assists), 2.0);
        assert_eq!(records[0].stats.get(Stat::TimeOnIce), 900.5);
        assert!(records[1].situation("overtime"));
        assert_eq!(records[1].home_road, HomeRoad::Road);
        assert_eq!(records[2].team, "EBB");
        assert_eq!(records[2].stats.get(Stat::Goals), 0.0);
    }

    #[test]
    fn test_wrong_field_count_is_dropped() {
        let text = "player_id;team;game_date;goals\n1;MAN;2024-10-04;1;9\n";
        let (records, stats) = parse_game_csv(text, None).unwrap();
        assert!(records.is_empty());
        assert_eq!(stats.dropped, 1);
    }

    #[test]
    fn test_header_only() {
        let (records, stats) = parse_game_csv("player_id;team;game_date\n", None).unwrap();
        assert!(records.is_empty());
        assert_eq!(stats, ParseStats::default());
    }

    #[test]
    fn test_empty_input() {
        let (records, _) = parse_game_csv("", None).unwrap();
        assert!(records.is_empty());
    }
}
