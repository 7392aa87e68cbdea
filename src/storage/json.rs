//! JSON game rows, rosters and column headers.

use serde_json::{Map, Value};
use tracing::debug;

use crate::models::{ColumnHeader, GameRecord, Roster, RosterEntry};

use super::{ParseStats, RowBuilder, StorageError};

/// Parse a JSON array of game row objects.
///
/// Objects that fail to build a row are dropped.
pub fn parse_game_json(
    text: &str,
    season: Option<u16>,
) -> Result<(Vec<GameRecord>, ParseStats), StorageError> {
    let rows: Vec<Map<String, Value>> = serde_json::from_str(text)?;

    let mut records = Vec::with_capacity(rows.len());
    let mut stats = ParseStats::default();

    for (index, object) in rows.iter().enumerate() {
        let mut row = RowBuilder::new();
        for (column, value) in object {
            row.push_json(&column.to_ascii_lowercase(), value);
        }

        match row.finish(season) {
            Some(game) => {
                records.push(game);
                stats.record(true);
            }
            None => {
                debug!("Skipping object {}: incomplete or invalid", index);
                stats.record(false);
            }
        }
    }

    debug!(
        "Parsed {} of {} objects ({} dropped)",
        stats.kept, stats.total, stats.dropped
    );
    Ok((records, stats))
}

/// Parse a season roster.
pub fn parse_roster(text: &str) -> Result<Roster, StorageError> {
    let entries: Vec<RosterEntry> = serde_json::from_str(text)?;
    Ok(Roster::new(entries))
}

/// Parse column header metadata.
pub fn parse_headers(text: &str) -> Result<Vec<ColumnHeader>, StorageError> {
    Ok(serde_json::from_str(text)?)
}
