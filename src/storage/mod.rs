//! Dataset layout and parsing.
//!
//! Datasets live under one root (a local directory or an HTTP base URL):
//! - `skaters/<season>.csv`: semicolon-separated skater game rows
//! - `goalies/<season>.json`, `teams/<season>.json`: JSON game rows
//! - `rosters/<season>.json`: season rosters
//! - `headers/<table>.json`: column header metadata

mod delimited;
mod json;
mod row;

pub use delimited::*;
pub use json::*;
pub use row::*;

use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

use crate::models::TableKind;

/// Errors that can occur while reading or parsing datasets.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

/// File format of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Csv,
    Json,
}

impl DataFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            DataFormat::Csv => "csv",
            DataFormat::Json => "json",
        }
    }
}

/// One fetchable dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    Games { table: TableKind, season: u16 },
    Roster { season: u16 },
    Headers { table: TableKind },
}

impl Dataset {
    pub fn format(&self) -> DataFormat {
        match self {
            Dataset::Games {
                table: TableKind::Skaters,
                ..
            } => DataFormat::Csv,
            _ => DataFormat::Json,
        }
    }

    /// Path relative to the dataset root, with `/` separators.
    pub fn relative_path(&self) -> String {
        let ext = self.format().extension();
        match self {
            Dataset::Games { table, season } => format!("{}/{}.{}", table, season, ext),
            Dataset::Roster { season } => format!("rosters/{}.{}", season, ext),
            Dataset::Headers { table } => format!("headers/{}.{}", table, ext),
        }
    }
}

impl std::fmt::Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.relative_path())
    }
}

/// Configuration for the local dataset directory.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn path_for(&self, dataset: &Dataset) -> PathBuf {
        dataset
            .relative_path()
            .split('/')
            .fold(self.data_dir.clone(), |path, part| path.join(part))
    }

    pub fn table_dir(&self, table: TableKind) -> PathBuf {
        self.data_dir.join(table.as_str())
    }

    /// Seasons with a game file for `table`, ascending.
    pub fn seasons(&self, table: TableKind) -> Result<Vec<u16>, StorageError> {
        let dir = self.table_dir(table);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let pattern = dir.join(format!(
            "*.{}",
            Dataset::Games { table, season: 0 }.format().extension()
        ));
        let mut seasons: Vec<u16> = glob::glob(&pattern.to_string_lossy())?
            .filter_map(Result::ok)
            .filter_map(|path| path.file_stem()?.to_str()?.parse().ok())
            .collect();
        seasons.sort_unstable();
        seasons.dedup();

        debug!("Found {} seasons for {} in {:?}", seasons.len(), table, dir);
        Ok(seasons)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_dataset_paths() {
        assert_eq!(
            Dataset::Games {
                table: TableKind::Skaters,
                season: 2024
            }
            .relative_path(),
            "skaters/2024.csv"
        );
        assert_eq!(
            Dataset::Games {
                table: TableKind::Teams,
                season: 2023
            }
            .relative_path(),
            "teams/2023.json"
        );
        assert_eq!(
            Dataset::Roster { season: 2024 }.relative_path(),
            "rosters/2024.json"
        );
        assert_eq!(
            Dataset::Headers {
                table: TableKind::Goalies
            }
            .relative_path(),
            "headers/goalies.json"
        );
    }

    #[test]
    fn test_storage_config_paths() {
        let config = StorageConfig::new(PathBuf::from("/data"));
        let path = config.path_for(&Dataset::Roster { season: 2024 });
        assert_eq!(path, PathBuf::from("/data/rosters/2024.json"));
    }

    #[test]
    fn test_storage_config_default() {
        let config = StorageConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("./data"));
    }

    #[test]
    fn test_seasons_lists_game_files() {
        let temp_dir = TempDir::new().unwrap();
        let config = StorageConfig::new(temp_dir.path().to_path_buf());
        let dir = config.table_dir(TableKind::Skaters);
        std::fs::create_dir_all(&dir).unwrap();
        for name in ["2024.csv", "2022.csv", "notes.csv", "2023.json"] {
            std::fs::write(dir.join(name), "").unwrap();
        }

        let seasons = config.seasons(TableKind::Skaters).unwrap();

        assert_eq!(seasons, vec![2022, 2024]);
    }

    #[test]
    fn test_seasons_missing_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config = StorageConfig::new(temp_dir.path().to_path_buf());
        assert!(config.seasons(TableKind::Teams).unwrap().is_empty());
    }
}
