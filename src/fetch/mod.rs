//! Dataset loading from a local directory or an HTTP root.
//!
//! A [`DatasetSource`] returns the raw text of one dataset. The loaders
//! parse it with the storage readers and apply roster enrichment.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info, warn};
use url::Url;

use crate::models::{ColumnHeader, GameRecord, Roster, TableKind};
use crate::storage::{
    parse_game_csv, parse_game_json, parse_headers, parse_roster, DataFormat, Dataset,
    StorageConfig, StorageError,
};

/// Errors that can occur during fetching.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dataset not found: {0}")]
    NotFound(String),

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Content too large: {size} bytes (max {max_size})")]
    ContentTooLarge { size: usize, max_size: usize },

    #[error("Parse error: {0}")]
    Storage(#[from] StorageError),
}

/// Where datasets come from.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Raw text of one dataset.
    async fn fetch_text(&self, dataset: &Dataset) -> Result<String, FetchError>;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}

/// Datasets read from a local directory.
#[derive(Debug, Clone)]
pub struct LocalSource {
    storage: StorageConfig,
}

impl LocalSource {
    pub fn new(storage: StorageConfig) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl DatasetSource for LocalSource {
    async fn fetch_text(&self, dataset: &Dataset) -> Result<String, FetchError> {
        let path = self.storage.path_for(dataset);
        match fs::read_to_string(&path).await {
            Ok(text) => {
                debug!("Read {} bytes from {:?}", text.len(), path);
                Ok(text)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(FetchError::NotFound(path.display().to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn describe(&self) -> String {
        self.storage.data_dir.display().to_string()
    }
}

/// Configuration for the HTTP source.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Request timeout
    pub timeout: Duration,

    /// User agent string
    pub user_agent: String,

    /// Maximum response size (default 50MB)
    pub max_content_size: usize,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("rink-stats/{}", env!("CARGO_PKG_VERSION")),
            max_content_size: 50 * 1024 * 1024,
        }
    }
}

/// Datasets fetched below an HTTP base URL.
pub struct HttpSource {
    client: Client,
    base_url: Url,
    config: FetcherConfig,
}

impl HttpSource {
    pub fn new(base_url: &str, config: FetcherConfig) -> Result<Self, FetchError> {
        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url =
            Url::parse(&base).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", base, e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static("rink-stats")),
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    /// URL of one dataset below the base URL.
    pub fn url_for(&self, dataset: &Dataset) -> Result<Url, FetchError> {
        self.base_url
            .join(&dataset.relative_path())
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", dataset, e)))
    }
}

#[async_trait]
impl DatasetSource for HttpSource {
    async fn fetch_text(&self, dataset: &Dataset) -> Result<String, FetchError> {
        let url = self.url_for(dataset)?;
        info!("Fetching {}", url);

        let response = self.client.get(url.as_str()).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let content = response.bytes().await?;
        if content.len() > self.config.max_content_size {
            return Err(FetchError::ContentTooLarge {
                size: content.len(),
                max_size: self.config.max_content_size,
            });
        }

        Ok(String::from_utf8_lossy(&content).into_owned())
    }

    fn describe(&self) -> String {
        self.base_url.to_string()
    }
}

/// In-memory datasets keyed by relative path.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to add a dataset.
    pub fn with(mut self, dataset: Dataset, text: impl Into<String>) -> Self {
        self.files.insert(dataset.relative_path(), text.into());
        self
    }
}

#[async_trait]
impl DatasetSource for MemorySource {
    async fn fetch_text(&self, dataset: &Dataset) -> Result<String, FetchError> {
        self.files
            .get(&dataset.relative_path())
            .cloned()
            .ok_or_else(|| FetchError::NotFound(dataset.relative_path()))
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

/// Load and parse the game rows of one table and season.
pub async fn load_games(
    source: &dyn DatasetSource,
    table: TableKind,
    season: u16,
) -> Result<Vec<GameRecord>, FetchError> {
    let dataset = Dataset::Games { table, season };
    let text = source.fetch_text(&dataset).await?;
    let (records, stats) = match dataset.format() {
        DataFormat::Csv => parse_game_csv(&text, Some(season))?,
        DataFormat::Json => parse_game_json(&text, Some(season))?,
    };
    info!(
        "Loaded {} {} rows for {} ({} dropped)",
        records.len(),
        table,
        season,
        stats.dropped
    );
    Ok(records)
}

/// Load one season's roster.
pub async fn load_roster(source: &dyn DatasetSource, season: u16) -> Result<Roster, FetchError> {
    let text = source.fetch_text(&Dataset::Roster { season }).await?;
    let roster = parse_roster(&text)?;
    debug!("Loaded roster for {} with {} entries", season, roster.len());
    Ok(roster)
}

/// Load the column headers of a table.
pub async fn load_headers(
    source: &dyn DatasetSource,
    table: TableKind,
) -> Result<Vec<ColumnHeader>, FetchError> {
    let text = source.fetch_text(&Dataset::Headers { table }).await?;
    Ok(parse_headers(&text)?)
}

/// Every dataset of one season. A dataset that failed to load is `None`.
#[derive(Debug, Clone, Default)]
pub struct SeasonData {
    pub season: u16,
    pub skaters: Option<Vec<GameRecord>>,
    pub goalies: Option<Vec<GameRecord>>,
    pub teams: Option<Vec<GameRecord>>,
    pub roster: Option<Roster>,
}

impl SeasonData {
    /// Game rows of `table`, empty when the dataset failed to load.
    pub fn games(&self, table: TableKind) -> &[GameRecord] {
        let rows = match table {
            TableKind::Skaters => &self.skaters,
            TableKind::Goalies => &self.goalies,
            TableKind::Teams => &self.teams,
        };
        rows.as_deref().unwrap_or(&[])
    }

    pub fn into_games(self, table: TableKind) -> Vec<GameRecord> {
        let rows = match table {
            TableKind::Skaters => self.skaters,
            TableKind::Goalies => self.goalies,
            TableKind::Teams => self.teams,
        };
        rows.unwrap_or_default()
    }
}

fn loaded<T>(what: &str, season: u16, result: Result<T, FetchError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Failed to load {} for {}: {}", what, season, e);
            None
        }
    }
}

/// Load every dataset of a season concurrently, then enrich player rows
/// from the roster.
pub async fn load_season(source: &dyn DatasetSource, season: u16) -> SeasonData {
    info!("Loading season {} from {}", season, source.describe());

    let (skaters, goalies, teams, roster) = tokio::join!(
        load_games(source, TableKind::Skaters, season),
        load_games(source, TableKind::Goalies, season),
        load_games(source, TableKind::Teams, season),
        load_roster(source, season),
    );

    let mut data = SeasonData {
        season,
        skaters: loaded("skaters", season, skaters),
        goalies: loaded("goalies", season, goalies),
        teams: loaded("teams", season, teams),
        roster: loaded("roster", season, roster),
    };

    if let Some(roster) = &data.roster {
        for rows in [&mut data.skaters, &mut data.goalies].into_iter().flatten() {
            let matched = roster.enrich(rows);
            debug!("Enriched {} of {} rows for {}", matched, rows.len(), season);
        }
    }

    data
}

/// Load several seasons, one after another.
pub async fn load_seasons(source: &dyn DatasetSource, seasons: &[u16]) -> Vec<SeasonData> {
    let mut loaded = Vec::with_capacity(seasons.len());
    for season in seasons {
        loaded.push(load_season(source, *season).await);
    }
    loaded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntityId, Stat};
    use tempfile::TempDir;

    const SKATERS: &str = "\
player_id;team;game_date;home_road;goals
7;MAN;2024-10-04;home;1
8;MAN;2024-10-04;home;0
";

    const ROSTER: &str = r#"[{"id": "7", "name": "Player Seven", "position": "F"}]"#;

    #[test]
    fn test_fetcher_config_default() {
        let config = FetcherConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("rink-stats/"));
    }

    #[test]
    fn test_http_url_for() {
        let source = HttpSource::new("https://stats.example.com/data", FetcherConfig::default())
            .unwrap();
        let url = source
            .url_for(&Dataset::Games {
                table: TableKind::Skaters,
                season: 2024,
            })
            .unwrap();
        assert_eq!(url.as_str(), "https://stats.example.com/data/skaters/2024.csv");
    }

    #[test]
    fn test_http_invalid_base_url() {
        assert!(matches!(
            HttpSource::new("not a url", FetcherConfig::default()),
            Err(FetchError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_local_source_reads_files() {
        let temp_dir = TempDir::new().unwrap();
        let storage = StorageConfig::new(temp_dir.path().to_path_buf());
        let dataset = Dataset::Games {
            table: TableKind::Skaters,
            season: 2024,
        };
        let path = storage.path_for(&dataset);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, SKATERS).unwrap();

        let source = LocalSource::new(storage);
        let records = load_games(&source, TableKind::Skaters, 2024).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].stats.get(Stat::Goals), 1.0);
    }

    #[tokio::test]
    async fn test_local_source_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let source = LocalSource::new(StorageConfig::new(temp_dir.path().to_path_buf()));

        let result = source.fetch_text(&Dataset::Roster { season: 2024 }).await;

        assert!(matches!(result, Err(FetchError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_load_season_enriches_and_tolerates_failures() {
        let source = MemorySource::new()
            .with(
                Dataset::Games {
                    table: TableKind::Skaters,
                    season: 2024,
                },
                SKATERS,
            )
            .with(
                Dataset::Games {
                    table: TableKind::Teams,
                    season: 2024,
                },
                "not json",
            )
            .with(Dataset::Roster { season: 2024 }, ROSTER);

        let data = load_season(&source, 2024).await;

        assert!(data.goalies.is_none());
        assert!(data.teams.is_none());
        assert!(data.games(TableKind::Teams).is_empty());

        let skaters = data.games(TableKind::Skaters);
        assert_eq!(skaters.len(), 2);
        assert_eq!(skaters[0].entity_id, EntityId::new("7"));
        assert_eq!(skaters[0].identity.name, "Player Seven");
        assert_eq!(skaters[0].identity.position.as_deref(), Some("F"));
        assert_eq!(skaters[1].identity.name, "");
    }

    #[tokio::test]
    async fn test_load_season_without_roster() {
        let source = MemorySource::new().with(
            Dataset::Games {
                table: TableKind::Skaters,
                season: 2024,
            },
            SKATERS,
        );

        let data = load_season(&source, 2024).await;

        assert!(data.roster.is_none());
        assert_eq!(data.into_games(TableKind::Skaters).len(), 2);
    }

    #[test]
    fn test_memory_source_missing_dataset() {
        let source = MemorySource::new();
        let result = tokio_test::block_on(load_roster(&source, 2024));
        assert!(matches!(result, Err(FetchError::NotFound(path)) if path == "rosters/2024.json"));
    }

    #[tokio::test]
    async fn test_load_headers() {
        let source = MemorySource::new().with(
            Dataset::Headers {
                table: TableKind::Goalies,
            },
            r#"[{"name": "save_pctg", "abbr": "SV%"}]"#,
        );

        let headers = load_headers(&source, TableKind::Goalies).await.unwrap();

        assert_eq!(headers[0].abbreviation, "SV%");
    }
}
