use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{NaiveDate, Weekday};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rink_stats::aggregate::Filter;
use rink_stats::config::AppConfig;
use rink_stats::fetch::{
    load_headers, load_season, load_seasons, DatasetSource, HttpSource, LocalSource,
};
use rink_stats::models::{ColumnHeader, EntityId, Field, HomeRoad, SeasonType, TableKind};
use rink_stats::sort::SortState;
use rink_stats::storage::StorageConfig;
use rink_stats::view::{
    build_profile, build_view, render_headers, render_json, render_profile, render_table,
    ViewConfig,
};

#[derive(Parser)]
#[command(name = "rink-stats")]
#[command(about = "Hockey league statistics tables from per-game data")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides config)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// HTTP root to fetch datasets from (overrides config)
    #[arg(long)]
    base_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// First game date to include (YYYY-MM-DD)
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Last game date to include (YYYY-MM-DD)
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Season type (regular, playoffs)
    #[arg(long)]
    season_type: Option<String>,

    /// Only home or only road games
    #[arg(long)]
    home_road: Option<String>,

    /// First round to include
    #[arg(long)]
    round_from: Option<u32>,

    /// Last round to include
    #[arg(long)]
    round_to: Option<u32>,

    /// Only games on this weekday (e.g. "fri")
    #[arg(long)]
    weekday: Option<Weekday>,

    /// Only games where this situation flag is set (e.g. "overtime")
    #[arg(long)]
    situation: Option<String>,
}

impl FilterArgs {
    fn to_filter(&self) -> Result<Filter> {
        let home_road = self
            .home_road
            .as_deref()
            .map(|tag| {
                HomeRoad::from_tag(tag).ok_or_else(|| anyhow!("Invalid --home-road: {}", tag))
            })
            .transpose()?;

        Ok(Filter {
            from: self.from,
            to: self.to,
            season: None,
            season_type: self.season_type.as_deref().map(SeasonType::from_tag),
            home_road,
            round_from: self.round_from,
            round_to: self.round_to,
            weekday: self.weekday,
            situation: self.situation.clone(),
        })
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show a statistics table for one season
    Table {
        /// Table to show (skaters, goalies, teams)
        #[arg(long)]
        table: Option<TableKind>,

        /// Season, named by its starting year
        #[arg(long)]
        season: Option<u16>,

        #[command(flatten)]
        filter: FilterArgs,

        /// Sort column; repeat to replay selections (reselecting flips direction)
        #[arg(long)]
        sort: Vec<String>,

        /// Show only the first N rows
        #[arg(long)]
        limit: Option<usize>,

        /// Print JSON instead of a text table
        #[arg(long)]
        json: bool,
    },

    /// Show season-by-season and career lines for one player or team
    Profile {
        /// Table the entity belongs to (skaters, goalies, teams)
        #[arg(long)]
        table: Option<TableKind>,

        /// Player id, or team code for the teams table
        #[arg(long)]
        id: String,

        /// Seasons to include; all local seasons when omitted
        #[arg(long)]
        season: Vec<u16>,

        #[command(flatten)]
        filter: FilterArgs,

        /// Print JSON instead of a text table
        #[arg(long)]
        json: bool,
    },

    /// Show column header metadata of a table
    Headers {
        /// Table (skaters, goalies, teams)
        #[arg(long)]
        table: Option<TableKind>,
    },

    /// List seasons present in the local data directory
    Seasons,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;
    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = data_dir.clone();
    }
    if let Some(base_url) = &cli.base_url {
        config.base_url = Some(base_url.clone());
    }
    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone();
    }
    config.validate().context("Invalid configuration")?;

    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::debug!("Starting rink-stats v{}", env!("CARGO_PKG_VERSION"));

    let storage = StorageConfig::new(config.data_dir.clone());
    let source: Box<dyn DatasetSource> = match &config.base_url {
        Some(base_url) => Box::new(
            HttpSource::new(base_url, config.fetch.fetcher_config())
                .context("Failed to create HTTP source")?,
        ),
        None => Box::new(LocalSource::new(storage.clone())),
    };

    match cli.command {
        Commands::Table {
            table,
            season,
            filter,
            sort,
            limit,
            json,
        } => {
            let table = table.unwrap_or(config.view.table);
            let season = match season.or(config.view.season) {
                Some(season) => season,
                None => latest_season(&storage, table)?,
            };

            let columns = parse_fields(&sort)?;
            let mut view = match columns.split_first() {
                Some((first, rest)) => ViewConfig::new(table)
                    .with_sort(SortState::new(*first))
                    .select_columns(rest.iter().copied()),
                None => ViewConfig::new(table).with_sort(initial_sort(&config, table)?),
            }
            .with_filter(filter.to_filter()?);
            if let Some(limit) = limit {
                view = view.with_limit(limit);
            }

            let records = load_season(source.as_ref(), season).await.into_games(table);
            let rows = build_view(&records, &view);

            if json {
                println!("{}", render_json(&rows)?);
            } else {
                let headers = headers_or_empty(source.as_ref(), table).await;
                println!(
                    "{}",
                    render_table(&rows, &table.display_columns(), &headers)
                );
            }
        }

        Commands::Profile {
            table,
            id,
            season,
            filter,
            json,
        } => {
            let table = table.unwrap_or(config.view.table);
            let seasons = if season.is_empty() {
                storage.seasons(table).context("Failed to list seasons")?
            } else {
                season
            };
            if seasons.is_empty() {
                bail!("No seasons found for {} in {:?}", table, config.data_dir);
            }

            let loaded = load_seasons(source.as_ref(), &seasons).await;
            let entity_id = EntityId::new(id);
            let profile = build_profile(
                table,
                &entity_id,
                &filter.to_filter()?,
                loaded.iter().map(|data| (data.season, data.games(table))),
            );

            if profile.career.is_none() {
                tracing::warn!("No rows for {} in {}", entity_id, table);
            }

            if json {
                println!("{}", render_json(&profile)?);
            } else {
                let headers = headers_or_empty(source.as_ref(), table).await;
                println!(
                    "{}",
                    render_profile(&profile, &table.display_columns(), &headers)
                );
            }
        }

        Commands::Headers { table } => {
            let table = table.unwrap_or(config.view.table);
            let headers = load_headers(source.as_ref(), table)
                .await
                .with_context(|| format!("Failed to load headers for {}", table))?;
            println!("{}", render_headers(&headers));
        }

        Commands::Seasons => {
            for table in TableKind::ALL {
                let seasons = storage
                    .seasons(table)
                    .with_context(|| format!("Failed to list seasons for {}", table))?;
                let listed: Vec<String> = seasons.iter().map(u16::to_string).collect();
                println!("{:<8} {}", table, listed.join(" "));
            }
        }
    }

    Ok(())
}

fn latest_season(storage: &StorageConfig, table: TableKind) -> Result<u16> {
    storage
        .seasons(table)
        .context("Failed to list seasons")?
        .last()
        .copied()
        .ok_or_else(|| {
            anyhow!(
                "No season given and none found for {} in {:?}",
                table,
                storage.data_dir
            )
        })
}

fn initial_sort(config: &AppConfig, table: TableKind) -> Result<SortState> {
    let column = match &config.view.sort {
        Some(sort) => sort.parse::<Field>().map_err(|e| anyhow!(e))?,
        None => table.default_sort(),
    };
    Ok(SortState::new(column))
}

fn parse_fields(names: &[String]) -> Result<Vec<Field>> {
    names
        .iter()
        .map(|name| {
            name.parse::<Field>()
                .map_err(|e| anyhow!("Invalid --sort: {}", e))
        })
        .collect()
}

async fn headers_or_empty(source: &dyn DatasetSource, table: TableKind) -> Vec<ColumnHeader> {
    match load_headers(source, table).await {
        Ok(headers) => headers,
        Err(e) => {
            tracing::debug!("No headers for {}: {}", table, e);
            Vec::new()
        }
    }
}
