//! Aggregated and derived per-entity records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{EntityId, GameRecord, HomeRoad, Identity, Metric, StatLine, TeamCode};

/// Aggregation bucket.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GroupKey {
    /// One bucket per player and team.
    EntityTeam { entity_id: EntityId, team: TeamCode },
    /// One bucket per team.
    Team { team: TeamCode },
}

impl GroupKey {
    /// Entity the multi-team merge groups by. Team keys report the team itself.
    pub fn entity_id(&self) -> EntityId {
        match self {
            GroupKey::EntityTeam { entity_id, .. } => entity_id.clone(),
            GroupKey::Team { team } => EntityId::new(team.clone()),
        }
    }

    pub fn team(&self) -> &str {
        match self {
            GroupKey::EntityTeam { team, .. } | GroupKey::Team { team } => team,
        }
    }
}

/// How rows are bucketed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grouping {
    EntityTeam,
    Team,
}

impl Grouping {
    /// Key of a row under this grouping.
    pub fn key(&self, record: &GameRecord) -> GroupKey {
        match self {
            Grouping::EntityTeam => GroupKey::EntityTeam {
                entity_id: record.entity_id.clone(),
                team: record.team.clone(),
            },
            Grouping::Team => GroupKey::Team {
                team: record.team.clone(),
            },
        }
    }
}

/// Whether a record covers one team or the sum over several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum TeamScope {
    Single,
    Combined { teams: Vec<TeamCode> },
}

/// Home/road flags of the rows that qualified for a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VenueContext {
    /// No qualifying rows.
    #[default]
    None,
    Uniform(HomeRoad),
    Mixed,
}

impl VenueContext {
    /// Fold one more qualifying row into the context.
    pub fn observe(self, home_road: HomeRoad) -> Self {
        match self {
            VenueContext::None => VenueContext::Uniform(home_road),
            VenueContext::Uniform(seen) if seen == home_road => self,
            _ => VenueContext::Mixed,
        }
    }

    /// Combine the contexts of two records.
    pub fn merge(self, other: VenueContext) -> Self {
        match (self, other) {
            (VenueContext::None, ctx) | (ctx, VenueContext::None) => ctx,
            (VenueContext::Uniform(a), VenueContext::Uniform(b)) if a == b => self,
            _ => VenueContext::Mixed,
        }
    }

    pub fn is_home(&self) -> bool {
        matches!(self, VenueContext::Uniform(HomeRoad::Home))
    }
}

/// Summed counting stats for one group key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedRecord {
    pub key: GroupKey,

    pub entity_id: EntityId,

    /// Team code, or "<N> Tms" for combined records
    pub team: String,

    #[serde(flatten)]
    pub identity: Identity,

    pub scope: TeamScope,

    pub stats: StatLine,

    /// Number of rows that passed the filter
    pub qualifying_rows: u32,

    pub venue: VenueContext,
}

impl AggregatedRecord {
    /// A zeroed record keyed and labelled from its first row.
    pub fn seeded(key: GroupKey, first: &GameRecord, stats: StatLine) -> Self {
        Self {
            entity_id: key.entity_id(),
            team: key.team().to_string(),
            key,
            identity: first.identity.clone(),
            scope: TeamScope::Single,
            stats,
            qualifying_rows: 0,
            venue: VenueContext::None,
        }
    }

    pub fn is_combined(&self) -> bool {
        matches!(self.scope, TeamScope::Combined { .. })
    }
}

/// An aggregated record with its derived metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedRecord {
    #[serde(flatten)]
    pub record: AggregatedRecord,

    pub metrics: BTreeMap<Metric, f64>,
}

impl DerivedRecord {
    /// Metric value; metrics never computed read as zero.
    pub fn metric(&self, metric: Metric) -> f64 {
        self.metrics.get(&metric).copied().unwrap_or(0.0)
    }
}
