//! Per-group summation of counting stats.
//!
//! Every distinct key in the unfiltered input gets a zeroed record; only rows
//! passing the predicate add into it. Players who dressed for more than one
//! team within the filtered rows additionally get a combined record.

mod filter;

pub use filter::*;

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::models::{
    AggregatedRecord, EntityId, GameRecord, GroupKey, Stat, StatLine, TeamCode, TeamScope,
};

/// Result of one aggregation pass.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    /// Per-key records in first-seen order
    records: Vec<AggregatedRecord>,
    index: HashMap<GroupKey, usize>,
    /// Record positions per base entity
    by_entity: HashMap<EntityId, Vec<usize>>,
    /// Base entities in first-seen order
    entities: Vec<EntityId>,
    /// Teams with qualifying rows, per base entity
    qualifying_teams: HashMap<EntityId, BTreeSet<TeamCode>>,
    combined: HashMap<EntityId, AggregatedRecord>,
}

impl Aggregation {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of per-key records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn get(&self, key: &GroupKey) -> Option<&AggregatedRecord> {
        self.index.get(key).map(|&i| &self.records[i])
    }

    /// All per-key records in first-seen order.
    pub fn records(&self) -> &[AggregatedRecord] {
        &self.records
    }

    /// Per-team records of one entity.
    pub fn per_team(&self, entity_id: &EntityId) -> Vec<&AggregatedRecord> {
        self.by_entity
            .get(entity_id)
            .map(|slots| slots.iter().map(|&i| &self.records[i]).collect())
            .unwrap_or_default()
    }

    /// The combined record of an entity with qualifying rows for several teams.
    pub fn combined(&self, entity_id: &EntityId) -> Option<&AggregatedRecord> {
        self.combined.get(entity_id)
    }

    /// Teams that contributed qualifying rows for an entity.
    pub fn qualifying_teams(&self, entity_id: &EntityId) -> Vec<&str> {
        self.qualifying_teams
            .get(entity_id)
            .map(|teams| teams.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Records a table shows: one entry per entity, combined where present.
    ///
    /// Entities with a single qualifying team show that team's record. Entities
    /// without any qualifying row show their zeroed records.
    pub fn display_records(&self) -> Vec<&AggregatedRecord> {
        let mut out = Vec::with_capacity(self.entities.len());
        for entity_id in &self.entities {
            if let Some(combined) = self.combined.get(entity_id) {
                out.push(combined);
                continue;
            }
            let teams = self.qualifying_teams.get(entity_id);
            out.extend(self.per_team(entity_id).into_iter().filter(|record| {
                teams.map_or(true, |teams| teams.contains(record.key.team()))
            }));
        }
        out
    }
}

/// Sum `fields` per group key over the rows satisfying `predicate`.
pub fn aggregate<K, P>(
    records: &[GameRecord],
    key_fn: K,
    predicate: P,
    fields: &[Stat],
) -> Aggregation
where
    K: Fn(&GameRecord) -> GroupKey,
    P: Fn(&GameRecord) -> bool,
{
    let mut agg = Aggregation::default();
    let mut seen_entities: BTreeSet<EntityId> = BTreeSet::new();
    let mut qualifying = 0usize;

    for record in records {
        let key = key_fn(record);
        let entity_id = key.entity_id();

        let slot = match agg.index.get(&key) {
            Some(&i) => i,
            None => {
                let seeded =
                    AggregatedRecord::seeded(key.clone(), record, StatLine::zeroed(fields));
                let slot = agg.records.len();
                agg.records.push(seeded);
                agg.index.insert(key.clone(), slot);
                agg.by_entity.entry(entity_id.clone()).or_default().push(slot);
                slot
            }
        };
        if seen_entities.insert(entity_id.clone()) {
            agg.entities.push(entity_id.clone());
        }

        if !predicate(record) {
            continue;
        }
        qualifying += 1;

        let target = &mut agg.records[slot];
        target.stats.add_fields(&record.stats, fields);
        target.qualifying_rows += 1;
        target.venue = target.venue.observe(record.home_road);

        agg.qualifying_teams
            .entry(entity_id)
            .or_default()
            .insert(key.team().to_string());
    }

    merge_multi_team(&mut agg);

    debug!(
        "Aggregated {} rows ({} qualifying) into {} records, {} combined",
        records.len(),
        qualifying,
        agg.records.len(),
        agg.combined.len()
    );

    agg
}

fn merge_multi_team(agg: &mut Aggregation) {
    for (entity_id, teams) in &agg.qualifying_teams {
        if teams.len() < 2 {
            continue;
        }

        let Some(slots) = agg.by_entity.get(entity_id) else {
            continue;
        };
        let mut parts = slots.iter().map(|&i| &agg.records[i]);
        let Some(first) = parts.next() else {
            continue;
        };

        let mut combined = first.clone();
        for part in parts {
            combined.stats.merge(&part.stats);
            combined.qualifying_rows += part.qualifying_rows;
            combined.venue = combined.venue.merge(part.venue);
        }
        combined.team = format!("{} Tms", teams.len());
        combined.scope = TeamScope::Combined {
            teams: teams.iter().cloned().collect(),
        };

        agg.combined.insert(entity_id.clone(), combined);
    }
}
