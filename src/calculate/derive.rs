//! Per-record derived metric pass.

use std::collections::BTreeMap;

use crate::models::{AggregatedRecord, DerivedRecord, Metric, ShotKind, Side, Stat, ZoneStat};

use super::{
    calculate_faceoff_pctg, calculate_gaa, calculate_pdo, calculate_per_60, calculate_per_game,
    calculate_pk_pctg, calculate_pp_pctg, calculate_pt_pctg, calculate_save_pctg,
    calculate_share, calculate_shot_pctg, calculate_utilized_capacity, percentage, round2,
};

/// Shot attempts (on goal, missed and blocked) of one side.
pub fn corsi(record: &AggregatedRecord, side: Side) -> f64 {
    fenwick(record, side)
        + match side {
            Side::For => record.stats.get(Stat::ShotsBlocked),
            Side::Against => record.stats.get(Stat::ShotsBlockedAgainst),
        }
}

/// Unblocked shot attempts (on goal and missed) of one side.
pub fn fenwick(record: &AggregatedRecord, side: Side) -> f64 {
    let stats = &record.stats;
    match side {
        Side::For => stats.get(Stat::ShotsOnGoal) + stats.get(Stat::ShotsMissed),
        Side::Against => stats.get(Stat::ShotsAgainst) + stats.get(Stat::ShotsMissedAgainst),
    }
}

/// Shot total a zone count is a share of.
fn zone_total(record: &AggregatedRecord, zone: ZoneStat) -> f64 {
    match (zone.kind, zone.side) {
        (ShotKind::Attempts, side) => corsi(record, side),
        (ShotKind::OnGoal, Side::For) => record.stats.get(Stat::ShotsOnGoal),
        (ShotKind::OnGoal, Side::Against) => record.stats.get(Stat::ShotsAgainst),
    }
}

/// Compute every metric for one aggregated record.
///
/// Pure function of the record's summed stats; rows that lack a stat read it
/// as zero, so metrics that do not apply to a table come out as 0.0.
pub fn derive(record: &AggregatedRecord) -> DerivedRecord {
    let stats = &record.stats;
    let gp = stats.get(Stat::GamesPlayed);
    let toi = stats.get(Stat::TimeOnIce);
    let goals = stats.get(Stat::Goals);
    let assists = stats.get(Stat::Assists);
    let points = stats.get(Stat::Points);
    let sog = stats.get(Stat::ShotsOnGoal);
    let goals_against = stats.get(Stat::GoalsAgainst);

    let mut metrics = BTreeMap::new();

    metrics.insert(Metric::GoalsPerGame, calculate_per_game(goals, gp));
    metrics.insert(Metric::AssistsPerGame, calculate_per_game(assists, gp));
    metrics.insert(Metric::PointsPerGame, calculate_per_game(points, gp));
    metrics.insert(Metric::ShotsOnGoalPerGame, calculate_per_game(sog, gp));
    metrics.insert(
        Metric::PenaltyMinutesPerGame,
        calculate_per_game(stats.get(Stat::PenaltyMinutes), gp),
    );
    metrics.insert(Metric::TimeOnIcePerGame, calculate_per_game(toi, gp));

    metrics.insert(Metric::GoalsPer60, calculate_per_60(goals, toi));
    metrics.insert(Metric::AssistsPer60, calculate_per_60(assists, toi));
    metrics.insert(Metric::PointsPer60, calculate_per_60(points, toi));
    metrics.insert(Metric::ShotsOnGoalPer60, calculate_per_60(sog, toi));

    let shot_pctg = calculate_shot_pctg(goals, sog);
    let save_pctg = calculate_save_pctg(goals_against, stats.get(Stat::ShotsAgainst));
    metrics.insert(Metric::ShotPctg, shot_pctg);
    metrics.insert(Metric::SavePctg, save_pctg);
    metrics.insert(Metric::Pdo, calculate_pdo(shot_pctg, save_pctg));
    metrics.insert(Metric::GoalsAgainstAverage, calculate_gaa(goals_against, toi));

    metrics.insert(
        Metric::FaceoffPctg,
        calculate_faceoff_pctg(
            stats.get(Stat::FaceoffsWon),
            stats.get(Stat::FaceoffsLost),
        ),
    );

    let corsi_for = corsi(record, Side::For);
    let corsi_against = corsi(record, Side::Against);
    metrics.insert(Metric::CorsiForPctg, calculate_share(corsi_for, corsi_against));
    metrics.insert(Metric::CorsiAgainstPctg, calculate_share(corsi_against, corsi_for));

    let fenwick_for = fenwick(record, Side::For);
    let fenwick_against = fenwick(record, Side::Against);
    metrics.insert(Metric::FenwickForPctg, calculate_share(fenwick_for, fenwick_against));
    metrics.insert(
        Metric::FenwickAgainstPctg,
        calculate_share(fenwick_against, fenwick_for),
    );

    metrics.insert(
        Metric::PpPctg,
        calculate_pp_pctg(stats.get(Stat::PpGoals), stats.get(Stat::PpOpportunities)),
    );
    metrics.insert(
        Metric::PkPctg,
        calculate_pk_pctg(
            stats.get(Stat::PpGoalsAgainst),
            stats.get(Stat::ShOpportunities),
        ),
    );
    metrics.insert(Metric::PtPctg, calculate_pt_pctg(points, gp));
    metrics.insert(Metric::GoalDifferential, round2(goals - goals_against));

    let utilized = if record.venue.is_home() {
        calculate_utilized_capacity(stats.get(Stat::Attendance), stats.get(Stat::Capacity))
    } else {
        0.0
    };
    metrics.insert(Metric::UtilizedCapacityPctg, utilized);

    for zone in ZoneStat::all() {
        let share = percentage(stats.get(Stat::Zone(zone)), zone_total(record, zone));
        metrics.insert(Metric::ZoneShare(zone), share);
    }

    DerivedRecord {
        record: record.clone(),
        metrics,
    }
}

/// Derive every record of a collection, in order.
pub fn derive_all<'a, I>(records: I) -> Vec<DerivedRecord>
where
    I: IntoIterator<Item = &'a AggregatedRecord>,
{
    records.into_iter().map(derive).collect()
}
