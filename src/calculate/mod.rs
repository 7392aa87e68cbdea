//! Derived statistics.
//!
//! Turns summed counting stats into rates and ratios:
//! - per-game and per-60 rates
//! - shooting, save, faceoff and zone-share percentages
//! - PDO and Corsi/Fenwick shares
//! - special teams, standings and attendance percentages
//!
//! Every ratio with a zero denominator is 0.0.

mod derive;

pub use derive::*;

/// Round to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `numerator / denominator`, or 0.0 when the denominator is zero.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 || !denominator.is_finite() {
        0.0
    } else {
        numerator / denominator
    }
}

/// `numerator / denominator` as a rounded percentage.
pub fn percentage(numerator: f64, denominator: f64) -> f64 {
    round2(ratio(numerator, denominator) * 100.0)
}

/// Stat per game played.
pub fn calculate_per_game(value: f64, games_played: f64) -> f64 {
    round2(ratio(value, games_played))
}

/// Stat normalized to 60 minutes of ice time given in seconds.
pub fn calculate_per_60(value: f64, time_on_ice_secs: f64) -> f64 {
    round2(ratio(value, time_on_ice_secs / 60.0) * 60.0)
}

/// Goals per shot on goal, in percent.
pub fn calculate_shot_pctg(goals: f64, shots_on_goal: f64) -> f64 {
    percentage(goals, shots_on_goal)
}

/// Saved share of shots on goal against, in percent.
pub fn calculate_save_pctg(goals_against: f64, shots_against: f64) -> f64 {
    if shots_against == 0.0 {
        return 0.0;
    }
    round2((1.0 - goals_against / shots_against) * 100.0)
}

/// Goals against scaled to a 60-minute game.
pub fn calculate_gaa(goals_against: f64, time_on_ice_secs: f64) -> f64 {
    round2(ratio(goals_against * 3600.0, time_on_ice_secs))
}

/// Faceoffs won share, in percent.
pub fn calculate_faceoff_pctg(won: f64, lost: f64) -> f64 {
    percentage(won, won + lost)
}

/// Sum of shooting and save percentage.
pub fn calculate_pdo(shot_pctg: f64, save_pctg: f64) -> f64 {
    round2(shot_pctg + save_pctg)
}

/// Own share of a for/against pair, in percent.
pub fn calculate_share(own: f64, opponent: f64) -> f64 {
    percentage(own, own + opponent)
}

/// Power-play goals per opportunity, in percent.
pub fn calculate_pp_pctg(pp_goals: f64, pp_opportunities: f64) -> f64 {
    percentage(pp_goals, pp_opportunities)
}

/// Share of shorthanded situations killed without conceding, in percent.
pub fn calculate_pk_pctg(pp_goals_against: f64, sh_opportunities: f64) -> f64 {
    if sh_opportunities == 0.0 {
        return 0.0;
    }
    round2(100.0 - pp_goals_against / sh_opportunities * 100.0)
}

/// Points taken out of three available per game, in percent.
pub fn calculate_pt_pctg(points: f64, games_played: f64) -> f64 {
    percentage(points, games_played * 3.0)
}

/// Attendance over venue capacity, in percent.
pub fn calculate_utilized_capacity(attendance: f64, capacity: f64) -> f64 {
    percentage(attendance, capacity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(44.4444), 44.44);
        assert_eq!(round2(0.005), 0.01);
        assert_eq!(round2(-1.234), -1.23);
    }

    #[test]
    fn test_ratio_zero_denominator() {
        assert_eq!(ratio(5.0, 0.0), 0.0);
        assert_eq!(ratio(0.0, 0.0), 0.0);
        assert!(!ratio(1.0, 0.0).is_nan());
    }

    #[test]
    fn test_per_game() {
        assert_eq!(calculate_per_game(10.0, 4.0), 2.5);
        assert_eq!(calculate_per_game(3.0, 0.0), 0.0);
    }

    #[test]
    fn test_per_60() {
        // 2 goals in 30 minutes = 4 per 60
        assert_eq!(calculate_per_60(2.0, 1800.0), 4.0);
        assert_eq!(calculate_per_60(2.0, 0.0), 0.0);
    }

    #[test]
    fn test_shot_pctg() {
        assert_eq!(calculate_shot_pctg(1.0, 8.0), 12.5);
        assert_eq!(calculate_shot_pctg(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_save_pctg_uses_complement() {
        assert_eq!(calculate_save_pctg(3.0, 30.0), 90.0);
        assert_eq!(calculate_save_pctg(0.0, 25.0), 100.0);
        assert_eq!(calculate_save_pctg(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_gaa() {
        // 3 goals over two full games
        assert_eq!(calculate_gaa(3.0, 7200.0), 1.5);
        assert_eq!(calculate_gaa(3.0, 0.0), 0.0);
    }

    #[test]
    fn test_faceoff_pctg() {
        assert_eq!(calculate_faceoff_pctg(6.0, 4.0), 60.0);
        assert_eq!(calculate_faceoff_pctg(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_pdo_is_plain_sum() {
        assert_eq!(calculate_pdo(10.0, 90.5), 100.5);
    }

    #[test]
    fn test_share() {
        assert_eq!(calculate_share(30.0, 20.0), 60.0);
        assert_eq!(calculate_share(20.0, 30.0), 40.0);
        assert_eq!(calculate_share(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_special_teams() {
        assert_eq!(calculate_pp_pctg(5.0, 20.0), 25.0);
        assert_eq!(calculate_pk_pctg(4.0, 20.0), 80.0);
        assert_eq!(calculate_pk_pctg(0.0, 0.0), 0.0);
        assert_eq!(calculate_pp_pctg(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_pt_pctg() {
        assert_eq!(calculate_pt_pctg(4.0, 3.0), 44.44);
        assert_eq!(calculate_pt_pctg(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_utilized_capacity() {
        assert_eq!(calculate_utilized_capacity(10600.0, 13600.0), 77.94);
        assert_eq!(calculate_utilized_capacity(100.0, 0.0), 0.0);
    }
}
