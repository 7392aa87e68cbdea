//! Conjunctive row filter.

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::models::{GameRecord, HomeRoad, SeasonType};

/// Filter selections for a view. Unset fields are inactive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub season: Option<u16>,
    pub season_type: Option<SeasonType>,
    pub home_road: Option<HomeRoad>,
    pub round_from: Option<u32>,
    pub round_to: Option<u32>,
    pub weekday: Option<Weekday>,
    pub situation: Option<String>,
}

/// One active filter condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    FromDate(NaiveDate),
    ToDate(NaiveDate),
    Season(u16),
    SeasonType(SeasonType),
    HomeRoad(HomeRoad),
    RoundFrom(u32),
    RoundTo(u32),
    Weekday(Weekday),
    Situation(String),
}

impl Clause {
    pub fn holds(&self, record: &GameRecord) -> bool {
        match self {
            Clause::FromDate(from) => record.game_date >= *from,
            Clause::ToDate(to) => record.game_date <= *to,
            Clause::Season(season) => record.season == *season,
            Clause::SeasonType(season_type) => record.season_type == *season_type,
            Clause::HomeRoad(home_road) => record.home_road == *home_road,
            Clause::RoundFrom(from) => record.round.is_some_and(|round| round >= *from),
            Clause::RoundTo(to) => record.round.is_some_and(|round| round <= *to),
            Clause::Weekday(weekday) => record.weekday() == *weekday,
            Clause::Situation(name) => record.situation(name),
        }
    }
}

impl Filter {
    /// Filter that accepts every row.
    pub fn all() -> Self {
        Self::default()
    }

    /// Builder method to set an inclusive date range.
    pub fn between(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    /// Builder method to set the season type.
    pub fn with_season_type(mut self, season_type: SeasonType) -> Self {
        self.season_type = Some(season_type);
        self
    }

    /// Builder method to set home/road.
    pub fn with_home_road(mut self, home_road: HomeRoad) -> Self {
        self.home_road = Some(home_road);
        self
    }

    /// Builder method to set an inclusive round range.
    pub fn rounds(mut self, from: u32, to: u32) -> Self {
        self.round_from = Some(from);
        self.round_to = Some(to);
        self
    }

    /// Builder method to require a weekday.
    pub fn on_weekday(mut self, weekday: Weekday) -> Self {
        self.weekday = Some(weekday);
        self
    }

    /// Builder method to require a situation flag.
    pub fn in_situation(mut self, name: impl Into<String>) -> Self {
        self.situation = Some(name.into());
        self
    }

    /// The active clauses, in evaluation order.
    pub fn clauses(&self) -> Vec<Clause> {
        let optional = [
            self.from.map(Clause::FromDate),
            self.to.map(Clause::ToDate),
            self.season.map(Clause::Season),
            self.season_type.map(Clause::SeasonType),
            self.home_road.map(Clause::HomeRoad),
            self.round_from.map(Clause::RoundFrom),
            self.round_to.map(Clause::RoundTo),
            self.weekday.map(Clause::Weekday),
            self.situation
                .as_ref()
                .filter(|name| !name.is_empty())
                .cloned()
                .map(Clause::Situation),
        ];
        optional.into_iter().flatten().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses().is_empty()
    }

    /// Predicate holding iff every active clause holds.
    pub fn predicate(&self) -> impl Fn(&GameRecord) -> bool {
        let clauses = self.clauses();
        move |record: &GameRecord| clauses.iter().all(|clause| clause.holds(record))
    }

    pub fn matches(&self, record: &GameRecord) -> bool {
        self.clauses().iter().all(|clause| clause.holds(record))
    }
}
