//! Core data models for hockey statistics.

mod field;
mod game;
mod ids;
mod metric;
mod record;
mod roster;
mod stat;
mod table;

pub use field::*;
pub use game::*;
pub use ids::*;
pub use metric::*;
pub use record::*;
pub use roster::*;
pub use stat::*;
pub use table::*;
