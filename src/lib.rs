//! # Rink Stats
//!
//! Hockey league statistics: sums per-game rows into per-player, per-goalie
//! and per-team records, derives rates and shares, and orders them by
//! tie-break chains.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (game rows, stats, metrics, fields)
//! - **aggregate**: Filtered per-group summation and multi-team merging
//! - **calculate**: Derived statistics computation
//! - **sort**: Tie-break chains and column selection
//! - **view**: Table and profile pipelines, text and JSON rendering
//! - **storage**: Dataset layout and CSV/JSON parsing
//! - **fetch**: Local and HTTP dataset sources, season loading
//! - **config**: Configuration loading and validation

pub mod aggregate;
pub mod calculate;
pub mod config;
pub mod fetch;
pub mod models;
pub mod sort;
pub mod storage;
pub mod view;

pub use models::*;
