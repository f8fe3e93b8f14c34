//! Redoubt engine library.
//!
//! Exposes the board model, event ingestion, threat estimation, planners,
//! and protocol modules for use by integration tests and the binary entry
//! point.

pub mod board;
pub mod config;
pub mod engine;
pub mod game;
pub mod ingest;
pub mod ledger;
pub mod plan;
pub mod protocol;
pub mod state;
pub mod threat;
