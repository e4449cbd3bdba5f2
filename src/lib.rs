//! Alertmap: enhanced air-raid alert data pipeline.
//!
//! Fetches region boundaries and real-time alert statuses for Ukrainian
//! administrative regions, enriches each raw status into an
//! [`models::EnhancedAlert`] with a derived alert level, threat set,
//! duration, and intensity score, aggregates a [`models::Statistics`]
//! summary, and persists everything as JSON for the mapping front end.

pub mod catalog;
pub mod classifier;
pub mod config;
pub mod duration;
pub mod enricher;
pub mod error;
pub mod fetch;
pub mod intensity;
pub mod models;
pub mod pipeline;
pub mod stats;
pub mod storage;
