pub mod chart;
pub mod config;
pub mod error;
pub mod geometry;
pub mod github;
pub mod metrics;
pub mod profile;
pub mod report;
pub mod snapshot;
