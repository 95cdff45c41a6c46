pub mod classifier;
pub mod config;
pub mod coverage;
pub mod data_sources;
pub mod digest;
pub mod encoding;
pub mod errors;
pub mod models;
pub mod pipeline;
pub mod protein;
pub mod report;
