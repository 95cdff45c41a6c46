pub mod coverage_map;
pub mod statistics;
