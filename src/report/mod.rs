pub mod coverage_text;
pub mod csv_table;
