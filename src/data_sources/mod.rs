pub mod prediction_table;
