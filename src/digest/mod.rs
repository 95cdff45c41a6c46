pub mod digestion;
