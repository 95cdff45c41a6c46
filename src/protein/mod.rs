pub mod fasta;
pub mod models;
