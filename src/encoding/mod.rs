pub mod peptide_encoder;
