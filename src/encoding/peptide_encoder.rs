use crate::errors::{FlyerMapError, Result};
use crate::models::Peptide;

/// Number of slots the classifier expects per peptide.
pub const ENCODED_LENGTH: usize = 40;

/// Code used for right padding. Never produced for a residue.
pub const PADDING_CODE: u8 = 0;

/// Residue to integer table the detectability model was trained with.
/// Changing it breaks compatibility with existing model weights.
const AA_TO_INT: [(char, u8); 20] = [
    ('A', 1),
    ('C', 2),
    ('D', 3),
    ('E', 4),
    ('F', 5),
    ('G', 6),
    ('H', 7),
    ('I', 8),
    ('K', 9),
    ('L', 10),
    ('M', 11),
    ('N', 12),
    ('P', 13),
    ('Q', 14),
    ('R', 15),
    ('S', 16),
    ('T', 17),
    ('V', 18),
    ('W', 19),
    ('Y', 20),
];

pub fn residue_code(residue: char) -> Option<u8> {
    AA_TO_INT
        .iter()
        .find(|(aa, _)| *aa == residue)
        .map(|(_, code)| *code)
}

pub fn code_residue(code: u8) -> Option<char> {
    AA_TO_INT
        .iter()
        .find(|(_, c)| *c == code)
        .map(|(aa, _)| *aa)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EncodedPeptide([u8; ENCODED_LENGTH]);

impl EncodedPeptide {
    pub fn codes(&self) -> &[u8; ENCODED_LENGTH] {
        &self.0
    }

    /// Number of non-padding slots.
    pub fn residue_count(&self) -> usize {
        self.0
            .iter()
            .position(|&c| c == PADDING_CODE)
            .unwrap_or(ENCODED_LENGTH)
    }

    /// Residue sequence with the padding stripped. `None` if a slot holds a
    /// code outside the table.
    pub fn decode(&self) -> Option<String> {
        self.0[..self.residue_count()]
            .iter()
            .map(|&c| code_residue(c))
            .collect()
    }
}

/// Encodes a residue string, right-padded with zeros.
///
/// Example:
/// ```
/// use flyermap::encoding::peptide_encoder::encode_sequence;
/// let encoded = encode_sequence("PEPTIDEK").unwrap();
/// assert_eq!(&encoded.codes()[..4], &[13, 4, 13, 17]);
/// assert_eq!(encoded.codes()[8], 0);
/// assert_eq!(encoded.decode().as_deref(), Some("PEPTIDEK"));
/// ```
pub fn encode_sequence(sequence: &str) -> Result<EncodedPeptide> {
    let length = sequence.chars().count();
    if length > ENCODED_LENGTH {
        return Err(FlyerMapError::PeptideTooLong {
            length,
            max: ENCODED_LENGTH,
        });
    }
    let mut codes = [PADDING_CODE; ENCODED_LENGTH];
    for (position, residue) in sequence.chars().enumerate() {
        codes[position] =
            residue_code(residue).ok_or(FlyerMapError::InvalidResidue { residue, position })?;
    }
    Ok(EncodedPeptide(codes))
}

pub fn encode_peptide(peptide: &Peptide) -> Result<EncodedPeptide> {
    encode_sequence(&peptide.sequence)
}

/// Encodes all peptides or none: the first failure is returned.
pub fn encode_peptides(peptides: &[Peptide]) -> Result<Vec<EncodedPeptide>> {
    peptides.iter().map(encode_peptide).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protein::models::STANDARD_RESIDUES;

    #[test]
    fn test_table_covers_alphabet() {
        for (i, aa) in STANDARD_RESIDUES.iter().enumerate() {
            let code = residue_code(*aa as char).unwrap();
            assert_eq!(code as usize, i + 1);
            assert_ne!(code, PADDING_CODE);
        }
        assert_eq!(residue_code('B'), None);
        assert_eq!(residue_code('0'), None);
        assert_eq!(code_residue(PADDING_CODE), None);
    }

    #[test]
    fn test_encode_pads_right() {
        let encoded = encode_sequence("MVLSPADK").unwrap();
        assert_eq!(
            &encoded.codes()[..8],
            &[11, 18, 10, 16, 13, 1, 3, 9],
            "Got: {:?}",
            encoded
        );
        assert!(encoded.codes()[8..].iter().all(|&c| c == PADDING_CODE));
        assert_eq!(encoded.residue_count(), 8);
    }

    #[test]
    fn test_decode_recovers_sequence() {
        for seq in ["MVLSPADK", "VADALTNAVAHVDDMPNALSALSDLHAHK", "K", ""] {
            let encoded = encode_sequence(seq).unwrap();
            assert_eq!(encoded.decode().as_deref(), Some(seq));
        }
        let full: String = "ACDEFGHIKLMNPQRSTVWY".repeat(2);
        let encoded = encode_sequence(&full).unwrap();
        assert_eq!(encoded.residue_count(), ENCODED_LENGTH);
        assert_eq!(encoded.decode(), Some(full));
    }

    #[test]
    fn test_too_long_is_rejected() {
        let seq = "A".repeat(41);
        match encode_sequence(&seq) {
            Err(FlyerMapError::PeptideTooLong { length, max }) => {
                assert_eq!(length, 41);
                assert_eq!(max, 40);
            }
            other => panic!("Expected PeptideTooLong, got: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_residue_is_rejected() {
        assert!(matches!(
            encode_sequence("PEPXIDE"),
            Err(FlyerMapError::InvalidResidue {
                residue: 'X',
                position: 3
            })
        ));
    }

    #[test]
    fn test_encode_peptides_all_or_nothing() {
        let parent = format!("PEPTIDEK{}", "A".repeat(45));
        let peptides = vec![
            Peptide::from_parent(&parent, 0..8),
            Peptide::from_parent(&parent, 8..53),
        ];
        assert!(encode_peptides(&peptides).is_err());
        assert_eq!(encode_peptides(&peptides[..1]).unwrap().len(), 1);
    }
}
