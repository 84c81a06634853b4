use super::alphabet::Alphabet;
use super::sequence::{Sequence, SequenceError};
use std::ops::Deref;
use std::sync::{Arc, LazyLock};

// 20 standard amino acids, then the ambiguity codes B (Asx), Z (Glx),
// X (unknown) and the stop symbol.
static PROTEIN: LazyLock<Arc<Alphabet>> = LazyLock::new(|| {
    Arc::new(Alphabet::new("ACDEFGHIKLMNPQRSTVWYBZX*".chars()).expect("amino acid symbols are unique"))
});

/// A protein sequence over the one-letter amino acid alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProteinSequence {
    seq: Sequence,
}

impl ProteinSequence {
    pub fn alphabet() -> &'static Arc<Alphabet> {
        &PROTEIN
    }

    /// Creates a protein sequence from one-letter symbols. Input is
    /// uppercased.
    ///
    /// # Errors
    ///
    /// Returns an encoding error if a symbol is not an amino acid code.
    pub fn new(symbols: &str) -> Result<Self, SequenceError> {
        let seq = Sequence::from_symbols(
            Arc::clone(&PROTEIN),
            symbols.chars().map(|c| c.to_ascii_uppercase()),
        )?;
        Ok(Self { seq })
    }

    /// Wraps an existing sequence that already uses the amino acid alphabet.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IncompatibleAlphabets`] for any other
    /// alphabet.
    pub fn from_sequence(seq: Sequence) -> Result<Self, SequenceError> {
        if seq.alphabet().as_ref() == PROTEIN.as_ref() {
            Ok(Self { seq })
        } else {
            Err(SequenceError::IncompatibleAlphabets)
        }
    }

    pub fn as_sequence(&self) -> &Sequence {
        &self.seq
    }

    pub fn into_sequence(self) -> Sequence {
        self.seq
    }

    /// Whether the sequence contains the stop symbol.
    pub fn has_stop(&self) -> bool {
        self.seq
            .iter()
            .any(|symbol| matches!(symbol, Ok('*')))
    }
}

impl Deref for ProteinSequence {
    type Target = Sequence;

    fn deref(&self) -> &Sequence {
        &self.seq
    }
}

impl From<ProteinSequence> for Sequence {
    fn from(seq: ProteinSequence) -> Sequence {
        seq.seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_encodes_one_letter_symbols() {
        let seq = ProteinSequence::new("MKV").unwrap();
        assert_eq!(seq.to_symbol_string().unwrap(), "MKV");
        assert_eq!(seq.alphabet().as_ref(), ProteinSequence::alphabet().as_ref());
    }

    #[test]
    fn new_uppercases_input() {
        let seq = ProteinSequence::new("mkv").unwrap();
        assert_eq!(seq.to_symbol_string().unwrap(), "MKV");
    }

    #[test]
    fn new_accepts_ambiguity_and_stop_symbols() {
        assert!(ProteinSequence::new("BZX*").is_ok());
    }

    #[test]
    fn new_rejects_non_amino_symbols() {
        assert!(ProteinSequence::new("MO").is_err());
    }

    #[test]
    fn has_stop_detects_the_stop_symbol() {
        assert!(ProteinSequence::new("MKV*").unwrap().has_stop());
        assert!(!ProteinSequence::new("MKV").unwrap().has_stop());
    }

    #[test]
    fn sequences_over_the_shared_alphabet_are_comparable() {
        let a = ProteinSequence::new("GAC").unwrap();
        let b = ProteinSequence::new("GAC").unwrap();
        assert_eq!(a, b);
        assert!(Arc::ptr_eq(a.alphabet(), b.alphabet()));
    }
}
