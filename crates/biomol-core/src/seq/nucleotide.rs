use super::alphabet::Alphabet;
use super::sequence::{Sequence, SequenceError};
use phf::phf_map;
use std::ops::Deref;
use std::sync::{Arc, LazyLock};

static UNAMBIGUOUS: LazyLock<Arc<Alphabet>> = LazyLock::new(|| {
    Arc::new(Alphabet::new("ACGT".chars()).expect("unambiguous nucleotide symbols are unique"))
});

// The first four symbols equal the unambiguous alphabet, so this alphabet
// extends it and sequences over the two remain concatenable.
static AMBIGUOUS: LazyLock<Arc<Alphabet>> = LazyLock::new(|| {
    Arc::new(
        Alphabet::new("ACGTRYWSMKHBVDN".chars())
            .expect("ambiguous nucleotide symbols are unique"),
    )
});

static COMPLEMENTS: phf::Map<char, char> = phf_map! {
    'A' => 'T', 'C' => 'G', 'G' => 'C', 'T' => 'A',
    'R' => 'Y', 'Y' => 'R', 'W' => 'W', 'S' => 'S',
    'M' => 'K', 'K' => 'M', 'H' => 'D', 'D' => 'H',
    'B' => 'V', 'V' => 'B', 'N' => 'N',
};

/// A DNA sequence over the four-letter nucleotide alphabet, or over the
/// IUPAC ambiguity alphabet when the input requires it.
///
/// Input symbols are uppercased and uracil is projected onto thymine, so
/// RNA-flavored input is accepted. The unambiguous alphabet is preferred;
/// the ambiguous alphabet is selected only when an ambiguity symbol occurs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NucleotideSequence {
    seq: Sequence,
}

impl NucleotideSequence {
    pub fn unambiguous_alphabet() -> &'static Arc<Alphabet> {
        &UNAMBIGUOUS
    }

    pub fn ambiguous_alphabet() -> &'static Arc<Alphabet> {
        &AMBIGUOUS
    }

    /// Creates a nucleotide sequence from symbols.
    ///
    /// # Errors
    ///
    /// Returns an encoding error if a symbol is not a nucleotide or IUPAC
    /// ambiguity code.
    pub fn new(symbols: &str) -> Result<Self, SequenceError> {
        let normalized: String = symbols
            .chars()
            .map(|c| c.to_ascii_uppercase())
            .map(|c| if c == 'U' { 'T' } else { c })
            .collect();
        let needs_ambiguous = normalized.chars().any(|c| !UNAMBIGUOUS.contains(c));
        let alphabet = if needs_ambiguous {
            Arc::clone(&AMBIGUOUS)
        } else {
            Arc::clone(&UNAMBIGUOUS)
        };
        let seq = Sequence::from_symbols(alphabet, normalized.chars())?;
        Ok(Self { seq })
    }

    /// Wraps an existing sequence that already uses one of the nucleotide
    /// alphabets.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IncompatibleAlphabets`] for any other
    /// alphabet.
    pub fn from_sequence(seq: Sequence) -> Result<Self, SequenceError> {
        if seq.alphabet().as_ref() == UNAMBIGUOUS.as_ref()
            || seq.alphabet().as_ref() == AMBIGUOUS.as_ref()
        {
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

    /// The base-paired counterpart: every symbol replaced by its complement.
    ///
    /// # Errors
    ///
    /// Returns a decoding error if the underlying codes have been made
    /// invalid through raw code assignment.
    pub fn complement(&self) -> Result<Self, SequenceError> {
        let complemented: String = self
            .seq
            .iter()
            .map(|symbol| {
                symbol.map(|s| {
                    *COMPLEMENTS
                        .get(&s)
                        .expect("every nucleotide alphabet symbol has a complement")
                })
            })
            .collect::<Result<_, _>>()?;
        let seq = Sequence::from_symbols(Arc::clone(self.seq.alphabet()), complemented.chars())?;
        Ok(Self { seq })
    }

    /// The complement read in reverse order, i.e. the opposite strand in
    /// 5'→3' direction.
    pub fn reverse_complement(&self) -> Result<Self, SequenceError> {
        let complement = self.complement()?;
        Ok(Self {
            seq: complement.seq.reversed(),
        })
    }
}

impl Deref for NucleotideSequence {
    type Target = Sequence;

    fn deref(&self) -> &Sequence {
        &self.seq
    }
}

impl From<NucleotideSequence> for Sequence {
    fn from(seq: NucleotideSequence) -> Sequence {
        seq.seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_prefers_the_unambiguous_alphabet() {
        let seq = NucleotideSequence::new("ACGTA").unwrap();
        assert_eq!(
            seq.alphabet().as_ref(),
            NucleotideSequence::unambiguous_alphabet().as_ref()
        );
        assert_eq!(seq.to_symbol_string().unwrap(), "ACGTA");
    }

    #[test]
    fn new_switches_to_the_ambiguous_alphabet_when_needed() {
        let seq = NucleotideSequence::new("ACGTN").unwrap();
        assert_eq!(
            seq.alphabet().as_ref(),
            NucleotideSequence::ambiguous_alphabet().as_ref()
        );
    }

    #[test]
    fn new_uppercases_and_projects_uracil() {
        let seq = NucleotideSequence::new("acgu").unwrap();
        assert_eq!(seq.to_symbol_string().unwrap(), "ACGT");
    }

    #[test]
    fn new_rejects_non_nucleotide_symbols() {
        assert!(NucleotideSequence::new("ACGJ").is_err());
    }

    #[test]
    fn ambiguous_alphabet_extends_the_unambiguous_one() {
        assert!(
            NucleotideSequence::ambiguous_alphabet()
                .extends(NucleotideSequence::unambiguous_alphabet())
        );
    }

    #[test]
    fn unambiguous_and_ambiguous_sequences_concatenate() {
        let plain = NucleotideSequence::new("ACGT").unwrap();
        let iupac = NucleotideSequence::new("NRY").unwrap();
        let joined = plain.concat(&iupac).unwrap();
        assert_eq!(joined.to_symbol_string().unwrap(), "ACGTNRY");
        assert_eq!(
            joined.alphabet().as_ref(),
            NucleotideSequence::ambiguous_alphabet().as_ref()
        );
    }

    #[test]
    fn complement_replaces_every_symbol() {
        let seq = NucleotideSequence::new("ACGTA").unwrap();
        assert_eq!(seq.complement().unwrap().to_symbol_string().unwrap(), "TGCAT");
    }

    #[test]
    fn complement_twice_is_the_identity() {
        let seq = NucleotideSequence::new("ACGTRYWSMKHBVDN").unwrap();
        assert_eq!(seq.complement().unwrap().complement().unwrap(), seq);
    }

    #[test]
    fn reverse_complement_reads_the_opposite_strand() {
        let seq = NucleotideSequence::new("ACGTA").unwrap();
        assert_eq!(
            seq.reverse_complement().unwrap().to_symbol_string().unwrap(),
            "TACGT"
        );
    }

    #[test]
    fn from_sequence_rejects_foreign_alphabets() {
        let foreign = Sequence::from_symbols(
            Arc::new(Alphabet::new("XY".chars()).unwrap()),
            "XY".chars(),
        )
        .unwrap();
        assert!(NucleotideSequence::from_sequence(foreign).is_err());
    }
}
