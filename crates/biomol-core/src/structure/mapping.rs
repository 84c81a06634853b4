use super::ids::ChainId;
use super::model::Structure;
use crate::seq::{NucleotideSequence, ProteinSequence, SequenceError};
use phf::{Map, Set, phf_map, phf_set};

static AMINO_ONE_LETTER: Map<&'static str, char> = phf_map! {
    "ALA" => 'A', "ARG" => 'R', "ASN" => 'N', "ASP" => 'D',
    "CYS" => 'C', "GLN" => 'Q', "GLU" => 'E', "GLY" => 'G',
    "HIS" => 'H', "ILE" => 'I', "LEU" => 'L', "LYS" => 'K',
    "MET" => 'M', "PHE" => 'F', "PRO" => 'P', "SER" => 'S',
    "THR" => 'T', "TRP" => 'W', "TYR" => 'Y', "VAL" => 'V',
    // Ambiguity codes and common substitutions
    "ASX" => 'B', "GLX" => 'Z', "UNK" => 'X', "MSE" => 'M',
};

static NUCLEOTIDE_SYMBOLS: Map<&'static str, char> = phf_map! {
    // Deoxyribonucleotides
    "DA" => 'A', "DC" => 'C', "DG" => 'G', "DT" => 'T',
    // Ribonucleotides; uracil is projected onto thymine by the
    // nucleotide alphabet
    "A" => 'A', "C" => 'C', "G" => 'G', "U" => 'U', "T" => 'T',
};

static WATER_NAMES: Set<&'static str> = phf_set! { "HOH", "WAT", "DOD" };

// Element symbols longer than one character that occur in biomolecular
// structures. Used to disambiguate the leading columns of an atom name
// field: two-letter elements start in the first column, one-letter elements
// leave it blank.
static TWO_LETTER_ELEMENTS: Set<&'static str> = phf_set! {
    "BR", "CL", "FE", "MG", "MN", "NA", "ZN", "CU", "NI", "CO",
    "SE", "CD", "HG", "CA", "AS", "AL", "LI", "BE", "RB", "SR",
    "MO", "PT", "AU", "PB",
};

/// One-letter amino acid code for a three-letter residue name, if known.
pub fn amino_one_letter(residue_name: &str) -> Option<char> {
    AMINO_ONE_LETTER.get(residue_name.trim()).copied()
}

/// Nucleotide symbol for a residue name, if known.
pub fn nucleotide_symbol(residue_name: &str) -> Option<char> {
    NUCLEOTIDE_SYMBOLS.get(residue_name.trim()).copied()
}

pub fn is_water(residue_name: &str) -> bool {
    WATER_NAMES.contains(residue_name.trim())
}

/// Guesses the element from a raw, untrimmed atom name field.
///
/// Follows the fixed-column convention of legacy coordinate formats: a
/// two-letter element ("FE") fills the field from the first column, while a
/// one-letter element leaves it blank (" CA " is an alpha carbon, "CA  " is
/// calcium). Leading digits mark hydrogens ("1HB2").
pub fn guess_element(raw_name: &str) -> String {
    let mut chars = raw_name.chars();
    let first = chars.next().unwrap_or(' ');
    let second = chars.next().unwrap_or(' ');

    if first.is_ascii_alphabetic() {
        let candidate: String = [first, second]
            .iter()
            .filter(|c| c.is_ascii_alphabetic())
            .map(|c| c.to_ascii_uppercase())
            .collect();
        if candidate.len() == 2 && TWO_LETTER_ELEMENTS.contains(candidate.as_str()) {
            return candidate;
        }
    }

    raw_name
        .chars()
        .find(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase().to_string())
        .unwrap_or_default()
}

/// Extracts the protein sequence of a chain.
///
/// Residues are visited in chain order; known residue names map to their
/// one-letter code, unknown polymer residues to 'X'. Water and unknown
/// hetero residues (ions, ligands) are skipped.
///
/// # Errors
///
/// Returns an encoding error only if the produced symbols fall outside the
/// amino acid alphabet, which the tables prevent by construction.
pub fn protein_sequence(
    structure: &Structure,
    chain_id: ChainId,
) -> Result<ProteinSequence, SequenceError> {
    let symbols = chain_symbols(structure, chain_id, |residue_name| {
        amino_one_letter(residue_name)
    });
    ProteinSequence::new(&symbols)
}

/// Extracts the nucleotide sequence of a chain.
///
/// Known nucleotide residue names map to their symbol, unknown polymer
/// residues to 'N'. Water and unknown hetero residues are skipped.
///
/// # Errors
///
/// Returns an encoding error only if the produced symbols fall outside the
/// nucleotide alphabets, which the tables prevent by construction.
pub fn nucleotide_sequence(
    structure: &Structure,
    chain_id: ChainId,
) -> Result<NucleotideSequence, SequenceError> {
    let symbols = chain_symbols(structure, chain_id, |residue_name| {
        nucleotide_symbol(residue_name)
    });
    // 'N' is the "any base" symbol, so unknown polymer residues force the
    // ambiguous alphabet.
    NucleotideSequence::new(&symbols.replace('X', "N"))
}

fn chain_symbols(
    structure: &Structure,
    chain_id: ChainId,
    lookup: impl Fn(&str) -> Option<char>,
) -> String {
    let Some(chain) = structure.chain(chain_id) else {
        return String::new();
    };
    chain
        .residues()
        .iter()
        .filter_map(|&residue_id| structure.residue(residue_id))
        .filter_map(|residue| match lookup(&residue.name) {
            Some(symbol) => Some(symbol),
            None if residue.hetero || is_water(&residue.name) => None,
            None => Some('X'),
        })
        .collect()
}
