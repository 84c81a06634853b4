use super::code::{CodeArray, CodeWidth};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AlphabetError {
    #[error("symbol '{0}' is not part of the alphabet")]
    UnknownSymbol(char),
    #[error("code {code} is out of range for an alphabet of {size} symbols")]
    InvalidCode { code: u64, size: usize },
    #[error("duplicate symbol '{0}' in alphabet definition")]
    DuplicateSymbol(char),
}

/// A bijective mapping between a finite ordered set of symbols and the dense
/// integer codes `0..size`.
///
/// The code of a symbol is its position in the ordering given at construction
/// time. An `Alphabet` is immutable once constructed and is typically shared
/// between many sequences via [`Arc`](std::sync::Arc).
///
/// One alphabet *extends* another if the other's symbol ordering is a prefix
/// of its own, position for position. Extension is the compatibility relation
/// used to decide whether sequences over different alphabets may be
/// concatenated: every code that is valid under the smaller alphabet decodes
/// to the same symbol under the larger one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<char>", into = "Vec<char>")]
pub struct Alphabet {
    symbols: Vec<char>,
    codes: HashMap<char, u64>,
}

impl Alphabet {
    /// Creates an alphabet from an ordered sequence of unique symbols.
    ///
    /// # Errors
    ///
    /// Returns [`AlphabetError::DuplicateSymbol`] if a symbol occurs more
    /// than once, since the symbol-to-code mapping must be a bijection.
    pub fn new(symbols: impl IntoIterator<Item = char>) -> Result<Self, AlphabetError> {
        let symbols: Vec<char> = symbols.into_iter().collect();
        let mut codes = HashMap::with_capacity(symbols.len());
        for (code, &symbol) in symbols.iter().enumerate() {
            if codes.insert(symbol, code as u64).is_some() {
                return Err(AlphabetError::DuplicateSymbol(symbol));
            }
        }
        Ok(Self { symbols, codes })
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// The symbols in code order.
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.codes.contains_key(&symbol)
    }

    /// The smallest unsigned integer width able to represent every code of
    /// this alphabet (`size - 1` being the largest code).
    pub fn code_width(&self) -> CodeWidth {
        CodeWidth::for_alphabet_size(self.symbols.len())
    }

    /// Translates a symbol into its code.
    ///
    /// # Errors
    ///
    /// Returns [`AlphabetError::UnknownSymbol`] if the symbol is not part of
    /// this alphabet.
    pub fn encode(&self, symbol: char) -> Result<u64, AlphabetError> {
        self.codes
            .get(&symbol)
            .copied()
            .ok_or(AlphabetError::UnknownSymbol(symbol))
    }

    /// Translates a code back into its symbol.
    ///
    /// # Errors
    ///
    /// Returns [`AlphabetError::InvalidCode`] if the code is outside
    /// `0..self.len()`.
    pub fn decode(&self, code: u64) -> Result<char, AlphabetError> {
        usize::try_from(code)
            .ok()
            .and_then(|index| self.symbols.get(index))
            .copied()
            .ok_or(AlphabetError::InvalidCode {
                code,
                size: self.symbols.len(),
            })
    }

    /// Encodes a whole symbol iterable into a code array at this alphabet's
    /// minimal width. Semantically equivalent to element-wise [`encode`],
    /// implemented over the constructed lookup map.
    ///
    /// [`encode`]: Alphabet::encode
    pub fn encode_all(
        &self,
        symbols: impl IntoIterator<Item = char>,
    ) -> Result<CodeArray, AlphabetError> {
        let symbols = symbols.into_iter();
        let mut code = CodeArray::with_capacity(self.code_width(), symbols.size_hint().0);
        for symbol in symbols {
            code.push(self.encode(symbol)?);
        }
        Ok(code)
    }

    /// Decodes a whole code array back into symbols.
    ///
    /// # Errors
    ///
    /// Returns [`AlphabetError::InvalidCode`] for the first out-of-range code
    /// encountered.
    pub fn decode_all(&self, code: &CodeArray) -> Result<Vec<char>, AlphabetError> {
        code.iter().map(|value| self.decode(value)).collect()
    }

    /// Whether this alphabet extends `other`: `other`'s symbol ordering is a
    /// prefix of this alphabet's ordering. Every alphabet extends itself.
    pub fn extends(&self, other: &Alphabet) -> bool {
        self.symbols.len() >= other.symbols.len()
            && self.symbols[..other.symbols.len()] == other.symbols[..]
    }
}

impl PartialEq for Alphabet {
    fn eq(&self, other: &Self) -> bool {
        self.symbols == other.symbols
    }
}

impl Eq for Alphabet {}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &symbol in &self.symbols {
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}

impl TryFrom<Vec<char>> for Alphabet {
    type Error = AlphabetError;

    fn try_from(symbols: Vec<char>) -> Result<Self, Self::Error> {
        Alphabet::new(symbols)
    }
}

impl From<Alphabet> for Vec<char> {
    fn from(alphabet: Alphabet) -> Self {
        alphabet.symbols
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dna() -> Alphabet {
        Alphabet::new("ACGT".chars()).unwrap()
    }

    #[test]
    fn new_assigns_codes_in_symbol_order() {
        let alphabet = dna();
        assert_eq!(alphabet.len(), 4);
        assert_eq!(alphabet.encode('A').unwrap(), 0);
        assert_eq!(alphabet.encode('C').unwrap(), 1);
        assert_eq!(alphabet.encode('G').unwrap(), 2);
        assert_eq!(alphabet.encode('T').unwrap(), 3);
    }

    #[test]
    fn new_rejects_duplicate_symbols() {
        assert_eq!(
            Alphabet::new("ACGA".chars()).unwrap_err(),
            AlphabetError::DuplicateSymbol('A')
        );
    }

    #[test]
    fn encode_rejects_unknown_symbol() {
        assert_eq!(
            dna().encode('U').unwrap_err(),
            AlphabetError::UnknownSymbol('U')
        );
    }

    #[test]
    fn decode_is_the_inverse_of_encode() {
        let alphabet = dna();
        for symbol in "ACGT".chars() {
            let code = alphabet.encode(symbol).unwrap();
            assert_eq!(alphabet.decode(code).unwrap(), symbol);
        }
    }

    #[test]
    fn decode_rejects_out_of_range_code() {
        assert_eq!(
            dna().decode(4).unwrap_err(),
            AlphabetError::InvalidCode { code: 4, size: 4 }
        );
    }

    #[test]
    fn encode_all_matches_element_wise_encoding() {
        let alphabet = dna();
        let code = alphabet.encode_all("ACGTA".chars()).unwrap();
        assert_eq!(code.iter().collect::<Vec<_>>(), vec![0, 1, 2, 3, 0]);
        assert_eq!(code.width(), CodeWidth::U8);
    }

    #[test]
    fn encode_all_fails_on_foreign_symbol() {
        assert_eq!(
            dna().encode_all("ACGX".chars()).unwrap_err(),
            AlphabetError::UnknownSymbol('X')
        );
    }

    #[test]
    fn decode_all_round_trips_symbols() {
        let alphabet = dna();
        let code = alphabet.encode_all("TGCA".chars()).unwrap();
        assert_eq!(alphabet.decode_all(&code).unwrap(), vec!['T', 'G', 'C', 'A']);
    }

    #[test]
    fn extends_holds_for_prefix_orderings() {
        let unambiguous = dna();
        let ambiguous = Alphabet::new("ACGTN".chars()).unwrap();
        assert!(ambiguous.extends(&unambiguous));
        assert!(!unambiguous.extends(&ambiguous));
    }

    #[test]
    fn extends_is_reflexive() {
        let alphabet = dna();
        assert!(alphabet.extends(&alphabet));
    }

    #[test]
    fn extends_requires_position_for_position_equality() {
        let alphabet = dna();
        let reordered = Alphabet::new("CAGT".chars()).unwrap();
        assert!(!alphabet.extends(&reordered));
        assert!(!reordered.extends(&alphabet));
    }

    #[test]
    fn extends_is_transitive() {
        let a = Alphabet::new("AC".chars()).unwrap();
        let b = Alphabet::new("ACGT".chars()).unwrap();
        let c = Alphabet::new("ACGTN".chars()).unwrap();
        assert!(b.extends(&a));
        assert!(c.extends(&b));
        assert!(c.extends(&a));
    }

    #[test]
    fn decoded_symbols_agree_between_extending_alphabets() {
        let smaller = dna();
        let larger = Alphabet::new("ACGTRYWSMKHBVDN".chars()).unwrap();
        assert!(larger.extends(&smaller));
        for code in 0..smaller.len() as u64 {
            assert_eq!(
                larger.decode(code).unwrap(),
                smaller.decode(code).unwrap()
            );
        }
    }

    #[test]
    fn equality_is_by_symbol_ordering() {
        assert_eq!(dna(), Alphabet::new("ACGT".chars()).unwrap());
        assert_ne!(dna(), Alphabet::new("TGCA".chars()).unwrap());
    }

    #[test]
    fn display_concatenates_symbols() {
        assert_eq!(dna().to_string(), "ACGT");
    }

    #[derive(serde::Serialize, serde::Deserialize)]
    struct Definition {
        alphabet: Alphabet,
    }

    #[test]
    fn serde_round_trips_as_symbol_list() {
        let text = toml::to_string(&Definition { alphabet: dna() }).unwrap();
        let parsed: Definition = toml::from_str(&text).unwrap();
        assert_eq!(parsed.alphabet, dna());
    }

    #[test]
    fn serde_rejects_duplicate_symbols() {
        let result: Result<Definition, _> = toml::from_str("alphabet = [\"A\", \"A\"]");
        assert!(result.is_err());
    }
}
