use super::alphabet::{Alphabet, AlphabetError};
use super::code::CodeArray;
use std::ops::Range;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SequenceError {
    #[error(transparent)]
    Alphabet(#[from] AlphabetError),
    #[error("cannot combine sequences: neither alphabet extends the other")]
    IncompatibleAlphabets,
}

/// An ordered, mutable succession of symbols over a fixed [`Alphabet`],
/// stored as a compact integer code array.
///
/// Every symbol is represented internally by its alphabet code, and the whole
/// sequence by a [`CodeArray`] whose storage width is the smallest unsigned
/// integer type that can hold `alphabet.len() - 1` (one byte for up to 256
/// symbols, two bytes for up to 65536, and so on). The alphabet is carried as
/// shared data: it is the sequence's kind tag, and any number of sequences
/// may reference the same alphabet instance.
///
/// Two sequences are equal iff their alphabets are equal and their code
/// arrays are element-wise equal. A sequence is never comparable to a plain
/// string or symbol list.
///
/// Code-level mutation ([`set_code`], [`code_mut`], [`set_range`],
/// [`set_range_codes`], [`from_code`]) deliberately performs no validation
/// against the alphabet: a sequence may transiently hold out-of-range codes,
/// and decoding paths ([`get`], [`symbols`], [`to_symbol_string`],
/// iteration) surface them as errors. Call [`is_valid`] after raw code
/// assignment before relying on any decoding path.
///
/// [`set_code`]: Sequence::set_code
/// [`code_mut`]: Sequence::code_mut
/// [`set_range`]: Sequence::set_range
/// [`set_range_codes`]: Sequence::set_range_codes
/// [`from_code`]: Sequence::from_code
/// [`get`]: Sequence::get
/// [`symbols`]: Sequence::symbols
/// [`to_symbol_string`]: Sequence::to_symbol_string
/// [`is_valid`]: Sequence::is_valid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    alphabet: Arc<Alphabet>,
    code: CodeArray,
}

impl Sequence {
    /// Creates an empty sequence over the given alphabet.
    pub fn new(alphabet: Arc<Alphabet>) -> Self {
        let code = CodeArray::new(alphabet.code_width());
        Self { alphabet, code }
    }

    /// Creates a sequence by encoding the given symbols.
    ///
    /// # Errors
    ///
    /// Returns an encoding error if any symbol is not part of the alphabet.
    pub fn from_symbols(
        alphabet: Arc<Alphabet>,
        symbols: impl IntoIterator<Item = char>,
    ) -> Result<Self, SequenceError> {
        let code = alphabet.encode_all(symbols)?;
        Ok(Self { alphabet, code })
    }

    /// Creates a sequence taking ownership of an existing code array.
    ///
    /// The array is cast to the alphabet's minimal width; its values are NOT
    /// validated against the alphabet.
    pub fn from_code(alphabet: Arc<Alphabet>, code: CodeArray) -> Self {
        let code = code.cast(alphabet.code_width());
        Self { alphabet, code }
    }

    /// The alphabet this sequence encodes its symbols with.
    pub fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }

    /// Read access to the internal code array.
    ///
    /// Consumers may index into this directly; values are guaranteed to be
    /// below the alphabet size only after [`is_valid`](Sequence::is_valid)
    /// has been confirmed.
    pub fn code(&self) -> &CodeArray {
        &self.code
    }

    /// Mutable access to the internal code array.
    ///
    /// Mutations alias the sequence and are not validated. The storage width
    /// never changes through this path.
    pub fn code_mut(&mut self) -> &mut CodeArray {
        &mut self.code
    }

    /// Replaces the code array wholesale, casting it to the minimal width for
    /// the alphabet. Membership of the values is NOT validated.
    pub fn set_code(&mut self, code: CodeArray) {
        self.code = code.cast(self.alphabet.code_width());
    }

    /// Decodes the full code array into symbols.
    ///
    /// # Errors
    ///
    /// Returns a decoding error if any code is out of range for the alphabet.
    pub fn symbols(&self) -> Result<Vec<char>, SequenceError> {
        Ok(self.alphabet.decode_all(&self.code)?)
    }

    /// Re-encodes the sequence from the given symbols, replacing the code
    /// array.
    ///
    /// # Errors
    ///
    /// Returns an encoding error if any symbol is not part of the alphabet;
    /// the sequence is left unchanged in that case.
    pub fn set_symbols(
        &mut self,
        symbols: impl IntoIterator<Item = char>,
    ) -> Result<(), SequenceError> {
        self.code = self.alphabet.encode_all(symbols)?;
        Ok(())
    }

    /// The string form: every decoded symbol in order, without separators.
    ///
    /// # Errors
    ///
    /// Returns a decoding error if any code is out of range.
    pub fn to_symbol_string(&self) -> Result<String, SequenceError> {
        let mut out = String::with_capacity(self.code.len());
        for value in self.code.iter() {
            out.push(self.alphabet.decode(value)?);
        }
        Ok(out)
    }

    /// Number of symbol positions.
    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    /// Decodes the symbol at a single position.
    ///
    /// # Errors
    ///
    /// Returns a decoding error if the code at that position is out of range.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn get(&self, index: usize) -> Result<char, SequenceError> {
        let value = self.code.get(index).unwrap_or_else(|| {
            panic!(
                "position {} out of bounds for sequence of length {}",
                index,
                self.len()
            )
        });
        Ok(self.alphabet.decode(value)?)
    }

    /// Encodes one symbol and overwrites the code at `index`.
    ///
    /// # Errors
    ///
    /// Returns an encoding error if the symbol is not part of the alphabet.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn set(&mut self, index: usize, symbol: char) -> Result<(), SequenceError> {
        let value = self.alphabet.encode(symbol)?;
        self.code.set(index, value);
        Ok(())
    }

    /// Returns the subsequence at a contiguous range, sharing the alphabet
    /// and copying the selected codes.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds.
    pub fn slice(&self, range: Range<usize>) -> Self {
        self.with_code(self.code.slice(range))
    }

    /// Returns the subsequence at the given positions, in the given order.
    ///
    /// # Panics
    ///
    /// Panics if any index is out of bounds.
    pub fn select(&self, indices: &[usize]) -> Self {
        self.with_code(self.code.select(indices))
    }

    /// Returns the subsequence of positions where the mask is true.
    ///
    /// # Panics
    ///
    /// Panics if the mask length differs from the sequence length.
    pub fn masked(&self, mask: &[bool]) -> Self {
        self.with_code(self.code.masked(mask))
    }

    /// Writes another sequence's raw codes into `range`, without re-encoding
    /// and without validation. Alphabet compatibility is the caller's
    /// responsibility; an incompatible source can leave this sequence
    /// invalid, so check [`is_valid`](Sequence::is_valid) afterwards when in
    /// doubt.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds or its length differs from
    /// `source.len()`.
    pub fn set_range(&mut self, range: Range<usize>, source: &Sequence) {
        self.code.write_range(range, source.code());
    }

    /// Writes raw codes into `range` directly, without validation.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds or its length differs from
    /// `source.len()`.
    pub fn set_range_codes(&mut self, range: Range<usize>, source: &CodeArray) {
        self.code.write_range(range, source);
    }

    /// Encodes the given symbols and writes them into `range`. No code is
    /// written if encoding fails.
    ///
    /// # Errors
    ///
    /// Returns an encoding error if any symbol is not part of the alphabet.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds or its length differs from the
    /// number of symbols.
    pub fn set_range_symbols(
        &mut self,
        range: Range<usize>,
        symbols: impl IntoIterator<Item = char>,
    ) -> Result<(), SequenceError> {
        let source = self.alphabet.encode_all(symbols)?;
        self.code.write_range(range, &source);
        Ok(())
    }

    /// Returns a new sequence with the code array in reverse order. The
    /// original is not mutated.
    pub fn reversed(&self) -> Self {
        self.with_code(self.code.reversed())
    }

    /// Whether every code lies below the alphabet size.
    ///
    /// Raw code assignment never validates, so this must be confirmed before
    /// relying on decoding paths after such an assignment.
    pub fn is_valid(&self) -> bool {
        let size = self.alphabet.len() as u64;
        self.code.iter().all(|value| value < size)
    }

    /// Counts the occurrences of every alphabet symbol, including symbols
    /// that do not occur. Pairs are returned in alphabet order.
    ///
    /// Out-of-range codes contribute to no symbol's count.
    pub fn symbol_frequency(&self) -> Vec<(char, usize)> {
        let mut counts = vec![0usize; self.alphabet.len()];
        for value in self.code.iter() {
            if let Some(count) = usize::try_from(value).ok().and_then(|i| counts.get_mut(i)) {
                *count += 1;
            }
        }
        self.alphabet
            .symbols()
            .iter()
            .copied()
            .zip(counts)
            .collect()
    }

    /// Concatenates two sequences.
    ///
    /// Permitted iff one alphabet extends the other; the result carries the
    /// extending (more general) alphabet, and its code array is the
    /// element-wise concatenation of both operands' codes, cast to that
    /// alphabet's width. Extension guarantees the operands' codes keep their
    /// meaning under the result alphabet.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IncompatibleAlphabets`] if neither alphabet
    /// extends the other.
    pub fn concat(&self, other: &Sequence) -> Result<Sequence, SequenceError> {
        let alphabet = if self.alphabet.extends(other.alphabet()) {
            Arc::clone(&self.alphabet)
        } else if other.alphabet().extends(&self.alphabet) {
            Arc::clone(other.alphabet())
        } else {
            return Err(SequenceError::IncompatibleAlphabets);
        };
        let code = self
            .code
            .concat(other.code())
            .cast(alphabet.code_width());
        Ok(Sequence { alphabet, code })
    }

    /// Creates a sequence over the same alphabet, taking ownership of the
    /// given code array without copying. This is the replacement-array copy
    /// hook used by slicing, reversal and concatenation.
    pub fn with_code(&self, code: CodeArray) -> Self {
        Sequence::from_code(Arc::clone(&self.alphabet), code)
    }

    /// Iterates over decoded symbols in position order.
    ///
    /// The iterator is lazy and restartable; each call yields a fresh pass
    /// over the sequence without consuming or mutating it. Out-of-range
    /// codes are yielded as errors.
    pub fn iter(&self) -> Symbols<'_> {
        Symbols {
            sequence: self,
            index: 0,
        }
    }
}

/// Lazy iterator over the decoded symbols of a [`Sequence`].
pub struct Symbols<'a> {
    sequence: &'a Sequence,
    index: usize,
}

impl Iterator for Symbols<'_> {
    type Item = Result<char, SequenceError>;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.sequence.code.get(self.index)?;
        self.index += 1;
        Some(
            self.sequence
                .alphabet
                .decode(value)
                .map_err(SequenceError::from),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.sequence.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Symbols<'_> {}

impl<'a> IntoIterator for &'a Sequence {
    type Item = Result<char, SequenceError>;
    type IntoIter = Symbols<'a>;

    fn into_iter(self) -> Symbols<'a> {
        self.iter()
    }
}
