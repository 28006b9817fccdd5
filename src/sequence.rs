//! Nucleotide sequences and their validation.
//!
//! A [`Sequence`] can only be obtained through [`validate`] (or the
//! [`std::str::FromStr`] impl that delegates to it), so every value of the
//! type holds uppercase IUPAC nucleotide symbols only.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use thiserror::Error;

/// Nucleotide alphabet: the four bases plus the IUPAC ambiguity codes.
pub const NUCLEOTIDE_ALPHABET: &str = "ACGTWSMKRYBDHVN";

/// Errors raised when raw input is not a valid nucleotide sequence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidSequenceError {
    #[error("Invalid nucleotide '{symbol}' at position {position}")]
    InvalidSymbol { symbol: char, position: usize },

    #[error("Empty sequence")]
    Empty,

    #[error("Expected a single nucleotide, got {0} symbols")]
    NotSingleSymbol(usize),
}

/// Returns true if `symbol` (uppercase) belongs to the nucleotide alphabet.
pub fn is_nucleotide(symbol: char) -> bool {
    NUCLEOTIDE_ALPHABET.contains(symbol)
}

/// A validated, uppercase nucleotide sequence.
///
/// The sequence may be empty; callers that need a non-empty sequence
/// check [`Sequence::is_empty`] themselves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Sequence {
    data: String,
}

impl Sequence {
    /// Builds a sequence from symbols that are already known to be valid.
    pub(crate) fn from_valid(data: String) -> Self {
        debug_assert!(data.chars().all(is_nucleotide));
        Self { data }
    }

    /// Returns the length of the sequence.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Gets the symbol at a specific position.
    pub fn symbol_at(&self, pos: usize) -> Option<char> {
        self.data.as_bytes().get(pos).map(|&b| b as char)
    }

    /// Gets a slice of the sequence, clamped to its bounds.
    pub fn slice(&self, range: Range<usize>) -> &str {
        let start = range.start.min(self.data.len());
        let end = range.end.min(self.data.len()).max(start);
        &self.data[start..end]
    }

    pub fn as_str(&self) -> &str {
        &self.data
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.data.as_bytes()
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.data)
    }
}

impl FromStr for Sequence {
    type Err = InvalidSequenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate(s)
    }
}

impl AsRef<str> for Sequence {
    fn as_ref(&self) -> &str {
        &self.data
    }
}

/// Validates raw input against the nucleotide alphabet.
///
/// Input is uppercased first, so `"acgt"` and `"ACGT"` give the same
/// sequence. An empty string is a valid sequence of length 0.
///
/// # Examples
///
/// ```
/// use mutsim::sequence::validate;
///
/// let seq = validate("atgNNr").unwrap();
/// assert_eq!(seq.as_str(), "ATGNNR");
/// assert!(validate("ATGU").is_err());
/// ```
pub fn validate(raw: &str) -> Result<Sequence, InvalidSequenceError> {
    let upper = raw.to_ascii_uppercase();
    if let Some((position, symbol)) = upper.chars().enumerate().find(|&(_, c)| !is_nucleotide(c)) {
        return Err(InvalidSequenceError::InvalidSymbol { symbol, position });
    }
    Ok(Sequence::from_valid(upper))
}

/// A single validated nucleotide symbol (e.g. a substitution base).
///
/// Only obtainable through [`validate_symbol`] or `TryFrom<char>`, so the
/// wrapped byte is always an uppercase ASCII member of the alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Nucleotide(u8);

impl Nucleotide {
    pub fn as_char(self) -> char {
        self.0 as char
    }

    pub fn as_byte(self) -> u8 {
        self.0
    }
}

impl TryFrom<char> for Nucleotide {
    type Error = InvalidSequenceError;

    fn try_from(symbol: char) -> Result<Self, Self::Error> {
        let upper = symbol.to_ascii_uppercase();
        if upper.is_ascii() && is_nucleotide(upper) {
            Ok(Nucleotide(upper as u8))
        } else {
            Err(InvalidSequenceError::InvalidSymbol { symbol, position: 0 })
        }
    }
}

impl fmt::Display for Nucleotide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl From<Nucleotide> for Sequence {
    fn from(base: Nucleotide) -> Self {
        Sequence::from_valid(base.as_char().to_string())
    }
}

/// A validated sequence holding at least one symbol (e.g. an insertion payload).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptySequence(Sequence);

impl NonEmptySequence {
    pub fn as_sequence(&self) -> &Sequence {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<Sequence> for NonEmptySequence {
    type Error = InvalidSequenceError;

    fn try_from(sequence: Sequence) -> Result<Self, Self::Error> {
        if sequence.is_empty() {
            return Err(InvalidSequenceError::Empty);
        }
        Ok(NonEmptySequence(sequence))
    }
}

impl From<NonEmptySequence> for Sequence {
    fn from(bases: NonEmptySequence) -> Self {
        bases.0
    }
}

impl fmt::Display for NonEmptySequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Validates a non-empty run of nucleotides.
pub fn validate_non_empty(raw: &str) -> Result<NonEmptySequence, InvalidSequenceError> {
    NonEmptySequence::try_from(validate(raw)?)
}

/// Validates a single nucleotide symbol.
pub fn validate_symbol(raw: &str) -> Result<Nucleotide, InvalidSequenceError> {
    let seq = validate(raw)?;
    match seq.len() {
        0 => Err(InvalidSequenceError::Empty),
        1 => Ok(Nucleotide(seq.as_bytes()[0])),
        n => Err(InvalidSequenceError::NotSingleSymbol(n)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_uppercases() {
        let seq = validate("acgtn").unwrap();
        assert_eq!(seq.as_str(), "ACGTN");
        assert_eq!(seq.len(), 5);
    }

    #[test]
    fn test_validate_full_alphabet() {
        let seq = validate(NUCLEOTIDE_ALPHABET).unwrap();
        assert_eq!(seq.len(), 15);
    }

    #[test]
    fn test_validate_empty_is_valid() {
        let seq = validate("").unwrap();
        assert!(seq.is_empty());
    }

    #[test]
    fn test_validate_rejects_invalid_symbol() {
        assert_eq!(
            validate("ACXGT"),
            Err(InvalidSequenceError::InvalidSymbol { symbol: 'X', position: 2 })
        );
        // RNA uracil and gaps are not part of the alphabet
        assert!(validate("ACGU").is_err());
        assert!(validate("AC-GT").is_err());
        assert!(validate("AC GT").is_err());
    }

    #[test]
    fn test_validate_non_empty() {
        assert_eq!(validate_non_empty("gg").unwrap().as_str(), "GG");
        assert_eq!(validate_non_empty(""), Err(InvalidSequenceError::Empty));
        assert_eq!(
            NonEmptySequence::try_from(Sequence::default()),
            Err(InvalidSequenceError::Empty)
        );
    }

    #[test]
    fn test_validate_symbol() {
        assert_eq!(validate_symbol("t").map(Nucleotide::as_char), Ok('T'));
        assert_eq!(validate_symbol(""), Err(InvalidSequenceError::Empty));
        assert_eq!(validate_symbol("AC"), Err(InvalidSequenceError::NotSingleSymbol(2)));
        assert!(matches!(
            validate_symbol("Z"),
            Err(InvalidSequenceError::InvalidSymbol { symbol: 'Z', .. })
        ));
    }

    #[test]
    fn test_nucleotide_rejects_foreign_symbols() {
        assert_eq!(Nucleotide::try_from('g').map(Nucleotide::as_char), Ok('G'));
        assert!(Nucleotide::try_from('Z').is_err());
        assert!(Nucleotide::try_from('U').is_err());
        // Multi-byte symbols never reach a byte-indexed sequence
        assert_eq!(
            Nucleotide::try_from('é'),
            Err(InvalidSequenceError::InvalidSymbol { symbol: 'é', position: 0 })
        );
        assert!(validate_symbol("é").is_err());
    }

    #[test]
    fn test_symbol_at_and_slice() {
        let seq: Sequence = "ACGT".parse().unwrap();
        assert_eq!(seq.symbol_at(0), Some('A'));
        assert_eq!(seq.symbol_at(3), Some('T'));
        assert_eq!(seq.symbol_at(4), None);
        assert_eq!(seq.slice(1..3), "CG");
        assert_eq!(seq.slice(2..10), "GT");
        assert_eq!(seq.slice(8..10), "");
    }
}
