//! Point mutations and the operator that applies them.
//!
//! Each [`Mutation`] variant carries only the payload its kind needs:
//! a deletion has no base, an insertion always has at least one. The payload
//! types can only be built from validated input, so a `Mutation` never
//! carries a symbol outside the nucleotide alphabet.

use thiserror::Error;

use crate::sequence::{self, InvalidSequenceError, NonEmptySequence, Nucleotide, Sequence};

/// The kind of a mutation, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    Substitution,
    Insertion,
    Deletion,
}

/// A single point mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Replace the symbol at `position` with `base`.
    Substitution { position: usize, base: Nucleotide },
    /// Insert `bases` before `position` (`position == len` appends).
    Insertion { position: usize, bases: NonEmptySequence },
    /// Remove the symbol at `position`.
    Deletion { position: usize },
}

/// Raised when a position is out of range for the mutation kind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid position {position} for {kind:?} on a sequence of length {length}")]
pub struct InvalidPositionError {
    pub kind: MutationKind,
    pub position: usize,
    pub length: usize,
}

impl Mutation {
    /// Builds a substitution from raw user input for the new base.
    pub fn substitution(position: usize, base: &str) -> Result<Self, InvalidSequenceError> {
        let base = sequence::validate_symbol(base)?;
        Ok(Mutation::Substitution { position, base })
    }

    /// Builds an insertion from raw user input for the inserted bases.
    pub fn insertion(position: usize, bases: &str) -> Result<Self, InvalidSequenceError> {
        let bases = sequence::validate_non_empty(bases)?;
        Ok(Mutation::Insertion { position, bases })
    }

    pub fn deletion(position: usize) -> Self {
        Mutation::Deletion { position }
    }

    pub fn kind(&self) -> MutationKind {
        match self {
            Mutation::Substitution { .. } => MutationKind::Substitution,
            Mutation::Insertion { .. } => MutationKind::Insertion,
            Mutation::Deletion { .. } => MutationKind::Deletion,
        }
    }

    pub fn position(&self) -> usize {
        match *self {
            Mutation::Substitution { position, .. }
            | Mutation::Insertion { position, .. }
            | Mutation::Deletion { position } => position,
        }
    }

    /// Returns the base(s) involved, or `None` for a deletion.
    pub fn bases(&self) -> Option<Sequence> {
        match self {
            Mutation::Substitution { base, .. } => Some(Sequence::from(*base)),
            Mutation::Insertion { bases, .. } => Some(bases.as_sequence().clone()),
            Mutation::Deletion { .. } => None,
        }
    }

    /// Returns true if `position` is a valid target for this mutation kind
    /// on a sequence of length `length`.
    fn accepts_position(&self, length: usize) -> bool {
        match self {
            Mutation::Insertion { position, .. } => *position <= length,
            Mutation::Substitution { position, .. } | Mutation::Deletion { position } => {
                *position < length
            }
        }
    }
}

/// Applies a mutation to a sequence, returning the mutated copy.
///
/// # Examples
///
/// ```
/// use mutsim::mutation::{apply, Mutation};
/// use mutsim::sequence::validate;
///
/// let seq = validate("ACGT").unwrap();
/// let mutated = apply(&seq, &Mutation::insertion(2, "GG").unwrap()).unwrap();
/// assert_eq!(mutated.as_str(), "ACGGGT");
/// ```
pub fn apply(seq: &Sequence, mutation: &Mutation) -> Result<Sequence, InvalidPositionError> {
    let length = seq.len();
    if !mutation.accepts_position(length) {
        return Err(InvalidPositionError {
            kind: mutation.kind(),
            position: mutation.position(),
            length,
        });
    }

    let data = seq.as_str();
    let mutated = match mutation {
        Mutation::Substitution { position, base } => {
            let mut out = String::with_capacity(length);
            out.push_str(&data[..*position]);
            out.push(base.as_char());
            out.push_str(&data[position + 1..]);
            out
        }
        Mutation::Insertion { position, bases } => {
            let mut out = String::with_capacity(length + bases.as_str().len());
            out.push_str(&data[..*position]);
            out.push_str(bases.as_str());
            out.push_str(&data[*position..]);
            out
        }
        Mutation::Deletion { position } => {
            let mut out = String::with_capacity(length - 1);
            out.push_str(&data[..*position]);
            out.push_str(&data[position + 1..]);
            out
        }
    };

    Ok(Sequence::from_valid(mutated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{classify, Effect};
    use crate::genetic_code::GeneticCodes;
    use crate::sequence::{validate, NUCLEOTIDE_ALPHABET};
    use proptest::prelude::*;

    fn seq(s: &str) -> Sequence {
        validate(s).unwrap()
    }

    #[test]
    fn test_substitution() {
        let mutation = Mutation::substitution(0, "T").unwrap();
        assert_eq!(apply(&seq("ACGT"), &mutation).unwrap().as_str(), "TCGT");
    }

    #[test]
    fn test_insertion() {
        let mutation = Mutation::insertion(2, "GG").unwrap();
        assert_eq!(apply(&seq("ACGT"), &mutation).unwrap().as_str(), "ACGGGT");
    }

    #[test]
    fn test_deletion() {
        let mutation = Mutation::deletion(1);
        assert_eq!(apply(&seq("ACGT"), &mutation).unwrap().as_str(), "AGT");
    }

    #[test]
    fn test_insertion_at_end_appends() {
        let mutation = Mutation::insertion(4, "AA").unwrap();
        assert_eq!(apply(&seq("ACGT"), &mutation).unwrap().as_str(), "ACGTAA");

        // Insertion into an empty sequence
        let mutation = Mutation::insertion(0, "c").unwrap();
        assert_eq!(apply(&seq(""), &mutation).unwrap().as_str(), "C");
    }

    #[test]
    fn test_out_of_range_positions() {
        let s = seq("ACGT");
        assert_eq!(
            apply(&s, &Mutation::deletion(4)),
            Err(InvalidPositionError { kind: MutationKind::Deletion, position: 4, length: 4 })
        );
        assert_eq!(
            apply(&s, &Mutation::substitution(4, "A").unwrap()),
            Err(InvalidPositionError { kind: MutationKind::Substitution, position: 4, length: 4 })
        );
        assert!(apply(&s, &Mutation::insertion(5, "A").unwrap()).is_err());
        assert!(apply(&seq(""), &Mutation::deletion(0)).is_err());
    }

    #[test]
    fn test_input_is_not_modified() {
        let s = seq("ACGT");
        let _ = apply(&s, &Mutation::deletion(0)).unwrap();
        assert_eq!(s.as_str(), "ACGT");
    }

    #[test]
    fn test_payload_validation() {
        assert!(Mutation::substitution(0, "TT").is_err());
        assert!(Mutation::substitution(0, "U").is_err());
        assert_eq!(Mutation::insertion(0, ""), Err(InvalidSequenceError::Empty));
    }

    #[test]
    fn test_payloads_cannot_hold_foreign_symbols() {
        let s = seq("ACGT");

        // Neither an unknown nor a multi-byte base can become a substitution
        assert!(Mutation::substitution(0, "Z").is_err());
        assert!(Mutation::substitution(0, "é").is_err());
        assert!(Nucleotide::try_from('Z').is_err());
        assert!(Nucleotide::try_from('é').is_err());

        // An empty insertion cannot be built, directly or from an empty sequence
        assert!(Mutation::insertion(1, "").is_err());
        assert!(NonEmptySequence::try_from(Sequence::default()).is_err());

        // Variants built from validated payloads keep the alphabet invariant
        let base = Nucleotide::try_from('r').unwrap();
        let mutated = apply(&s, &Mutation::Substitution { position: 0, base }).unwrap();
        assert_eq!(mutated.as_str(), "RCGT");
        assert!(mutated.as_str().chars().all(crate::sequence::is_nucleotide));

        let bases = NonEmptySequence::try_from(seq("nn")).unwrap();
        let mutated = apply(&s, &Mutation::Insertion { position: 1, bases }).unwrap();
        assert_eq!(mutated.as_str(), "ANNCGT");
    }

    #[test]
    fn test_accessors() {
        let m = Mutation::substitution(3, "g").unwrap();
        assert_eq!(m.kind(), MutationKind::Substitution);
        assert_eq!(m.position(), 3);
        assert_eq!(m.bases().unwrap().as_str(), "G");

        let m = Mutation::deletion(7);
        assert_eq!(m.kind(), MutationKind::Deletion);
        assert_eq!(m.position(), 7);
        assert!(m.bases().is_none());
    }

    fn nucleotide() -> impl Strategy<Value = Nucleotide> {
        let bases: Vec<Nucleotide> = NUCLEOTIDE_ALPHABET
            .chars()
            .map(|c| Nucleotide::try_from(c).unwrap())
            .collect();
        proptest::sample::select(bases)
    }

    fn table_id() -> impl Strategy<Value = u8> {
        proptest::sample::select(GeneticCodes::ncbi().all().iter().map(|c| c.id).collect::<Vec<_>>())
    }

    fn sequence_and_position() -> impl Strategy<Value = (Sequence, usize)> {
        proptest::collection::vec(nucleotide(), 1..200).prop_flat_map(|symbols| {
            let len = symbols.len();
            let s: String = symbols.into_iter().map(Nucleotide::as_char).collect();
            (Just(seq(&s)), 0..len)
        })
    }

    proptest! {
        #[test]
        fn prop_substitution_changes_only_target((s, pos) in sequence_and_position(), base in nucleotide()) {
            let mutated = apply(&s, &Mutation::Substitution { position: pos, base }).unwrap();
            prop_assert_eq!(mutated.len(), s.len());
            for i in 0..s.len() {
                if i == pos {
                    prop_assert_eq!(mutated.symbol_at(i), Some(base.as_char()));
                } else {
                    prop_assert_eq!(mutated.symbol_at(i), s.symbol_at(i));
                }
            }
        }

        #[test]
        fn prop_identity_substitution_is_silent((s, pos) in sequence_and_position(), id in table_id()) {
            let base = s.symbol_at(pos).unwrap().to_string();
            let mutated = apply(&s, &Mutation::substitution(pos, &base).unwrap()).unwrap();
            prop_assert_eq!(&mutated, &s);

            let code = GeneticCodes::ncbi().get(id).unwrap();
            let original_protein = code.translate_sequence(s.as_bytes());
            let mutated_protein = code.translate_sequence(mutated.as_bytes());
            prop_assert_eq!(classify(&original_protein, &mutated_protein), Effect::Silent);
        }

        #[test]
        fn prop_deletion_shortens_by_one((s, pos) in sequence_and_position()) {
            let mutated = apply(&s, &Mutation::deletion(pos)).unwrap();
            prop_assert_eq!(mutated.len(), s.len() - 1);
        }
    }
}
