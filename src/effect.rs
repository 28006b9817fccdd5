//! Protein-level effect of a mutation.
//!
//! The comparison is anchored at the first amino acid and does not align
//! the two proteins, so a frameshift that leaves the first codon intact is
//! reported as [`Effect::GenericChange`] (or [`Effect::Nonsense`] if it
//! exposes a stop).

use crate::genetic_code::{ProteinSequence, STOP};

/// Effect label, evaluated in declaration order (first match wins).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effect {
    /// Proteins are identical.
    Silent,
    /// A stop marker appears where the original had none.
    Nonsense,
    /// The first amino acid differs.
    MissenseOrFrameshift,
    /// The proteins differ in some other way.
    GenericChange,
}

/// Classifies the effect of a mutation from the original and mutated proteins.
pub fn classify(original: &ProteinSequence, mutated: &ProteinSequence) -> Effect {
    if original == mutated {
        Effect::Silent
    } else if introduces_stop(original, mutated) {
        Effect::Nonsense
    } else if original.symbol_at(0) != mutated.symbol_at(0) {
        Effect::MissenseOrFrameshift
    } else {
        Effect::GenericChange
    }
}

/// True if some position holds a stop in `mutated` but not in `original`.
fn introduces_stop(original: &ProteinSequence, mutated: &ProteinSequence) -> bool {
    mutated
        .symbols()
        .enumerate()
        .any(|(i, aa)| aa == STOP && original.symbol_at(i) != Some(STOP))
}
