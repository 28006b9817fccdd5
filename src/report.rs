//! Structured result of one mutation request.

use crate::effect::Effect;
use crate::genetic_code::ProteinSequence;
use crate::mutation::{Mutation, MutationKind};
use crate::sequence::Sequence;

/// Everything known about one applied mutation.
///
/// Built once by [`build`] and handed to a renderer; it carries no
/// formatting of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationReport {
    kind: MutationKind,
    position: usize,
    bases: Option<Sequence>,
    effect: Effect,
    original_sequence: Sequence,
    mutated_sequence: Sequence,
    original_protein: ProteinSequence,
    mutated_protein: ProteinSequence,
}

impl MutationReport {
    pub fn kind(&self) -> MutationKind {
        self.kind
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Base(s) substituted or inserted; `None` for a deletion.
    pub fn bases(&self) -> Option<&Sequence> {
        self.bases.as_ref()
    }

    pub fn effect(&self) -> Effect {
        self.effect
    }

    pub fn original_sequence(&self) -> &Sequence {
        &self.original_sequence
    }

    pub fn mutated_sequence(&self) -> &Sequence {
        &self.mutated_sequence
    }

    pub fn original_protein(&self) -> &ProteinSequence {
        &self.original_protein
    }

    pub fn mutated_protein(&self) -> &ProteinSequence {
        &self.mutated_protein
    }
}

/// Assembles a report. Inputs are taken as already validated.
///
/// Kind, position and bases are read from the mutation itself.
pub fn build(
    mutation: &Mutation,
    effect: Effect,
    original_sequence: Sequence,
    mutated_sequence: Sequence,
    original_protein: ProteinSequence,
    mutated_protein: ProteinSequence,
) -> MutationReport {
    MutationReport {
        kind: mutation.kind(),
        position: mutation.position(),
        bases: mutation.bases(),
        effect,
        original_sequence,
        mutated_sequence,
        original_protein,
        mutated_protein,
    }
}
