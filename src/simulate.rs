//! One-shot mutation pipeline.
//!
//! Runs apply → translate (original and mutated) → classify → build for a
//! single already-validated request.

use thiserror::Error;
use tracing::debug;

use crate::effect::classify;
use crate::genetic_code::{
    GeneticCodeTableProvider, GeneticCodes, InvalidTableIdError,
};
use crate::mutation::{apply, InvalidPositionError, Mutation};
use crate::report::{build, MutationReport};
use crate::sequence::{InvalidSequenceError, Sequence};

/// Any error the core can raise for one request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    #[error(transparent)]
    InvalidSequence(#[from] InvalidSequenceError),

    #[error(transparent)]
    InvalidPosition(#[from] InvalidPositionError),

    #[error(transparent)]
    InvalidTableId(#[from] InvalidTableIdError),
}

/// Applies `mutation` to `sequence` and reports its effect under the NCBI
/// genetic code `table_id`.
///
/// # Examples
///
/// ```
/// use mutsim::effect::Effect;
/// use mutsim::mutation::Mutation;
/// use mutsim::sequence::validate;
/// use mutsim::simulate::simulate;
///
/// let seq = validate("ATGTTTAAA").unwrap();
/// let report = simulate(&seq, &Mutation::substitution(6, "T").unwrap(), 1).unwrap();
/// assert_eq!(report.mutated_protein().as_str(), "MF*");
/// assert_eq!(report.effect(), Effect::Nonsense);
/// ```
pub fn simulate(
    sequence: &Sequence,
    mutation: &Mutation,
    table_id: u8,
) -> Result<MutationReport, SimulationError> {
    simulate_with(GeneticCodes::ncbi(), sequence, mutation, table_id)
}

/// Same as [`simulate`], with tables from the given provider.
pub fn simulate_with<P: GeneticCodeTableProvider + ?Sized>(
    provider: &P,
    sequence: &Sequence,
    mutation: &Mutation,
    table_id: u8,
) -> Result<MutationReport, SimulationError> {
    // Resolve the table first so an unknown id is reported before any edit
    let code = provider.lookup(table_id)?;
    let mutated = apply(sequence, mutation)?;

    let original_protein = code.translate_sequence(sequence.as_bytes());
    let mutated_protein = code.translate_sequence(mutated.as_bytes());
    let effect = classify(&original_protein, &mutated_protein);

    debug!(
        kind = ?mutation.kind(),
        position = mutation.position(),
        table = table_id,
        ?effect,
        "mutation simulated"
    );

    Ok(build(
        mutation,
        effect,
        sequence.clone(),
        mutated,
        original_protein,
        mutated_protein,
    ))
}
