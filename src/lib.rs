//! # mutsim - Point Mutation Simulator
//!
//! Applies a single point mutation to a nucleotide sequence and reports its
//! effect on the encoded protein.
//!
//! ## Architecture
//!
//! The core is a chain of pure functions over immutable values:
//! - `sequence`: nucleotide alphabet and input validation
//! - `mutation`: substitution / insertion / deletion and the operator applying them
//! - `genetic_code`: NCBI code tables and codon translation
//! - `effect`: protein-level effect classification
//! - `report`: the structured result handed to a renderer
//! - `simulate`: the whole pipeline for one request
//!
//! Around it:
//! - `fasta` / `source`: reading sequence records
//! - `render`: plain-text report output
//! - `logging`: tracing subscriber setup for the binary

pub mod effect;
pub mod fasta;
pub mod genetic_code;
pub mod logging;
pub mod mutation;
pub mod render;
pub mod report;
pub mod sequence;
pub mod simulate;
pub mod source;

pub use effect::{classify, Effect};
pub use genetic_code::{translate, GeneticCodes, InvalidTableIdError, ProteinSequence};
pub use mutation::{apply, InvalidPositionError, Mutation, MutationKind};
pub use report::{build, MutationReport};
pub use sequence::{validate, InvalidSequenceError, NonEmptySequence, Nucleotide, Sequence};
pub use simulate::{simulate, SimulationError};
