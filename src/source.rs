//! Where input sequences come from.
//!
//! [`SequenceFetcher`] is the seam for record retrieval by accession.
//! Remote implementations (e.g. a GenBank client configured with a contact
//! e-mail) live outside this crate and report transport failures through
//! [`FetchError`]; [`FastaSource`] is the local, file-backed implementation.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::fasta::{parse_fasta_file, FastaError, FastaRecord};
use crate::sequence::{validate, Sequence};

/// A validated sequence with the metadata of the record it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    pub id: String,
    pub description: String,
    pub sequence: Sequence,
}

/// Errors raised while retrieving a sequence record.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error {status}: {reason}")]
    Http { status: u16, reason: String },

    #[error("Request timed out")]
    Timeout,

    #[error("Malformed record: {0}")]
    Malformed(String),

    #[error("No record found for accession '{0}'")]
    NotFound(String),

    #[error("Failed to read source: {0}")]
    Io(#[from] std::io::Error),
}

impl From<FastaError> for FetchError {
    fn from(err: FastaError) -> Self {
        match err {
            FastaError::IoError(e) => FetchError::Io(e),
            other => FetchError::Malformed(other.to_string()),
        }
    }
}

/// Retrieves sequence records by accession.
pub trait SequenceFetcher {
    fn fetch(&self, accession: &str) -> Result<SequenceRecord, FetchError>;
}

/// Sequence records read from a local FASTA file; accessions are record ids.
#[derive(Debug, Clone)]
pub struct FastaSource {
    path: PathBuf,
}

impl FastaSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the first record of the file.
    pub fn first(&self) -> Result<SequenceRecord, FetchError> {
        let record = parse_fasta_file(&self.path)?
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::Malformed("no records".to_string()))?;
        self.validate_record(record)
    }

    fn validate_record(&self, record: FastaRecord) -> Result<SequenceRecord, FetchError> {
        let sequence = validate(&record.data)
            .map_err(|e| FetchError::Malformed(format!("record '{}': {}", record.id, e)))?;

        info!(
            path = %self.path.display(),
            id = %record.id,
            description = %record.description,
            length = sequence.len(),
            "loaded sequence record"
        );

        Ok(SequenceRecord {
            id: record.id,
            description: record.description,
            sequence,
        })
    }
}

impl SequenceFetcher for FastaSource {
    fn fetch(&self, accession: &str) -> Result<SequenceRecord, FetchError> {
        let record = parse_fasta_file(&self.path)?
            .into_iter()
            .find(|r| r.id == accession)
            .ok_or_else(|| FetchError::NotFound(accession.to_string()))?;
        self.validate_record(record)
    }
}
