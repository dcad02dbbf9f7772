//! Pipeline error types.
//!
//! Every failure is fatal to the run. The error carries the chunk index and,
//! where one is involved, the address being processed so the operator can
//! tell which batch files are complete.

use allowlist_core::{Address, InputError};
use allowlist_crypto::SigningError;
use allowlist_publish::PublishError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Failures while persisting batch files.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("cannot create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("batch serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Coarse classification reported to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    Signing,
    Publish,
    Persistence,
    Cancelled,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InvalidInput => "InvalidInputError",
            ErrorKind::Signing => "SigningError",
            ErrorKind::Publish => "PublishError",
            ErrorKind::Persistence => "PersistenceError",
            ErrorKind::Cancelled => "Cancelled",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),

    #[error("signer setup failed: {0}")]
    SignerSetup(#[source] SigningError),

    #[error("publisher setup failed: {0}")]
    PublisherSetup(#[source] PublishError),

    #[error("chunk {chunk}: signing failed for {address}: {source}")]
    Signing {
        chunk: usize,
        address: Address,
        source: SigningError,
    },

    #[error("chunk {chunk}: publishing failed for {address}: {source}")]
    Publish {
        chunk: usize,
        address: Address,
        source: PublishError,
    },

    #[error("{}persisting batch failed: {source}", chunk_prefix(.chunk))]
    Persistence {
        chunk: Option<usize>,
        source: PersistenceError,
    },

    #[error("cancelled after {completed_chunks} completed chunk(s)")]
    Cancelled { completed_chunks: usize },
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::InvalidInput(_) => ErrorKind::InvalidInput,
            PipelineError::SignerSetup(_) | PipelineError::Signing { .. } => ErrorKind::Signing,
            PipelineError::PublisherSetup(_) | PipelineError::Publish { .. } => ErrorKind::Publish,
            PipelineError::Persistence { .. } => ErrorKind::Persistence,
            PipelineError::Cancelled { .. } => ErrorKind::Cancelled,
        }
    }

    /// Index of the chunk that was being processed, if any.
    pub fn chunk(&self) -> Option<usize> {
        match self {
            PipelineError::Signing { chunk, .. } | PipelineError::Publish { chunk, .. } => {
                Some(*chunk)
            }
            PipelineError::Persistence { chunk, .. } => *chunk,
            PipelineError::Cancelled { completed_chunks } => Some(*completed_chunks),
            _ => None,
        }
    }

    /// Address that failed, if the failure is tied to one.
    pub fn address(&self) -> Option<Address> {
        match self {
            PipelineError::Signing { address, .. } | PipelineError::Publish { address, .. } => {
                Some(*address)
            }
            _ => None,
        }
    }
}

fn chunk_prefix(chunk: &Option<usize>) -> String {
    chunk.map(|c| format!("chunk {}: ", c)).unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, PipelineError>;
