//! Allow-list signature issuer.
//!
//! Drives the issuance of auction allow-list credentials: every address of
//! the operator's list is signed under the allow-list domain, pinned on the
//! publishing service and written to `signatures-{index}.json` batch files.

pub mod chain;
pub mod error;
pub mod pipeline;
pub mod verify;
pub mod writer;

pub use error::{ErrorKind, PersistenceError, PipelineError, Result};
pub use pipeline::{chunk_count, Pipeline, PipelineSettings, RunSummary};
pub use verify::{verify_batch_file, VerifyReport};
pub use writer::{read_batch_file, BatchWriter};
