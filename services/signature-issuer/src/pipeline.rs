//! Credential issuance pipeline.
//!
//! ```text
//! Idle -> Loading -> [Signing -> Publishing -> Writing]* -> Done | Failed
//! ```
//!
//! The address list is split into fixed size chunks that are processed in
//! index order. Within a chunk every address is signed and then published;
//! up to `concurrency` addresses are in flight at once and results are
//! gathered in input order. The batch file of a chunk is written only after
//! all of its credentials were published, and the first failure stops the
//! run. The files on disk therefore always correspond to a prefix of
//! completed chunks.

use crate::error::{PipelineError, Result};
use crate::writer::BatchWriter;
use allowlist_core::{read_address_file, Address, Batch, Credential, InputError};
use allowlist_crypto::{AllowListDomain, CredentialSigner, MessageSigner};
use allowlist_publish::BatchPublisher;
use futures::{StreamExt, TryStreamExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::watch;

/// Tunables of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSettings {
    pub chunk_size: usize,
    pub concurrency: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            chunk_size: allowlist_core::config::DEFAULT_CHUNK_SIZE,
            concurrency: 1,
        }
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub auction_id: u64,
    pub chain_id: u64,
    pub credentials: usize,
    pub files: Vec<PathBuf>,
}

/// Number of batches produced for `count` addresses.
pub fn chunk_count(count: usize, chunk_size: usize) -> usize {
    count.div_ceil(chunk_size)
}

pub struct Pipeline {
    signer: CredentialSigner,
    publisher: Arc<dyn BatchPublisher>,
    writer: BatchWriter,
    settings: PipelineSettings,
    cancel: Option<watch::Receiver<bool>>,
}

impl Pipeline {
    pub fn new(
        domain: AllowListDomain,
        signer: Arc<dyn MessageSigner>,
        publisher: Arc<dyn BatchPublisher>,
        writer: BatchWriter,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            signer: CredentialSigner::new(domain, signer),
            publisher,
            writer,
            settings: PipelineSettings {
                chunk_size: settings.chunk_size.max(1),
                concurrency: settings.concurrency.max(1),
            },
            cancel: None,
        }
    }

    /// Aborts the run once the receiver observes `true`.
    ///
    /// A chunk interrupted by cancellation is discarded without writing its
    /// batch file.
    pub fn with_cancellation(mut self, cancel: watch::Receiver<bool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn domain(&self) -> &AllowListDomain {
        self.signer.domain()
    }

    pub fn settings(&self) -> PipelineSettings {
        self.settings
    }

    /// Loads the address list file and runs the pipeline on it.
    pub async fn run_from_file(&self, auction_id: u64, path: &Path) -> Result<RunSummary> {
        tracing::info!(path = %path.display(), "Loading address list");
        let addresses = read_address_file(path)?;
        self.run(auction_id, &addresses).await
    }

    /// Parses a raw comma separated list and runs the pipeline on it.
    pub async fn run_from_text(&self, auction_id: u64, raw: &str) -> Result<RunSummary> {
        let addresses = allowlist_core::parse_addresses(raw)?;
        self.run(auction_id, &addresses).await
    }

    #[tracing::instrument(
        name = "issue",
        skip_all,
        fields(auction_id = auction_id, chain_id = self.domain().chain_id)
    )]
    pub async fn run(&self, auction_id: u64, addresses: &[Address]) -> Result<RunSummary> {
        if addresses.is_empty() {
            return Err(InputError::EmptyAddressList.into());
        }

        self.writer
            .ensure_output_dir()
            .map_err(|source| PipelineError::Persistence {
                chunk: None,
                source,
            })?;

        let chunks = chunk_count(addresses.len(), self.settings.chunk_size);
        tracing::info!(
            signer = %self.signer.signer_address(),
            addresses = addresses.len(),
            chunks,
            chunk_size = self.settings.chunk_size,
            concurrency = self.settings.concurrency,
            "Starting credential issuance"
        );

        let mut files = Vec::with_capacity(chunks);
        for (index, chunk) in addresses.chunks(self.settings.chunk_size).enumerate() {
            if self.is_cancelled() {
                return Err(PipelineError::Cancelled {
                    completed_chunks: index,
                });
            }

            tracing::info!(chunk = index, size = chunk.len(), "Creating signatures for chunk");
            let credentials = tokio::select! {
                result = self.process_chunk(index, auction_id, chunk) => result?,
                _ = wait_for_cancel(self.cancel.clone()) => {
                    tracing::warn!(chunk = index, "Cancelled while processing chunk");
                    return Err(PipelineError::Cancelled { completed_chunks: index });
                }
            };

            let batch = Batch {
                index,
                auction_id,
                chain_id: self.domain().chain_id,
                allow_list_contract: self.domain().verifying_contract,
                credentials,
            };
            let path = self
                .writer
                .write(&batch)
                .map_err(|source| PipelineError::Persistence {
                    chunk: Some(index),
                    source,
                })?;
            files.push(path);
        }

        tracing::info!(files = files.len(), "Uploaded and persisted all credentials");
        Ok(RunSummary {
            auction_id,
            chain_id: self.domain().chain_id,
            credentials: addresses.len(),
            files,
        })
    }

    /// Signs and publishes every address of a chunk, preserving order.
    async fn process_chunk(
        &self,
        index: usize,
        auction_id: u64,
        chunk: &[Address],
    ) -> Result<Vec<Credential>> {
        let chain_id = self.domain().chain_id;

        futures::stream::iter(chunk.iter().copied())
            .map(|address| async move {
                let credential = self
                    .signer
                    .sign(auction_id, address)
                    .await
                    .map_err(|source| PipelineError::Signing {
                        chunk: index,
                        address,
                        source,
                    })?;

                self.publisher
                    .publish(chain_id, &credential)
                    .await
                    .map_err(|source| PipelineError::Publish {
                        chunk: index,
                        address,
                        source,
                    })?;

                Ok::<_, PipelineError>(credential)
            })
            .buffered(self.settings.concurrency)
            .try_collect()
            .await
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|rx| *rx.borrow())
    }
}

/// Resolves once cancellation is requested; never resolves otherwise.
async fn wait_for_cancel(cancel: Option<watch::Receiver<bool>>) {
    if let Some(mut rx) = cancel {
        if rx.wait_for(|cancelled| *cancelled).await.is_ok() {
            return;
        }
    }
    std::future::pending::<()>().await
}
