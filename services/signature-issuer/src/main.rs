//! Signature issuer CLI
//!
//! Generates allow-list signatures for an auction and verifies written
//! batch files.

use allowlist_core::{logging, Chain, IssuerConfig};
use allowlist_crypto::{AllowListDomain, LocalKeySigner, MessageSigner};
use allowlist_publish::PinataPublisher;
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use signature_issuer::{
    chain, verify_batch_file, BatchWriter, ErrorKind, Pipeline, PipelineError, PipelineSettings,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Debug, Parser)]
#[command(name = "signature-issuer", version, about = "Allow-list signature issuer")]
struct Cli {
    /// TOML configuration file; environment variables override its values.
    #[arg(long, global = true, env = "ISSUER_CONFIG")]
    config: Option<PathBuf>,

    /// Emit JSON logs.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sign, publish and persist credentials for every listed address.
    Generate(GenerateArgs),
    /// Check every credential in a batch file against a signer address.
    Verify(VerifyArgs),
}

#[derive(Debug, Args)]
struct GenerateArgs {
    #[arg(long)]
    auction_id: u64,

    /// File with comma separated addresses that should be allow-listed.
    #[arg(long, visible_alias = "file-with-address")]
    addresses: PathBuf,

    #[arg(long)]
    output_dir: Option<PathBuf>,

    #[arg(long)]
    chunk_size: Option<usize>,

    /// Sign+publish operations in flight per chunk.
    #[arg(long)]
    concurrency: Option<usize>,
}

#[derive(Debug, Args)]
struct VerifyArgs {
    #[arg(long)]
    batch: PathBuf,

    /// Expected issuer address.
    #[arg(long)]
    signer: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.json_logs {
        logging::init_json();
    } else {
        logging::init();
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<PipelineError>() {
                Some(pipeline_error) => {
                    eprintln!("Error [{}]: {:#}", pipeline_error.kind(), e);
                    if pipeline_error.kind() == ErrorKind::Cancelled {
                        return ExitCode::from(130);
                    }
                }
                None => eprintln!("Error: {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = IssuerConfig::load(cli.config.as_deref()).map_err(PipelineError::from)?;

    match cli.command {
        Command::Generate(args) => generate(config, args).await,
        Command::Verify(args) => verify(args),
    }
}

async fn generate(mut config: IssuerConfig, args: GenerateArgs) -> anyhow::Result<()> {
    if let Some(dir) = args.output_dir {
        config.pipeline.output_dir = dir;
    }
    if let Some(chunk_size) = args.chunk_size {
        config.pipeline.chunk_size = chunk_size;
    }
    if let Some(concurrency) = args.concurrency {
        config.pipeline.concurrency = concurrency;
    }
    config.validate().map_err(PipelineError::from)?;

    let jwt = config.publish_jwt().map_err(PipelineError::from)?.clone();
    let signer = LocalKeySigner::from_key_source(config.signer.key_source())
        .map_err(PipelineError::SignerSetup)?;
    tracing::info!(account = %signer.address(), "Using the account to generate signatures");

    let contract = config.allow_list_contract().map_err(PipelineError::from)?;
    let chain_id = chain::resolve_chain_id(&config.chain)
        .await
        .map_err(PipelineError::from)?;
    match Chain::from_id(chain_id) {
        Some(network) => tracing::info!(%network, %contract, "Resolved allow-list domain"),
        None => tracing::info!(chain_id, %contract, "Resolved allow-list domain on unlisted chain"),
    }

    let publisher =
        PinataPublisher::new(&config.publish, jwt).map_err(PipelineError::PublisherSetup)?;

    let (cancel_tx, cancel_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, discarding the in-flight chunk");
            let _ = cancel_tx.send(true);
        }
    });

    let pipeline = Pipeline::new(
        AllowListDomain::build(chain_id, contract),
        Arc::new(signer),
        Arc::new(publisher),
        BatchWriter::new(&config.pipeline.output_dir),
        PipelineSettings {
            chunk_size: config.pipeline.chunk_size,
            concurrency: config.pipeline.concurrency,
        },
    )
    .with_cancellation(cancel_rx);

    let summary = pipeline.run_from_file(args.auction_id, &args.addresses).await?;

    println!(
        "Uploaded {} signatures for auction {} on chain {} into {} file(s):",
        summary.credentials,
        summary.auction_id,
        summary.chain_id,
        summary.files.len()
    );
    for file in &summary.files {
        println!("  {}", file.display());
    }
    Ok(())
}

fn verify(args: VerifyArgs) -> anyhow::Result<()> {
    let signer = allowlist_core::parse_address(0, &args.signer)
        .context("invalid --signer address")?;
    let report = verify_batch_file(&args.batch, signer)?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    if !report.is_valid() {
        anyhow::bail!(
            "{} of {} signatures in {} were not issued by {}",
            report.invalid_users.len(),
            report.total,
            args.batch.display(),
            signer
        );
    }
    Ok(())
}
