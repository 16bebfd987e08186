//! `load` and `ingest` command handlers.

use std::path::Path;

use anyhow::Context;
use tweetdb_core::{AppConfig, TweetRecord};
use tweetdb_db::BatchProgress;

use crate::GenerateArgs;

async fn ingest_records(
    pool: &sqlx::PgPool,
    records: &[TweetRecord],
    batch_size: usize,
) -> anyhow::Result<()> {
    let summary = tweetdb_db::run_ingest(pool, records, batch_size, |progress: BatchProgress| {
        tracing::debug!(
            batch_index = progress.batch_index,
            committed_rows = progress.committed_rows,
            total_rows = progress.total_rows,
            "progress"
        );
    })
    .await
    .context("ingestion failed")?;

    println!(
        "loaded {} tweets in {} batches ({} inserted, {} updated)",
        summary.total_rows, summary.batches, summary.inserted, summary.updated
    );
    Ok(())
}

/// Read `input` and load every record in it.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, a record is
/// invalid, or a batch fails to commit.
pub(crate) async fn run_load(
    pool: &sqlx::PgPool,
    config: &AppConfig,
    input: &Path,
    batch_size: Option<usize>,
) -> anyhow::Result<()> {
    let records = tweetdb_core::read_records(input)?;
    tracing::info!(path = %input.display(), records = records.len(), "read records file");

    ingest_records(
        pool,
        &records,
        batch_size.unwrap_or(config.ingest_batch_size),
    )
    .await
}

/// Generate mock tweets in memory and load them.
///
/// # Errors
///
/// Returns an error if the company profiles are invalid or ingestion fails.
pub(crate) async fn run_generate_and_ingest(
    pool: &sqlx::PgPool,
    config: &AppConfig,
    args: &GenerateArgs,
    batch_size: Option<usize>,
) -> anyhow::Result<()> {
    let records = crate::generate::generate_records(args, config.companies_path.as_deref())?;

    ingest_records(
        pool,
        &records,
        batch_size.unwrap_or(config.ingest_batch_size),
    )
    .await
}
