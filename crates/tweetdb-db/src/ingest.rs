//! End-to-end ingestion: ensure the table, flatten, then batch-upsert.

use sqlx::PgPool;
use thiserror::Error;
use tweetdb_core::{FlattenError, TweetRecord};

use crate::schema::ensure_tweets_table;
use crate::tweets::{upsert_tweets, BatchProgress, UpsertError, UpsertSummary};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to ensure tweets table: {0}")]
    Schema(#[source] sqlx::Error),
    #[error(transparent)]
    Flatten(#[from] FlattenError),
    #[error(transparent)]
    Upsert(#[from] UpsertError),
}

/// Ingest `records` into `tweets`.
///
/// Every record is flattened before the first write, so an invalid record
/// aborts the run with nothing committed. After that, batches are committed
/// one at a time; on a batch failure the earlier batches stay in place and
/// re-running the same input is safe because the upsert is keyed on `id`.
///
/// # Errors
///
/// Returns [`IngestError::Schema`] if the table cannot be created,
/// [`IngestError::Flatten`] for the first invalid record, or
/// [`IngestError::Upsert`] for an invalid batch size or a failed batch.
pub async fn run_ingest<F>(
    pool: &PgPool,
    records: &[TweetRecord],
    batch_size: usize,
    on_progress: F,
) -> Result<UpsertSummary, IngestError>
where
    F: FnMut(BatchProgress),
{
    if batch_size == 0 {
        return Err(UpsertError::InvalidBatchSize.into());
    }

    ensure_tweets_table(pool).await.map_err(IngestError::Schema)?;

    let rows = tweetdb_core::flatten_records(records)?;
    tracing::info!(
        records = records.len(),
        batch_size,
        "records flattened; starting batch upsert"
    );

    let summary = upsert_tweets(pool, &rows, batch_size, on_progress).await?;

    tracing::info!(
        total_rows = summary.total_rows,
        batches = summary.batches,
        inserted = summary.inserted,
        updated = summary.updated,
        "ingestion complete"
    );

    Ok(summary)
}
