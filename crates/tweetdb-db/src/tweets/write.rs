//! Write operations for the `tweets` table.

use std::collections::HashMap;

use sqlx::{PgConnection, PgPool};
use thiserror::Error;
use tweetdb_core::NewTweet;

use super::types::{BatchOutcome, BatchProgress, UpsertSummary};

/// Rows per transaction when the caller has no configured batch size.
pub const DEFAULT_BATCH_SIZE: usize = tweetdb_core::DEFAULT_INGEST_BATCH_SIZE;

#[derive(Debug, Error)]
pub enum UpsertError {
    #[error("batch size must be greater than zero")]
    InvalidBatchSize,
    /// The batch was rolled back; batches before it stay committed.
    #[error(
        "tweet batch {batch_index} ({batch_rows} rows) failed with {committed_rows} rows \
         already committed: {source}"
    )]
    Batch {
        batch_index: usize,
        batch_rows: usize,
        committed_rows: usize,
        #[source]
        source: sqlx::Error,
    },
}

/// Collapse rows sharing an `id` so that the last occurrence wins.
///
/// Ids keep the position of their first occurrence. Postgres refuses to let a
/// single `INSERT … ON CONFLICT DO UPDATE` touch the same row twice, so every
/// staged batch goes through this first.
#[must_use]
pub fn dedupe_last_write_wins(rows: &[NewTweet]) -> Vec<&NewTweet> {
    let mut positions: HashMap<&str, usize> = HashMap::with_capacity(rows.len());
    let mut deduped: Vec<&NewTweet> = Vec::with_capacity(rows.len());

    for row in rows {
        match positions.get(row.id.as_str()) {
            Some(&pos) => deduped[pos] = row,
            None => {
                positions.insert(row.id.as_str(), deduped.len());
                deduped.push(row);
            }
        }
    }

    deduped
}

/// Merge one batch into `tweets` on the given connection.
///
/// New ids are inserted; existing ids have every column except `id`
/// overwritten with the incoming values. The batch is staged as parallel
/// column arrays consumed by a single `INSERT … SELECT * FROM UNNEST(…)
/// ON CONFLICT (id) DO UPDATE`, so the whole batch is one statement.
///
/// Does not begin or commit a transaction; [`upsert_tweets`] calls this inside
/// a per-batch transaction.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the statement fails.
pub async fn upsert_tweet_batch(
    conn: &mut PgConnection,
    rows: &[NewTweet],
) -> Result<BatchOutcome, sqlx::Error> {
    if rows.is_empty() {
        return Ok(BatchOutcome::default());
    }

    let rows = dedupe_last_write_wins(rows);

    // Collect each column into a parallel Vec for UNNEST binding.
    let mut ids: Vec<&str> = Vec::with_capacity(rows.len());
    let mut texts: Vec<&str> = Vec::with_capacity(rows.len());
    let mut created_ats = Vec::with_capacity(rows.len());
    let mut companies: Vec<&str> = Vec::with_capacity(rows.len());
    let mut sentiment_scores: Vec<f64> = Vec::with_capacity(rows.len());
    let mut sentiment_labels: Vec<&str> = Vec::with_capacity(rows.len());
    let mut sentiment_confidences: Vec<Option<f64>> = Vec::with_capacity(rows.len());
    let mut user_usernames: Vec<&str> = Vec::with_capacity(rows.len());
    let mut user_names: Vec<&str> = Vec::with_capacity(rows.len());
    let mut user_profile_image_urls: Vec<Option<&str>> = Vec::with_capacity(rows.len());
    let mut user_followers_counts: Vec<Option<i64>> = Vec::with_capacity(rows.len());
    let mut retweet_counts: Vec<i64> = Vec::with_capacity(rows.len());
    let mut reply_counts: Vec<i64> = Vec::with_capacity(rows.len());
    let mut like_counts: Vec<i64> = Vec::with_capacity(rows.len());
    let mut quote_counts: Vec<i64> = Vec::with_capacity(rows.len());
    let mut hashtags: Vec<&str> = Vec::with_capacity(rows.len());

    for row in &rows {
        ids.push(&row.id);
        texts.push(&row.text);
        created_ats.push(row.created_at);
        companies.push(&row.company);
        sentiment_scores.push(row.sentiment_score);
        sentiment_labels.push(&row.sentiment_label);
        sentiment_confidences.push(row.sentiment_confidence);
        user_usernames.push(&row.user_username);
        user_names.push(&row.user_name);
        user_profile_image_urls.push(row.user_profile_image_url.as_deref());
        user_followers_counts.push(row.user_followers_count);
        retweet_counts.push(row.retweet_count);
        reply_counts.push(row.reply_count);
        like_counts.push(row.like_count);
        quote_counts.push(row.quote_count);
        hashtags.push(&row.hashtags);
    }

    let is_new: Vec<bool> = sqlx::query_scalar::<_, bool>(
        "INSERT INTO tweets \
             (id, text, created_at, company, \
              sentiment_score, sentiment_label, sentiment_confidence, \
              user_username, user_name, user_profile_image_url, user_followers_count, \
              retweet_count, reply_count, like_count, quote_count, hashtags) \
         SELECT * FROM UNNEST(\
              $1::text[], $2::text[], $3::timestamptz[], $4::text[], \
              $5::float8[], $6::text[], $7::float8[], \
              $8::text[], $9::text[], $10::text[], $11::int8[], \
              $12::int8[], $13::int8[], $14::int8[], $15::int8[], $16::text[]) \
         ON CONFLICT (id) DO UPDATE SET \
             text                   = EXCLUDED.text, \
             created_at             = EXCLUDED.created_at, \
             company                = EXCLUDED.company, \
             sentiment_score        = EXCLUDED.sentiment_score, \
             sentiment_label        = EXCLUDED.sentiment_label, \
             sentiment_confidence   = EXCLUDED.sentiment_confidence, \
             user_username          = EXCLUDED.user_username, \
             user_name              = EXCLUDED.user_name, \
             user_profile_image_url = EXCLUDED.user_profile_image_url, \
             user_followers_count   = EXCLUDED.user_followers_count, \
             retweet_count          = EXCLUDED.retweet_count, \
             reply_count            = EXCLUDED.reply_count, \
             like_count             = EXCLUDED.like_count, \
             quote_count            = EXCLUDED.quote_count, \
             hashtags               = EXCLUDED.hashtags \
         RETURNING (xmax = 0) AS is_new",
    )
    .bind(&ids)
    .bind(&texts)
    .bind(&created_ats)
    .bind(&companies)
    .bind(&sentiment_scores)
    .bind(&sentiment_labels)
    .bind(&sentiment_confidences)
    .bind(&user_usernames)
    .bind(&user_names)
    .bind(&user_profile_image_urls)
    .bind(&user_followers_counts)
    .bind(&retweet_counts)
    .bind(&reply_counts)
    .bind(&like_counts)
    .bind(&quote_counts)
    .bind(&hashtags)
    .fetch_all(&mut *conn)
    .await?;

    let inserted = is_new.iter().filter(|&&new| new).count() as u64;
    let updated = is_new.len() as u64 - inserted;

    Ok(BatchOutcome { inserted, updated })
}

/// Upsert `rows` into `tweets` in sequential batches of `batch_size`.
///
/// Each batch runs in its own transaction. A failing batch is rolled back and
/// the run stops there; batches committed before it are kept. `on_progress`
/// is called after every commit with the cumulative row count.
///
/// # Errors
///
/// Returns [`UpsertError::InvalidBatchSize`] for a zero `batch_size` (before
/// any write), or [`UpsertError::Batch`] naming the first batch that failed.
pub async fn upsert_tweets<F>(
    pool: &PgPool,
    rows: &[NewTweet],
    batch_size: usize,
    mut on_progress: F,
) -> Result<UpsertSummary, UpsertError>
where
    F: FnMut(BatchProgress),
{
    if batch_size == 0 {
        return Err(UpsertError::InvalidBatchSize);
    }

    let total_rows = rows.len();
    let mut summary = UpsertSummary {
        total_rows,
        ..UpsertSummary::default()
    };
    let mut committed_rows = 0usize;

    for (batch_index, batch) in rows.chunks(batch_size).enumerate() {
        let outcome = commit_batch(pool, batch)
            .await
            .map_err(|source| UpsertError::Batch {
                batch_index,
                batch_rows: batch.len(),
                committed_rows,
                source,
            })?;

        committed_rows += batch.len();
        summary.batches += 1;
        summary.inserted += outcome.inserted;
        summary.updated += outcome.updated;

        tracing::info!(
            batch_index,
            batch_rows = batch.len(),
            inserted = outcome.inserted,
            updated = outcome.updated,
            committed_rows,
            total_rows,
            "tweet batch committed"
        );

        on_progress(BatchProgress {
            batch_index,
            batch_rows: batch.len(),
            committed_rows,
            total_rows,
        });
    }

    Ok(summary)
}

/// Run one batch inside its own transaction.
async fn commit_batch(pool: &PgPool, batch: &[NewTweet]) -> Result<BatchOutcome, sqlx::Error> {
    let mut tx = pool.begin().await?;

    match upsert_tweet_batch(&mut *tx, batch).await {
        Ok(outcome) => {
            tx.commit().await?;
            Ok(outcome)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!(
                    error = %rollback_err,
                    "tweet batch rollback failed; connection will discard the transaction"
                );
            }
            Err(err)
        }
    }
}
