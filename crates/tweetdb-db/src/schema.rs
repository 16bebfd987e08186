//! Creation of the `tweets` table.
//!
//! There is no migration layer: the table is created if absent and otherwise
//! left alone. An existing table with a different shape is not repaired.

use sqlx::PgPool;

pub const TWEETS_TABLE: &str = "tweets";

const CREATE_TWEETS_TABLE: &str = "\
    CREATE TABLE IF NOT EXISTS tweets ( \
        id                     TEXT PRIMARY KEY, \
        text                   TEXT NOT NULL, \
        created_at             TIMESTAMPTZ NOT NULL, \
        company                TEXT NOT NULL, \
        sentiment_score        DOUBLE PRECISION NOT NULL, \
        sentiment_label        TEXT NOT NULL, \
        sentiment_confidence   DOUBLE PRECISION, \
        user_username          TEXT NOT NULL, \
        user_name              TEXT NOT NULL, \
        user_profile_image_url TEXT, \
        user_followers_count   BIGINT, \
        retweet_count          BIGINT NOT NULL DEFAULT 0, \
        reply_count            BIGINT NOT NULL DEFAULT 0, \
        like_count             BIGINT NOT NULL DEFAULT 0, \
        quote_count            BIGINT NOT NULL DEFAULT 0, \
        hashtags               TEXT NOT NULL DEFAULT '' \
    )";

const CREATE_COMPANY_INDEX: &str = "\
    CREATE INDEX IF NOT EXISTS tweets_company_created_at_idx \
        ON tweets (company, created_at DESC)";

/// Create the `tweets` table and its company index if they do not exist.
///
/// Safe to call before every ingestion run.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if either DDL statement fails.
pub async fn ensure_tweets_table(pool: &PgPool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query(CREATE_TWEETS_TABLE).execute(&mut *tx).await?;
    sqlx::query(CREATE_COMPANY_INDEX).execute(&mut *tx).await?;
    tx.commit().await?;

    tracing::debug!(table = TWEETS_TABLE, "tweets table ensured");
    Ok(())
}

/// Returns `true` if a `tweets` table is visible in the current schema.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the catalog query fails.
pub async fn tweets_table_exists(pool: &PgPool) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS ( \
             SELECT 1 FROM information_schema.tables \
             WHERE table_schema = current_schema() AND table_name = $1 \
         )",
    )
    .bind(TWEETS_TABLE)
    .fetch_one(pool)
    .await
}
