//! Read operations for the `tweets` table.

use sqlx::PgPool;

use super::types::{CompanyCountRow, TweetRow};

/// Fetch a single tweet by id.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn get_tweet(pool: &PgPool, id: &str) -> Result<Option<TweetRow>, sqlx::Error> {
    sqlx::query_as::<_, TweetRow>(
        "SELECT id, text, created_at, company, \
                sentiment_score, sentiment_label, sentiment_confidence, \
                user_username, user_name, user_profile_image_url, user_followers_count, \
                retweet_count, reply_count, like_count, quote_count, hashtags \
         FROM tweets \
         WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Total number of rows in `tweets`.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn count_tweets(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tweets")
        .fetch_one(pool)
        .await
}

/// Per-company totals, ordered by company name.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn count_tweets_by_company(pool: &PgPool) -> Result<Vec<CompanyCountRow>, sqlx::Error> {
    sqlx::query_as::<_, CompanyCountRow>(
        "SELECT company, \
                COUNT(*) AS total, \
                COUNT(*) FILTER (WHERE sentiment_label = 'positive') AS positive, \
                COUNT(*) FILTER (WHERE sentiment_label = 'negative') AS negative \
         FROM tweets \
         GROUP BY company \
         ORDER BY company",
    )
    .fetch_all(pool)
    .await
}
