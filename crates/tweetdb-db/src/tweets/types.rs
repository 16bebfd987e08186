//! Row and result types for the `tweets` table.

use chrono::{DateTime, Utc};

/// A row from the `tweets` table.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct TweetRow {
    pub id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub company: String,
    pub sentiment_score: f64,
    pub sentiment_label: String,
    pub sentiment_confidence: Option<f64>,
    pub user_username: String,
    pub user_name: String,
    pub user_profile_image_url: Option<String>,
    pub user_followers_count: Option<i64>,
    pub retweet_count: i64,
    pub reply_count: i64,
    pub like_count: i64,
    pub quote_count: i64,
    pub hashtags: String,
}

/// Per-company tweet totals, split by sentiment label.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CompanyCountRow {
    pub company: String,
    pub total: i64,
    pub positive: i64,
    pub negative: i64,
}

/// Result of merging one batch into `tweets`.
///
/// Counts are of distinct ids after in-batch de-duplication, so
/// `inserted + updated` can be less than the batch length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub inserted: u64,
    pub updated: u64,
}

/// Progress reported after each committed batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress {
    /// Zero-based index of the batch that was just committed.
    pub batch_index: usize,
    pub batch_rows: usize,
    /// Input rows committed so far, including this batch.
    pub committed_rows: usize,
    pub total_rows: usize,
}

/// Totals for a completed [`super::upsert_tweets`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpsertSummary {
    /// Input rows processed (duplicates within a batch are counted).
    pub total_rows: usize,
    pub batches: usize,
    pub inserted: u64,
    pub updated: u64,
}
