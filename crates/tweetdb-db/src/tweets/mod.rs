//! Database operations for the `tweets` table.

mod read;
mod types;
mod write;

pub use read::{count_tweets, count_tweets_by_company, get_tweet};
pub use types::{BatchOutcome, BatchProgress, CompanyCountRow, TweetRow, UpsertSummary};
pub use write::{
    dedupe_last_write_wins, upsert_tweet_batch, upsert_tweets, UpsertError, DEFAULT_BATCH_SIZE,
};
