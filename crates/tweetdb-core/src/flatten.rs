//! Flattening of nested [`TweetRecord`]s into [`NewTweet`] rows.

use chrono::{DateTime, NaiveDateTime, Utc};
use thiserror::Error;

use crate::records::{NewTweet, RecordEntities, RecordMetrics, TweetRecord};

/// Naive layouts accepted for `created_at` when no offset is present.
const NAIVE_TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
];

#[derive(Debug, Error)]
pub enum FlattenError {
    #[error("record {index} (id {}) is missing required field `{field}`", .id.as_deref().unwrap_or("<none>"))]
    MissingField {
        index: usize,
        id: Option<String>,
        field: &'static str,
    },
    #[error("record {index} (id {id}) has invalid created_at {value:?}: {reason}")]
    InvalidTimestamp {
        index: usize,
        id: String,
        value: String,
        reason: String,
    },
}

/// Flatten every record, in order.
///
/// Fails on the first invalid record; no partial output is returned.
///
/// # Errors
///
/// Returns [`FlattenError`] for the first record with a missing required
/// field or an unparseable `created_at`.
pub fn flatten_records(records: &[TweetRecord]) -> Result<Vec<NewTweet>, FlattenError> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| flatten_record(index, record))
        .collect()
}

/// Flatten a single record. `index` is its position in the input and is only
/// used for error reporting.
///
/// # Errors
///
/// Returns [`FlattenError::MissingField`] if a required key is absent, or
/// [`FlattenError::InvalidTimestamp`] if `created_at` cannot be parsed.
pub fn flatten_record(index: usize, record: &TweetRecord) -> Result<NewTweet, FlattenError> {
    let missing = |field: &'static str| FlattenError::MissingField {
        index,
        id: record.id.clone(),
        field,
    };

    let id = record.id.clone().ok_or_else(|| missing("id"))?;
    let text = record.text.clone().ok_or_else(|| missing("text"))?;
    let raw_created_at = record
        .created_at
        .as_deref()
        .ok_or_else(|| missing("created_at"))?;
    let company = record.company.clone().ok_or_else(|| missing("company"))?;

    let sentiment = record.sentiment.as_ref().ok_or_else(|| missing("sentiment"))?;
    let sentiment_score = sentiment.score.ok_or_else(|| missing("sentiment.score"))?;
    let sentiment_label = sentiment
        .label
        .clone()
        .ok_or_else(|| missing("sentiment.label"))?;

    let user = record.user.as_ref().ok_or_else(|| missing("user"))?;
    let user_username = user
        .username
        .clone()
        .ok_or_else(|| missing("user.username"))?;
    let user_name = user.name.clone().ok_or_else(|| missing("user.name"))?;

    let created_at = parse_created_at(raw_created_at).map_err(|reason| {
        FlattenError::InvalidTimestamp {
            index,
            id: id.clone(),
            value: raw_created_at.to_string(),
            reason,
        }
    })?;

    let metrics = record.metrics.clone().unwrap_or_default();
    let RecordMetrics {
        retweet_count,
        reply_count,
        like_count,
        quote_count,
    } = metrics;

    Ok(NewTweet {
        id,
        text,
        created_at,
        company,
        sentiment_score,
        sentiment_label,
        sentiment_confidence: sentiment.confidence,
        user_username,
        user_name,
        user_profile_image_url: user.profile_image_url.clone(),
        user_followers_count: user.followers_count,
        retweet_count: retweet_count.unwrap_or(0),
        reply_count: reply_count.unwrap_or(0),
        like_count: like_count.unwrap_or(0),
        quote_count: quote_count.unwrap_or(0),
        hashtags: derive_hashtags(record.entities.as_ref()),
    })
}

/// Join `entities.hashtags` as `#a #b`. Any flat `hashtags` string on the
/// record is ignored.
#[must_use]
pub fn derive_hashtags(entities: Option<&RecordEntities>) -> String {
    match entities {
        Some(entities) if !entities.hashtags.is_empty() => entities
            .hashtags
            .iter()
            .map(|tag| format!("#{tag}"))
            .collect::<Vec<_>>()
            .join(" "),
        _ => String::new(),
    }
}

/// Parse an RFC 3339 timestamp, or a naive ISO-8601 one interpreted as UTC.
///
/// # Errors
///
/// Returns the RFC 3339 parser's message when no accepted layout matches.
pub fn parse_created_at(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(rfc_err) => NAIVE_TIMESTAMP_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|naive| naive.and_utc())
            .ok_or_else(|| rfc_err.to_string()),
    }
}

#[cfg(test)]
#[path = "flatten_test.rs"]
mod tests;
