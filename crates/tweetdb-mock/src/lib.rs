//! Seeded mock tweet generator.
//!
//! Produces [`TweetRecord`]s in the same nested shape the loader accepts.
//! All randomness comes from a `StdRng` seeded with [`GeneratorConfig::seed`]
//! and the reference time is [`GeneratorConfig::now`], so two runs with the
//! same config produce identical records.

mod people;

use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use tweetdb_core::{
    CompanyProfile, ConfigError, RecordEntities, RecordMetrics, RecordSentiment, RecordUser,
    TweetRecord,
};

pub const DEFAULT_PER_COMPANY: usize = 5000;
pub const DEFAULT_DAYS: u32 = 365;
pub const DEFAULT_SEED: u64 = 42;

/// Percentage of each company's tweets that are positive.
const POSITIVE_PERCENT: usize = 65;
const HASHTAG_PROBABILITY: f64 = 0.3;
const MAX_HASHTAGS: usize = 3;

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub per_company: usize,
    /// Tweets are dated up to this many days (plus up to a day) before `now`.
    pub days: u32,
    pub seed: u64,
    pub now: DateTime<Utc>,
}

impl GeneratorConfig {
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            per_company: DEFAULT_PER_COMPANY,
            days: DEFAULT_DAYS,
            seed: DEFAULT_SEED,
            now,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sentiment {
    Positive,
    Negative,
}

impl Sentiment {
    fn label(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
        }
    }
}

/// Generate `per_company` tweets for every company, newest first.
///
/// # Errors
///
/// Returns [`ConfigError::Validation`] if `companies` is empty or a profile
/// has an empty topic, phrase, or hashtag list.
pub fn generate_tweets(
    companies: &[CompanyProfile],
    config: &GeneratorConfig,
) -> Result<Vec<TweetRecord>, ConfigError> {
    tweetdb_core::validate_companies(companies)?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut dated: Vec<(DateTime<Utc>, TweetRecord)> =
        Vec::with_capacity(companies.len() * config.per_company);

    for company in companies {
        tracing::debug!(company = %company.name, count = config.per_company, "generating tweets");

        let positive_count = config.per_company * POSITIVE_PERCENT / 100;
        for i in 0..config.per_company {
            let sentiment = if i < positive_count {
                Sentiment::Positive
            } else {
                Sentiment::Negative
            };
            let date = random_date(&mut rng, config.now, config.days);
            dated.push((date, generate_tweet(&mut rng, company, sentiment, date)));
        }
    }

    // Stable sort keeps generation order for identical timestamps.
    dated.sort_by(|a, b| b.0.cmp(&a.0));

    Ok(dated.into_iter().map(|(_, record)| record).collect())
}

fn random_date<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    let offset = TimeDelta::days(i64::from(rng.random_range(0..=days)))
        + TimeDelta::hours(rng.random_range(0..=23))
        + TimeDelta::minutes(rng.random_range(0..=59))
        + TimeDelta::seconds(rng.random_range(0..=59));
    now - offset
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    reason = "like counts are at most a few hundred"
)]
fn scaled(base: i64, factor: f64) -> i64 {
    (base as f64 * factor) as i64
}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, items: &'a [String]) -> &'a str {
    items.choose(rng).map_or("", String::as_str)
}

fn generate_tweet<R: Rng + ?Sized>(
    rng: &mut R,
    company: &CompanyProfile,
    sentiment: Sentiment,
    date: DateTime<Utc>,
) -> TweetRecord {
    let phrases = match sentiment {
        Sentiment::Positive => &company.positive_phrases,
        Sentiment::Negative => &company.negative_phrases,
    };
    let base_text = pick(rng, phrases);
    let product = pick(rng, &company.topics);
    let mut text = base_text
        .replace("{product}", product)
        .replace("{company}", &company.name);

    let entities = rng.random_bool(HASHTAG_PROBABILITY).then(|| {
        let k = rng.random_range(1..=MAX_HASHTAGS).min(company.hashtags.len());
        RecordEntities {
            hashtags: company.hashtags.choose_multiple(rng, k).cloned().collect(),
        }
    });
    let hashtags = tweetdb_core::derive_hashtags(entities.as_ref());
    if !hashtags.is_empty() {
        text.push(' ');
        text.push_str(&hashtags);
    }

    let (score, confidence, like_count) = match sentiment {
        Sentiment::Positive => (
            round2(rng.random_range(0.70..=0.95)),
            round2(rng.random_range(0.85..=0.98)),
            rng.random_range(50..=300_i64),
        ),
        Sentiment::Negative => (
            round2(rng.random_range(0.05..=0.30)),
            round2(rng.random_range(0.80..=0.95)),
            rng.random_range(30..=200_i64),
        ),
    };

    let username = people::username(rng);
    let name = people::display_name(rng);
    let profile_image_url = people::profile_image(rng).to_string();
    let followers_count = rng.random_range(100..=10_000_i64);

    let retweet_count = scaled(like_count, rng.random_range(0.1..0.5));
    let reply_count = scaled(like_count, rng.random_range(0.05..0.3));
    let quote_count = scaled(like_count, rng.random_range(0.02..0.1));

    let id = uuid::Builder::from_random_bytes(rng.random()).into_uuid();

    TweetRecord {
        id: Some(id.to_string()),
        text: Some(text),
        created_at: Some(date.to_rfc3339_opts(SecondsFormat::Micros, true)),
        company: Some(company.name.clone()),
        sentiment: Some(RecordSentiment {
            score: Some(score),
            label: Some(sentiment.label().to_string()),
            confidence: Some(confidence),
        }),
        user: Some(RecordUser {
            username: Some(username),
            name: Some(name),
            profile_image_url: Some(profile_image_url),
            followers_count: Some(followers_count),
        }),
        metrics: Some(RecordMetrics {
            retweet_count: Some(retweet_count),
            reply_count: Some(reply_count),
            like_count: Some(like_count),
            quote_count: Some(quote_count),
        }),
        entities,
        hashtags: Some(hashtags),
    }
}

#[cfg(test)]
#[path = "generator_test.rs"]
mod tests;
