use std::collections::HashSet;

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use tweetdb_core::{builtin_companies, flatten_records, CompanyProfile, ConfigError};

use super::*;

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

fn small_config(per_company: usize) -> GeneratorConfig {
    GeneratorConfig {
        per_company,
        days: 30,
        seed: 42,
        now: fixed_now(),
    }
}

fn generate(per_company: usize) -> Vec<TweetRecord> {
    generate_tweets(&builtin_companies(), &small_config(per_company)).unwrap()
}

#[test]
fn default_config_matches_documented_values() {
    let config = GeneratorConfig::new(fixed_now());
    assert_eq!(config.per_company, 5000);
    assert_eq!(config.days, 365);
    assert_eq!(config.seed, 42);
}

#[test]
fn same_seed_produces_identical_output() {
    assert_eq!(generate(50), generate(50));
}

#[test]
fn different_seed_changes_output() {
    let mut other = small_config(50);
    other.seed = 43;
    let a = generate(50);
    let b = generate_tweets(&builtin_companies(), &other).unwrap();
    assert_ne!(a, b);
}

#[test]
fn produces_per_company_count_with_65_35_split() {
    let records = generate(100);
    assert_eq!(records.len(), 300);

    for company in builtin_companies() {
        let mine: Vec<_> = records
            .iter()
            .filter(|r| r.company.as_deref() == Some(company.name.as_str()))
            .collect();
        assert_eq!(mine.len(), 100);
        let positive = mine
            .iter()
            .filter(|r| r.sentiment.as_ref().unwrap().label.as_deref() == Some("positive"))
            .count();
        assert_eq!(positive, 65, "positive split for {}", company.name);
    }
}

#[test]
fn positive_count_rounds_down() {
    let records = generate_tweets(&builtin_companies()[..1], &small_config(7)).unwrap();
    let positive = records
        .iter()
        .filter(|r| r.sentiment.as_ref().unwrap().label.as_deref() == Some("positive"))
        .count();
    // 7 * 65 / 100 = 4
    assert_eq!(positive, 4);
    assert_eq!(records.len() - positive, 3);
}

#[test]
fn zero_per_company_yields_no_records() {
    assert!(generate(0).is_empty());
}

#[test]
fn sentiment_and_metrics_stay_in_range() {
    for record in generate(200) {
        let sentiment = record.sentiment.unwrap();
        let score = sentiment.score.unwrap();
        let confidence = sentiment.confidence.unwrap();
        let metrics = record.metrics.unwrap();
        let likes = metrics.like_count.unwrap();

        match sentiment.label.as_deref() {
            Some("positive") => {
                assert!((0.70..=0.95).contains(&score), "score {score}");
                assert!((0.85..=0.98).contains(&confidence), "confidence {confidence}");
                assert!((50..=300).contains(&likes), "likes {likes}");
            }
            Some("negative") => {
                assert!((0.05..=0.30).contains(&score), "score {score}");
                assert!((0.80..=0.95).contains(&confidence), "confidence {confidence}");
                assert!((30..=200).contains(&likes), "likes {likes}");
            }
            other => panic!("unexpected label {other:?}"),
        }

        assert!((score * 100.0 - (score * 100.0).round()).abs() < 1e-9);
        assert!(metrics.retweet_count.unwrap() <= likes / 2);
        assert!(metrics.reply_count.unwrap() <= likes * 3 / 10);
        assert!(metrics.quote_count.unwrap() <= likes / 10);

        let followers = record.user.unwrap().followers_count.unwrap();
        assert!((100..=10_000).contains(&followers));
    }
}

#[test]
fn hashtags_match_entities_and_text() {
    let companies = builtin_companies();
    let records = generate(200);
    let mut tagged = 0;

    for record in &records {
        let flat = record.hashtags.as_deref().unwrap();
        let text = record.text.as_deref().unwrap();
        match &record.entities {
            None => assert!(flat.is_empty()),
            Some(entities) => {
                tagged += 1;
                assert!((1..=3).contains(&entities.hashtags.len()));
                let unique: HashSet<_> = entities.hashtags.iter().collect();
                assert_eq!(unique.len(), entities.hashtags.len());

                let company = companies
                    .iter()
                    .find(|c| Some(c.name.as_str()) == record.company.as_deref())
                    .unwrap();
                for tag in &entities.hashtags {
                    assert!(company.hashtags.contains(tag));
                }

                let expected = entities
                    .hashtags
                    .iter()
                    .map(|t| format!("#{t}"))
                    .collect::<Vec<_>>()
                    .join(" ");
                assert_eq!(flat, expected);
                assert!(text.ends_with(&format!(" {expected}")));
            }
        }
    }

    // Roughly 30% of 600; wide bounds keep this independent of the seed.
    assert!((90..=270).contains(&tagged), "tagged {tagged}");
}

#[test]
fn placeholders_are_substituted() {
    for record in generate(100) {
        let text = record.text.unwrap();
        assert!(!text.contains("{product}"), "{text}");
        assert!(!text.contains("{company}"), "{text}");
    }
}

#[test]
fn records_are_sorted_newest_first_within_window() {
    let now = fixed_now();
    let earliest = now - TimeDelta::days(31);
    let rows = flatten_records(&generate(100)).unwrap();

    for pair in rows.windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at);
    }
    for row in &rows {
        assert!(row.created_at <= now);
        assert!(row.created_at > earliest);
    }
}

#[test]
fn every_record_flattens_with_unique_id() {
    let records = generate(100);
    let rows = flatten_records(&records).unwrap();
    assert_eq!(rows.len(), records.len());

    let ids: HashSet<_> = rows.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids.len(), rows.len());
    for row in &rows {
        assert!(uuid::Uuid::parse_str(&row.id).is_ok());
    }
}

#[test]
fn empty_company_list_is_rejected() {
    let err = generate_tweets(&[], &small_config(10)).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
}

#[test]
fn custom_company_without_hashtags_is_rejected() {
    let company = CompanyProfile {
        name: "Acme".to_string(),
        hashtags: Vec::new(),
        topics: vec!["anvils".to_string()],
        positive_phrases: vec!["love my {product}".to_string()],
        negative_phrases: vec!["{company} let me down".to_string()],
    };
    let err = generate_tweets(&[company], &small_config(10)).unwrap_err();
    assert!(err.to_string().contains("hashtags"), "{err}");
}
