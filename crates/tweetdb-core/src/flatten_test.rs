use chrono::{TimeZone, Utc};

use super::*;
use crate::records::{RecordSentiment, RecordUser};

fn make_record(id: &str) -> TweetRecord {
    TweetRecord {
        id: Some(id.to_string()),
        text: Some("love my new iPhone 14".to_string()),
        created_at: Some("2024-03-01T10:15:30".to_string()),
        company: Some("Apple Inc.".to_string()),
        sentiment: Some(RecordSentiment {
            score: Some(0.9),
            label: Some("positive".to_string()),
            confidence: Some(0.95),
        }),
        user: Some(RecordUser {
            username: Some("techguru12".to_string()),
            name: Some("Mary Smith".to_string()),
            profile_image_url: Some("https://example.com/a.png".to_string()),
            followers_count: Some(1200),
        }),
        metrics: Some(RecordMetrics {
            retweet_count: Some(10),
            reply_count: Some(4),
            like_count: Some(80),
            quote_count: Some(2),
        }),
        entities: None,
        hashtags: None,
    }
}

#[test]
fn flattens_sentiment_user_and_metrics() {
    let row = flatten_record(0, &make_record("t1")).unwrap();

    assert_eq!(row.id, "t1");
    assert!((row.sentiment_score - 0.9).abs() < f64::EPSILON);
    assert_eq!(row.sentiment_label, "positive");
    assert_eq!(row.sentiment_confidence, Some(0.95));
    assert_eq!(row.user_username, "techguru12");
    assert_eq!(row.user_name, "Mary Smith");
    assert_eq!(
        row.user_profile_image_url.as_deref(),
        Some("https://example.com/a.png")
    );
    assert_eq!(row.user_followers_count, Some(1200));
    assert_eq!(
        (row.retweet_count, row.reply_count, row.like_count, row.quote_count),
        (10, 4, 80, 2)
    );
    assert_eq!(
        row.created_at,
        Utc.with_ymd_and_hms(2024, 3, 1, 10, 15, 30).unwrap()
    );
}

#[test]
fn absent_confidence_becomes_null() {
    let mut record = make_record("t1");
    if let Some(s) = record.sentiment.as_mut() {
        s.confidence = None;
    }
    let row = flatten_record(0, &record).unwrap();
    assert!(row.sentiment_confidence.is_none());
}

#[test]
fn absent_metrics_default_to_zero() {
    let mut record = make_record("t1");
    record.metrics = Some(RecordMetrics {
        like_count: Some(7),
        ..RecordMetrics::default()
    });
    let row = flatten_record(0, &record).unwrap();
    assert_eq!(
        (row.retweet_count, row.reply_count, row.like_count, row.quote_count),
        (0, 0, 7, 0)
    );

    record.metrics = None;
    let row = flatten_record(0, &record).unwrap();
    assert_eq!(row.like_count, 0);
}

#[test]
fn hashtags_joined_from_entities() {
    let mut record = make_record("t1");
    record.entities = Some(RecordEntities {
        hashtags: vec!["Apple".to_string(), "iPhone".to_string()],
    });
    let row = flatten_record(0, &record).unwrap();
    assert_eq!(row.hashtags, "#Apple #iPhone");
}

#[test]
fn hashtags_empty_without_entities() {
    let row = flatten_record(0, &make_record("t1")).unwrap();
    assert_eq!(row.hashtags, "");
}

#[test]
fn entities_take_precedence_over_flat_hashtags() {
    let mut record = make_record("t1");
    record.hashtags = Some("#Stale".to_string());
    record.entities = Some(RecordEntities {
        hashtags: vec!["Fresh".to_string()],
    });
    assert_eq!(flatten_record(0, &record).unwrap().hashtags, "#Fresh");

    // An empty entity list still wins over the flat string.
    record.entities = Some(RecordEntities { hashtags: vec![] });
    assert_eq!(flatten_record(0, &record).unwrap().hashtags, "");

    record.entities = None;
    assert_eq!(flatten_record(0, &record).unwrap().hashtags, "");
}

#[test]
fn missing_username_is_rejected_with_path() {
    let mut record = make_record("t1");
    if let Some(u) = record.user.as_mut() {
        u.username = None;
    }
    let err = flatten_record(3, &record).unwrap_err();
    assert!(
        matches!(
            err,
            FlattenError::MissingField { index: 3, field: "user.username", ref id }
                if id.as_deref() == Some("t1")
        ),
        "unexpected error: {err:?}"
    );
    assert!(err.to_string().contains("user.username"));
}

#[test]
fn missing_nested_objects_are_rejected() {
    let mut record = make_record("t1");
    record.sentiment = None;
    assert!(matches!(
        flatten_record(0, &record),
        Err(FlattenError::MissingField { field: "sentiment", .. })
    ));

    let mut record = make_record("t1");
    record.user = None;
    assert!(matches!(
        flatten_record(0, &record),
        Err(FlattenError::MissingField { field: "user", .. })
    ));

    let mut record = make_record("t1");
    record.id = None;
    let err = flatten_record(0, &record).unwrap_err();
    assert!(matches!(err, FlattenError::MissingField { field: "id", .. }));
    assert!(err.to_string().contains("<none>"));
}

#[test]
fn malformed_timestamp_fails() {
    let mut record = make_record("t1");
    record.created_at = Some("yesterday-ish".to_string());
    let err = flatten_record(0, &record).unwrap_err();
    assert!(
        matches!(err, FlattenError::InvalidTimestamp { ref value, .. } if value == "yesterday-ish"),
        "unexpected error: {err:?}"
    );
}

#[test]
fn flatten_records_fails_fast_and_keeps_order() {
    let records = vec![make_record("a"), make_record("b"), make_record("c")];
    let rows = flatten_records(&records).unwrap();
    let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["a", "b", "c"]);

    let mut broken = records;
    broken[1].created_at = None;
    let err = flatten_records(&broken).unwrap_err();
    assert!(matches!(
        err,
        FlattenError::MissingField {
            index: 1,
            field: "created_at",
            ..
        }
    ));
}

#[test]
fn parse_created_at_accepts_offsets_and_naive_forms() {
    let expected = Utc.with_ymd_and_hms(2024, 3, 1, 10, 15, 30).unwrap();
    assert_eq!(parse_created_at("2024-03-01T10:15:30Z").unwrap(), expected);
    assert_eq!(
        parse_created_at("2024-03-01T12:15:30+02:00").unwrap(),
        expected
    );
    assert_eq!(parse_created_at("2024-03-01 10:15:30").unwrap(), expected);

    let fractional = parse_created_at("2024-03-01T10:15:30.250000").unwrap();
    assert_eq!(fractional.timestamp_subsec_millis(), 250);

    assert!(parse_created_at("2024-13-01T00:00:00").is_err());
    assert!(parse_created_at("").is_err());
}
