use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A mock tweet as produced by the generator or read from a records file.
///
/// Keys required by the `tweets` table are `Option` so that a record with a
/// missing key still deserializes; [`crate::flatten_record`] is the single
/// place that rejects it, naming the dotted path of the absent key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TweetRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    /// ISO-8601 timestamp string, with or without an offset.
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub sentiment: Option<RecordSentiment>,
    #[serde(default)]
    pub user: Option<RecordUser>,
    #[serde(default)]
    pub metrics: Option<RecordMetrics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entities: Option<RecordEntities>,
    /// Pre-joined hashtag string carried by generated records. Never stored;
    /// the stored value is always derived from `entities`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hashtags: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordSentiment {
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordUser {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub followers_count: Option<i64>,
}

/// Engagement counters. Absent counters are stored as `0`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMetrics {
    #[serde(default)]
    pub retweet_count: Option<i64>,
    #[serde(default)]
    pub reply_count: Option<i64>,
    #[serde(default)]
    pub like_count: Option<i64>,
    #[serde(default)]
    pub quote_count: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordEntities {
    /// Tag names without the leading `#`.
    #[serde(default)]
    pub hashtags: Vec<String>,
}

/// A flattened tweet ready to be written to the `tweets` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTweet {
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
    /// Space-separated `#tag` list; empty when the record had no hashtags.
    pub hashtags: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_generated_record_shape() {
        let json = r##"{
            "id": "abc",
            "text": "love my new iPhone 14 #Apple",
            "created_at": "2024-03-01T10:15:30.123456",
            "company": "Apple Inc.",
            "sentiment": {"score": 0.9, "label": "positive", "confidence": 0.95},
            "user": {
                "username": "techguru12",
                "name": "Mary Smith",
                "profile_image_url": "https://example.com/a.png",
                "followers_count": 1200
            },
            "metrics": {"retweet_count": 10, "reply_count": 4, "like_count": 80, "quote_count": 2},
            "hashtags": "#Apple",
            "entities": {"hashtags": ["Apple"]}
        }"##;

        let record: TweetRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id.as_deref(), Some("abc"));
        assert_eq!(
            record.sentiment.as_ref().and_then(|s| s.confidence),
            Some(0.95)
        );
        assert_eq!(
            record.entities.as_ref().map(|e| e.hashtags.clone()),
            Some(vec!["Apple".to_string()])
        );
    }

    #[test]
    fn missing_keys_deserialize_as_none() {
        let record: TweetRecord =
            serde_json::from_str(r#"{"id": "x", "user": {"name": "No Handle"}}"#).unwrap();
        assert!(record.text.is_none());
        assert!(record.sentiment.is_none());
        assert!(record.user.as_ref().is_some_and(|u| u.username.is_none()));
        assert!(record.entities.is_none());
    }

    #[test]
    fn serialization_omits_absent_entities_and_hashtags() {
        let record = TweetRecord {
            id: Some("x".to_string()),
            ..TweetRecord::default()
        };
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("entities").is_none());
        assert!(value.get("hashtags").is_none());
        assert!(value.get("metrics").is_some());
    }
}
