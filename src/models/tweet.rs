//! Tweet, search and trend models

use super::user::UserResult;
use crate::types::JsonValue;
use serde::{Deserialize, Serialize};

/// A single tweet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TweetResult {
    #[serde(rename = "id_str")]
    pub id: String,
    pub rest_id: String,
    pub full_text: String,
    pub text: String,
    pub created_at: String,
    #[serde(rename = "conversation_id_str")]
    pub conversation_id: String,
    #[serde(rename = "in_reply_to_status_id_str")]
    pub in_reply_to_status_id: String,
    #[serde(rename = "in_reply_to_user_id_str")]
    pub in_reply_to_user_id: String,
    pub in_reply_to_screen_name: String,
    pub lang: String,
    pub source: String,
    pub retweet_count: i64,
    pub favorite_count: i64,
    pub reply_count: i64,
    pub quote_count: i64,
    pub bookmark_count: i64,
    /// Sent as a string upstream
    pub view_count: String,
    pub is_quote_status: bool,
    pub retweeted: bool,
    pub favorited: bool,
    pub bookmarked: bool,
    pub user: Option<UserResult>,
    pub entities: Option<TweetEntities>,
    pub extended_entities: Option<ExtendedEntities>,
    pub quoted_status: Option<Box<TweetResult>>,
    pub retweeted_status: Option<Box<TweetResult>>,
    /// Card payload, left undecoded
    pub card: Option<JsonValue>,
}

impl TweetResult {
    /// Best available text: `full_text`, falling back to `text`
    pub fn text(&self) -> &str {
        if self.full_text.is_empty() {
            &self.text
        } else {
            &self.full_text
        }
    }

    pub fn is_reply(&self) -> bool {
        !self.in_reply_to_status_id.is_empty()
    }

    pub fn is_retweet(&self) -> bool {
        self.retweeted_status.is_some()
    }

    /// Media attachments, preferring `extended_entities`
    pub fn media(&self) -> &[MediaEntity] {
        match (&self.extended_entities, &self.entities) {
            (Some(extended), _) if !extended.media.is_empty() => &extended.media,
            (_, Some(entities)) => &entities.media,
            _ => &[],
        }
    }
}

/// Entities extracted from tweet text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TweetEntities {
    pub urls: Vec<UrlEntity>,
    pub hashtags: Vec<HashtagEntity>,
    pub user_mentions: Vec<MentionEntity>,
    pub symbols: Vec<SymbolEntity>,
    pub media: Vec<MediaEntity>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtendedEntities {
    pub media: Vec<MediaEntity>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlEntity {
    pub url: String,
    pub expanded_url: String,
    pub display_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashtagEntity {
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MentionEntity {
    #[serde(rename = "id_str")]
    pub id: String,
    pub name: String,
    pub screen_name: String,
}

/// Cashtag
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolEntity {
    pub text: String,
}

/// Media attachment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaEntity {
    #[serde(rename = "id_str")]
    pub id: String,
    #[serde(rename = "media_url_https")]
    pub media_url: String,
    pub url: String,
    pub expanded_url: String,
    /// `photo`, `video` or `animated_gif`
    #[serde(rename = "type")]
    pub media_type: String,
    pub video_info: Option<VideoInfo>,
    pub sizes: Option<JsonValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoInfo {
    pub duration_millis: i64,
    pub aspect_ratio: Vec<i64>,
    pub variants: Vec<VideoVariant>,
}

impl VideoInfo {
    /// Highest-bitrate `video/mp4` variant
    pub fn best_variant(&self) -> Option<&VideoVariant> {
        self.variants
            .iter()
            .filter(|v| v.content_type == "video/mp4")
            .max_by_key(|v| v.bitrate)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoVariant {
    pub bitrate: i64,
    pub content_type: String,
    pub url: String,
}

/// One page of tweets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TweetListResult {
    pub tweets: Vec<TweetResult>,
    pub next_cursor: String,
}

/// A tweet with its reply thread
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TweetDetailResult {
    pub tweet: TweetResult,
    pub replies: Vec<TweetResult>,
    pub next_cursor: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResult {
    pub tweets: Vec<TweetResult>,
    pub users: Vec<UserResult>,
    pub next_cursor: String,
}

/// A trending topic
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendResult {
    pub name: String,
    pub query: String,
    pub url: String,
    /// Null when the upstream has no estimate
    #[serde(rename = "tweet_volume")]
    pub tweet_count: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendsResult {
    pub trends: Vec<TrendResult>,
}
