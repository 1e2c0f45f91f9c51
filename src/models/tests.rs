//! Tests for response models

use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_user_result_from_partial_payload() {
    let user: UserResult = serde_json::from_value(json!({
        "rest_id": "44196397",
        "screen_name": "elonmusk",
        "followers_count": 200_000_000,
        "pinned_tweet_ids_str": ["1", "2"],
        "unknown_field": {"ignored": true}
    }))
    .unwrap();

    assert_eq!(user.screen_name, "elonmusk");
    assert_eq!(user.followers_count, 200_000_000);
    assert_eq!(user.pinned_tweet_ids_str, vec!["1", "2"]);
    assert_eq!(user.user_id(), "44196397");
    assert!(!user.verified);
    assert_eq!(user.name, "");
}

#[test]
fn test_user_id_prefers_id_str() {
    let user = UserResult {
        id: "1".to_string(),
        rest_id: "2".to_string(),
        ..UserResult::default()
    };
    assert_eq!(user.user_id(), "1");
}

#[test]
fn test_relationship_result() {
    let rel: RelationshipResult = serde_json::from_value(json!({
        "source": {"id_str": "1", "screen_name": "a", "following": true, "can_dm": true},
        "target": {"id_str": "2", "screen_name": "b", "followed_by": true}
    }))
    .unwrap();

    assert_eq!(rel.source.id, "1");
    assert!(rel.source.following);
    assert!(rel.source.can_dm);
    assert!(rel.target.followed_by);
    assert!(!rel.target.blocking);
}

#[test]
fn test_tweet_text_prefers_full_text() {
    let tweet: TweetResult = serde_json::from_value(json!({
        "id_str": "9",
        "text": "short…",
        "full_text": "the complete text"
    }))
    .unwrap();
    assert_eq!(tweet.text(), "the complete text");

    let tweet: TweetResult = serde_json::from_value(json!({"text": "only text"})).unwrap();
    assert_eq!(tweet.text(), "only text");
}

#[test]
fn test_tweet_nested_statuses() {
    let tweet: TweetResult = serde_json::from_value(json!({
        "id_str": "3",
        "in_reply_to_status_id_str": "2",
        "user": {"screen_name": "jack"},
        "retweeted_status": {
            "id_str": "1",
            "full_text": "original",
            "quoted_status": {"id_str": "0"}
        },
        "card": {"name": "summary"}
    }))
    .unwrap();

    assert!(tweet.is_reply());
    assert!(tweet.is_retweet());
    assert_eq!(tweet.user.as_ref().map(|u| u.screen_name.as_str()), Some("jack"));

    let original = tweet.retweeted_status.as_deref().unwrap();
    assert_eq!(original.text(), "original");
    assert_eq!(original.quoted_status.as_ref().map(|q| q.id.as_str()), Some("0"));
    assert_eq!(tweet.card, Some(json!({"name": "summary"})));
}

#[test]
fn test_tweet_media_prefers_extended_entities() {
    let tweet: TweetResult = serde_json::from_value(json!({
        "entities": {
            "hashtags": [{"text": "rust"}],
            "symbols": [{"text": "BTC"}],
            "user_mentions": [{"id_str": "12", "screen_name": "jack"}],
            "urls": [{"url": "https://t.co/x", "expanded_url": "https://example.com"}],
            "media": [{"id_str": "m1", "type": "photo"}]
        },
        "extended_entities": {
            "media": [{
                "id_str": "m2",
                "type": "video",
                "video_info": {
                    "duration_millis": 1500,
                    "aspect_ratio": [16, 9],
                    "variants": [
                        {"content_type": "application/x-mpegURL", "url": "https://v/pl.m3u8"},
                        {"bitrate": 256_000, "content_type": "video/mp4", "url": "v/lo.mp4"},
                        {"bitrate": 2_176_000, "content_type": "video/mp4", "url": "v/hi.mp4"}
                    ]
                }
            }]
        }
    }))
    .unwrap();

    let entities = tweet.entities.as_ref().unwrap();
    assert_eq!(entities.hashtags[0].text, "rust");
    assert_eq!(entities.symbols[0].text, "BTC");
    assert_eq!(entities.user_mentions[0].screen_name, "jack");
    assert_eq!(entities.urls[0].expanded_url, "https://example.com");

    let media = tweet.media();
    assert_eq!(media.len(), 1);
    assert_eq!(media[0].id, "m2");
    assert_eq!(media[0].media_type, "video");

    let video = media[0].video_info.as_ref().unwrap();
    assert_eq!(video.aspect_ratio, vec![16, 9]);
    assert_eq!(video.best_variant().map(|v| v.url.as_str()), Some("v/hi.mp4"));
}

#[test]
fn test_tweet_media_falls_back_to_entities() {
    let tweet: TweetResult = serde_json::from_value(json!({
        "entities": {"media": [{"id_str": "m1", "type": "photo"}]},
        "extended_entities": {"media": []}
    }))
    .unwrap();
    assert_eq!(tweet.media()[0].id, "m1");

    assert!(TweetResult::default().media().is_empty());
}

#[test]
fn test_list_results() {
    let page: TweetListResult = serde_json::from_value(json!({
        "tweets": [{"id_str": "1"}, {"id_str": "2"}],
        "next_cursor": "abc"
    }))
    .unwrap();
    assert_eq!(page.tweets.len(), 2);
    assert_eq!(page.next_cursor, "abc");

    let users: UserListResult =
        serde_json::from_value(json!({"users": [{"screen_name": "a"}]})).unwrap();
    assert_eq!(users.users[0].screen_name, "a");
    assert_eq!(users.next_cursor, "");

    let detail: TweetDetailResult = serde_json::from_value(json!({
        "tweet": {"id_str": "1"},
        "replies": [{"id_str": "2", "in_reply_to_status_id_str": "1"}]
    }))
    .unwrap();
    assert_eq!(detail.tweet.id, "1");
    assert!(detail.replies[0].is_reply());

    let search: SearchResult = serde_json::from_value(json!({
        "tweets": [],
        "users": [{"screen_name": "b"}],
        "next_cursor": "n"
    }))
    .unwrap();
    assert_eq!(search.users.len(), 1);
    assert_eq!(search.next_cursor, "n");
}

#[test]
fn test_username_changes() {
    let changes: Vec<UsernameChange> = serde_json::from_value(json!([
        {"old_name": "a", "new_name": "b", "changed_at": "2024-01-01"}
    ]))
    .unwrap();
    assert_eq!(
        changes,
        vec![UsernameChange {
            old_name: "a".to_string(),
            new_name: "b".to_string(),
            changed_at: "2024-01-01".to_string(),
        }]
    );
}

#[test]
fn test_trends_result() {
    let trends: TrendsResult = serde_json::from_value(json!({
        "trends": [
            {"name": "#Rust", "query": "%23Rust", "tweet_volume": 12000},
            {"name": "Tokio", "tweet_volume": null}
        ]
    }))
    .unwrap();
    assert_eq!(trends.trends[0].tweet_count, Some(12000));
    assert_eq!(trends.trends[1].tweet_count, None);
    assert_eq!(trends.trends[1].url, "");
}
