//! User profile and relationship models

use serde::{Deserialize, Serialize};

/// A user profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserResult {
    #[serde(rename = "id_str")]
    pub id: String,
    pub rest_id: String,
    pub name: String,
    pub screen_name: String,
    pub description: String,
    pub location: String,
    pub url: String,
    pub protected: bool,
    pub verified: bool,
    pub is_blue_verified: bool,
    pub followers_count: i64,
    /// Accounts this user follows
    pub friends_count: i64,
    pub listed_count: i64,
    pub favourites_count: i64,
    pub statuses_count: i64,
    pub media_count: i64,
    pub created_at: String,
    #[serde(rename = "profile_image_url_https")]
    pub profile_image_url: String,
    pub profile_banner_url: String,
    pub pinned_tweet_ids_str: Vec<String>,
    pub has_custom_timelines: bool,
    pub can_dm: bool,
    pub default_profile: bool,
    pub default_profile_image: bool,
}

impl UserResult {
    /// `id_str`, or `rest_id` when the payload only carries that
    pub fn user_id(&self) -> &str {
        if self.id.is_empty() {
            &self.rest_id
        } else {
            &self.id
        }
    }
}

/// One page of users
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserListResult {
    pub users: Vec<UserResult>,
    pub next_cursor: String,
}

/// A screen name change record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsernameChange {
    pub old_name: String,
    pub new_name: String,
    pub changed_at: String,
}

/// Relationship between two users
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelationshipResult {
    pub source: RelationshipUser,
    pub target: RelationshipUser,
}

/// Relationship flags, seen from one side
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelationshipUser {
    #[serde(rename = "id_str")]
    pub id: String,
    pub screen_name: String,
    pub following: bool,
    pub followed_by: bool,
    pub blocking: bool,
    pub muting: bool,
    pub can_dm: bool,
    pub want_retweets: bool,
    pub notifications_enabled: bool,
}
