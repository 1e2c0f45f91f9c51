//! Typed response models
//!
//! Endpoint methods return [`RawJson`](crate::types::RawJson); these structs
//! are for callers who want structured access to the common payload shapes:
//!
//! ```rust,ignore
//! let raw = client.user_by_screen_name(&ctx, "jack").await?;
//! let user: xcatch::models::UserResult = serde_json::from_str(raw.get())?;
//! ```
//!
//! Every field defaults when absent, so partial payloads still decode.

mod tweet;
mod user;

pub use tweet::{
    ExtendedEntities, HashtagEntity, MediaEntity, MentionEntity, SearchResult, SymbolEntity,
    TrendResult, TrendsResult, TweetDetailResult, TweetEntities, TweetListResult, TweetResult,
    UrlEntity, VideoInfo, VideoVariant,
};
pub use user::{RelationshipResult, RelationshipUser, UserListResult, UserResult, UsernameChange};

#[cfg(test)]
mod tests;
