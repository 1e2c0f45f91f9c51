//! Follower graph, list and community endpoints

use super::endpoint;
use crate::context::CallContext;
use crate::error::Result;
use crate::http::{Client, RequestSpec};
use crate::pagination::PageIterator;
use crate::types::RawJson;

fn paged(name: &str, key: &str, id: &str, cursor: Option<&str>) -> RequestSpec {
    RequestSpec::get(endpoint(name))
        .param(key, id)
        .optional("cursor", cursor)
}

impl Client {
    /// Followers of a user
    pub async fn followers(
        &self,
        ctx: &CallContext,
        user_id: &str,
        cursor: Option<&str>,
    ) -> Result<RawJson> {
        self.call(ctx, paged("followersListV2", "userId", user_id, cursor)).await
    }

    /// Iterate over a user's followers, up to `max_pages` pages (0 = all)
    pub fn followers_pages(&self, user_id: &str, max_pages: u32) -> PageIterator {
        self.page_iterator(endpoint("followersListV2"), [("userId", user_id)], max_pages)
    }

    /// Accounts a user follows
    pub async fn followings(
        &self,
        ctx: &CallContext,
        user_id: &str,
        cursor: Option<&str>,
    ) -> Result<RawJson> {
        self.call(ctx, paged("followingsListV2", "userId", user_id, cursor)).await
    }

    pub async fn follower_ids(
        &self,
        ctx: &CallContext,
        user_id: &str,
        cursor: Option<&str>,
    ) -> Result<RawJson> {
        self.call(ctx, paged("followersIds", "userId", user_id, cursor)).await
    }

    pub async fn following_ids(
        &self,
        ctx: &CallContext,
        user_id: &str,
        cursor: Option<&str>,
    ) -> Result<RawJson> {
        self.call(ctx, paged("followingsIds", "userId", user_id, cursor)).await
    }

    /// Friendship between two users
    pub async fn relationship(
        &self,
        ctx: &CallContext,
        source_id: &str,
        target_id: &str,
    ) -> Result<RawJson> {
        let spec = RequestSpec::get(endpoint("getFriendshipsShow"))
            .param("sourceId", source_id)
            .param("targetId", target_id);
        self.call(ctx, spec).await
    }

    /// Mutual followers
    pub async fn followers_you_know(
        &self,
        ctx: &CallContext,
        user_id: &str,
        cursor: Option<&str>,
    ) -> Result<RawJson> {
        self.call(ctx, paged("followersYouKnowV2", "userId", user_id, cursor)).await
    }

    pub async fn blue_verified_followers(
        &self,
        ctx: &CallContext,
        user_id: &str,
        cursor: Option<&str>,
    ) -> Result<RawJson> {
        self.call(ctx, paged("blueVerifiedFollowersV2", "userId", user_id, cursor)).await
    }

    /// Lists owned by a user, looked up by id or screen name
    pub async fn lists_by_user(
        &self,
        ctx: &CallContext,
        user_id: Option<&str>,
        screen_name: Option<&str>,
    ) -> Result<RawJson> {
        let spec = RequestSpec::get(endpoint("getListByUserIdOrScreenName"))
            .optional("userId", user_id)
            .optional("screenName", screen_name);
        self.call(ctx, spec).await
    }

    pub async fn list_members(
        &self,
        ctx: &CallContext,
        list_id: &str,
        cursor: Option<&str>,
    ) -> Result<RawJson> {
        self.call(ctx, paged("listMembersByListIdV2", "listId", list_id, cursor)).await
    }

    /// Latest tweets of a list
    pub async fn list_timeline(
        &self,
        ctx: &CallContext,
        list_id: &str,
        cursor: Option<&str>,
    ) -> Result<RawJson> {
        self.call(ctx, paged("listLatestTweetsTimeline", "listId", list_id, cursor)).await
    }

    pub async fn communities_by_screen_name(
        &self,
        ctx: &CallContext,
        screen_name: &str,
    ) -> Result<RawJson> {
        let spec = RequestSpec::get(endpoint("getCommunitiesByScreenName"))
            .param("screenName", screen_name);
        self.call(ctx, spec).await
    }

    pub async fn community_info(&self, ctx: &CallContext, community_id: &str) -> Result<RawJson> {
        let spec = RequestSpec::get(endpoint("communitiesFetchOneQuery"))
            .param("communityId", community_id);
        self.call(ctx, spec).await
    }

    pub async fn community_tweets(
        &self,
        ctx: &CallContext,
        community_id: &str,
        cursor: Option<&str>,
    ) -> Result<RawJson> {
        self.call(ctx, paged("communitiesTweetsTimelineV2", "communityId", community_id, cursor))
            .await
    }

    pub async fn community_members(
        &self,
        ctx: &CallContext,
        community_id: &str,
        cursor: Option<&str>,
    ) -> Result<RawJson> {
        self.call(ctx, paged("communitiesMemberV2", "communityId", community_id, cursor))
            .await
    }
}
