//! Tweet and timeline endpoints

use super::endpoint;
use crate::context::CallContext;
use crate::error::{Error, Result};
use crate::http::{Client, RequestSpec};
use crate::pagination::PageIterator;
use crate::types::RawJson;
use tracing::debug;

/// Known names of the article-tweets endpoint, tried in order
const ARTICLE_ENDPOINTS: [&str; 3] = [
    "userArticlesTweets",
    "userArticlesTweetsV2",
    "userArticleTweets",
];

/// Whether a failed article-tweets call should move on to the next path
fn try_next_article_endpoint(err: &Error) -> bool {
    let Some(api) = err.as_api() else {
        return false;
    };
    if api.status >= 500 {
        return true;
    }
    let text = format!("{} {}", api.message, api.raw_body).to_lowercase();
    text.contains("no static resource") || text.contains("not found")
}

/// Same id under every parameter name the upstream has used for it
fn tweet_id_spec(name: &str, tweet_id: &str) -> RequestSpec {
    RequestSpec::get(endpoint(name))
        .param("tweetId", tweet_id)
        .param("tweet_id", tweet_id)
        .param("id", tweet_id)
}

fn user_list(name: &str, user_id: &str, cursor: Option<&str>) -> RequestSpec {
    RequestSpec::get(endpoint(name))
        .param("userId", user_id)
        .optional("cursor", cursor)
}

fn tweet_list(name: &str, tweet_id: &str, cursor: Option<&str>) -> RequestSpec {
    RequestSpec::get(endpoint(name))
        .param("tweetId", tweet_id)
        .optional("cursor", cursor)
}

impl Client {
    /// Tweets posted by a user
    pub async fn user_tweets(
        &self,
        ctx: &CallContext,
        user_id: &str,
        cursor: Option<&str>,
    ) -> Result<RawJson> {
        self.call(ctx, user_list("userTweetsV2", user_id, cursor)).await
    }

    /// Iterate over a user's tweets, up to `max_pages` pages (0 = all)
    pub fn user_tweets_pages(&self, user_id: &str, max_pages: u32) -> PageIterator {
        self.page_iterator(endpoint("userTweetsV2"), [("userId", user_id)], max_pages)
    }

    /// User timeline (same data as [`Client::user_tweets`])
    pub async fn user_timeline(
        &self,
        ctx: &CallContext,
        user_id: &str,
        cursor: Option<&str>,
    ) -> Result<RawJson> {
        self.call(ctx, user_list("userTimeline", user_id, cursor)).await
    }

    /// A tweet with its reply thread
    pub async fn tweet_detail(
        &self,
        ctx: &CallContext,
        tweet_id: &str,
        cursor: Option<&str>,
    ) -> Result<RawJson> {
        let spec = tweet_id_spec("tweetTimeline", tweet_id).optional("cursor", cursor);
        self.call(ctx, spec).await
    }

    /// Brief information about one tweet
    pub async fn tweet_simple(&self, ctx: &CallContext, tweet_id: &str) -> Result<RawJson> {
        let spec = tweet_id_spec("tweetSimple", tweet_id).param("tweetIds", tweet_id);
        self.call(ctx, spec).await
    }

    /// Several tweets in one call
    pub async fn tweets_by_ids<S: AsRef<str>>(
        &self,
        ctx: &CallContext,
        tweet_ids: &[S],
    ) -> Result<RawJson> {
        let ids = tweet_ids.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(",");
        let spec = RequestSpec::get(endpoint("tweetResultsByRestIds")).param("tweetIds", ids);
        self.call(ctx, spec).await
    }

    pub async fn user_replies(
        &self,
        ctx: &CallContext,
        user_id: &str,
        cursor: Option<&str>,
    ) -> Result<RawJson> {
        self.call(ctx, user_list("userTweetReply", user_id, cursor)).await
    }

    /// Tweets liked by a user (legacy endpoint)
    pub async fn user_likes(
        &self,
        ctx: &CallContext,
        user_id: &str,
        cursor: Option<&str>,
    ) -> Result<RawJson> {
        self.call(ctx, user_list("favoritesList", user_id, cursor)).await
    }

    pub async fn user_likes_v2(
        &self,
        ctx: &CallContext,
        user_id: &str,
        cursor: Option<&str>,
    ) -> Result<RawJson> {
        self.call(ctx, user_list("userLikeV2", user_id, cursor)).await
    }

    pub async fn user_highlights(
        &self,
        ctx: &CallContext,
        user_id: &str,
        cursor: Option<&str>,
    ) -> Result<RawJson> {
        self.call(ctx, user_list("highlightsV2", user_id, cursor)).await
    }

    /// Article tweets of a user.
    ///
    /// The endpoint name differs between deployments; each known name is
    /// tried in turn while the upstream answers with a server error or a
    /// "not found" style message.
    pub async fn user_articles_tweets(
        &self,
        ctx: &CallContext,
        user_id: &str,
        cursor: Option<&str>,
    ) -> Result<RawJson> {
        let last = ARTICLE_ENDPOINTS.len() - 1;
        let mut index = 0;
        loop {
            let name = ARTICLE_ENDPOINTS[index];
            match self.call(ctx, user_list(name, user_id, cursor)).await {
                Err(e) if index < last && try_next_article_endpoint(&e) => {
                    debug!("{} unavailable ({}), trying {}", name, e, ARTICLE_ENDPOINTS[index + 1]);
                    index += 1;
                }
                result => return result,
            }
        }
    }

    /// Home timeline of the configured account
    pub async fn home_timeline(&self, ctx: &CallContext, cursor: Option<&str>) -> Result<RawJson> {
        let spec = RequestSpec::get(endpoint("homeTimeline"))
            .optional("cursor", cursor)
            .user_token();
        self.call(ctx, spec).await
    }

    /// Mentions of the configured account
    pub async fn mentions_timeline(
        &self,
        ctx: &CallContext,
        cursor: Option<&str>,
    ) -> Result<RawJson> {
        let spec = RequestSpec::get(endpoint("mentionsTimeline"))
            .optional("cursor", cursor)
            .user_token();
        self.call(ctx, spec).await
    }

    /// Users who retweeted a tweet
    pub async fn retweeters(
        &self,
        ctx: &CallContext,
        tweet_id: &str,
        cursor: Option<&str>,
    ) -> Result<RawJson> {
        self.call(ctx, tweet_list("retweetersV2", tweet_id, cursor)).await
    }

    /// Ids of users who retweeted a tweet
    pub async fn retweeter_ids(
        &self,
        ctx: &CallContext,
        tweet_id: &str,
        cursor: Option<&str>,
    ) -> Result<RawJson> {
        let spec = tweet_id_spec("retweetersIds", tweet_id).optional("cursor", cursor);
        self.call(ctx, spec).await
    }

    /// Users who liked a tweet; needs the account token
    pub async fn favoriters(
        &self,
        ctx: &CallContext,
        tweet_id: &str,
        cursor: Option<&str>,
    ) -> Result<RawJson> {
        self.call(ctx, tweet_list("favoritersV2", tweet_id, cursor).user_token())
            .await
    }

    /// Quote tweets of a tweet
    pub async fn quotes(
        &self,
        ctx: &CallContext,
        tweet_id: &str,
        cursor: Option<&str>,
    ) -> Result<RawJson> {
        self.call(ctx, tweet_list("quotesV2", tweet_id, cursor)).await
    }
}

#[cfg(test)]
mod article_tests {
    use super::*;
    use crate::error::ApiError;

    #[test]
    fn test_try_next_article_endpoint() {
        let err = |status, message: &str, raw: &str| {
            Error::Api(ApiError::new(status, 0, message, raw))
        };

        assert!(try_next_article_endpoint(&err(502, "", "")));
        assert!(try_next_article_endpoint(&err(404, "No static resource userArticlesTweets", "")));
        assert!(try_next_article_endpoint(&err(400, "", "{\"error\":\"Not Found\"}")));
        assert!(!try_next_article_endpoint(&err(401, "unauthorized", "")));
        assert!(!try_next_article_endpoint(&Error::Cancelled));
    }
}
