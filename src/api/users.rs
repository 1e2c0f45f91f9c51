//! User endpoints

use super::endpoint;
use crate::context::CallContext;
use crate::error::Result;
use crate::http::{Client, RequestSpec};
use crate::types::RawJson;

fn join_ids<S: AsRef<str>>(ids: &[S]) -> String {
    ids.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(",")
}

impl Client {
    /// User by screen name (handle)
    pub async fn user_by_screen_name(
        &self,
        ctx: &CallContext,
        screen_name: &str,
    ) -> Result<RawJson> {
        let spec =
            RequestSpec::get(endpoint("getUserByIdOrNameShow")).param("screenName", screen_name);
        self.call(ctx, spec).await
    }

    /// User by numeric id
    pub async fn user_by_id(&self, ctx: &CallContext, user_id: &str) -> Result<RawJson> {
        let spec = RequestSpec::get(endpoint("usersByIdRestIds")).param("userIds", user_id);
        self.call(ctx, spec).await
    }

    /// Several users in one call
    pub async fn users_by_ids<S: AsRef<str>>(
        &self,
        ctx: &CallContext,
        user_ids: &[S],
    ) -> Result<RawJson> {
        let spec =
            RequestSpec::get(endpoint("usersByIdRestIds")).param("userIds", join_ids(user_ids));
        self.call(ctx, spec).await
    }

    /// Screen name history
    pub async fn username_changes(&self, ctx: &CallContext, user_id: &str) -> Result<RawJson> {
        let spec = RequestSpec::get(endpoint("usernameChanges")).param("userId", user_id);
        self.call(ctx, spec).await
    }

    /// Look a user up by screen name, id, or both
    pub async fn lookup_user(
        &self,
        ctx: &CallContext,
        screen_name: Option<&str>,
        user_id: Option<&str>,
    ) -> Result<RawJson> {
        let spec = RequestSpec::get(endpoint("getUserByIdOrNameLookup"))
            .optional("screenName", screen_name)
            .optional("userId", user_id);
        self.call(ctx, spec).await
    }

    pub async fn user_by_screen_name_v2(
        &self,
        ctx: &CallContext,
        screen_name: &str,
    ) -> Result<RawJson> {
        let spec =
            RequestSpec::get(endpoint("userByScreenNameV2")).param("screenName", screen_name);
        self.call(ctx, spec).await
    }

    pub async fn user_by_id_v2(&self, ctx: &CallContext, user_id: &str) -> Result<RawJson> {
        // Upstream path is misspelled.
        let spec = RequestSpec::get(endpoint("uerByIdRestIdV2")).param("userId", user_id);
        self.call(ctx, spec).await
    }

    pub async fn users_by_ids_v2<S: AsRef<str>>(
        &self,
        ctx: &CallContext,
        user_ids: &[S],
    ) -> Result<RawJson> {
        let spec =
            RequestSpec::get(endpoint("usersByIdRestIds")).param("userIds", join_ids(user_ids));
        self.call(ctx, spec).await
    }

    /// Analytics for the account behind the configured `auth_token`
    pub async fn account_analytics(&self, ctx: &CallContext) -> Result<RawJson> {
        self.call(ctx, RequestSpec::get(endpoint("accountAnalytics")).user_token())
            .await
    }
}
