//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::ClientConfig;
use crate::context::CallContext;
use crate::decode::truncate;
use crate::error::{Result, ResultExt};
use crate::http::Client;
use crate::pagination::NextPage;
use crate::types::{JsonValue, RawJson};
use tracing::{info, warn};

/// Longest cursor shown between pages
const CURSOR_DISPLAY_LIMIT: usize = 50;

/// Profile fields shown in the `user` summary, with their labels
const SUMMARY_FIELDS: [(&str, &str); 5] = [
    ("Name", "name"),
    ("Bio", "description"),
    ("Followers", "followers_count"),
    ("Following", "friends_count"),
    ("Tweets", "statuses_count"),
];

/// Where profile fields sit in the various user payload shapes
const FIELD_PREFIXES: [&str; 6] = [
    "/data/user/result/legacy",
    "/data/user/legacy",
    "/user/result/legacy",
    "/result/legacy",
    "/legacy",
    "/data",
];

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = ClientConfig::load(self.cli.config.as_deref());
        let client = Client::new(config)?;

        let ctx = CallContext::new();
        let on_interrupt = ctx.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, cancelling");
                on_interrupt.cancel();
            }
        });

        match &self.cli.command {
            Commands::User { screen_name } => self.user(&client, &ctx, screen_name).await,
            Commands::Tweets { user_id, max_pages } => {
                self.tweets(&client, &ctx, user_id, *max_pages).await
            }
            Commands::Tweet { tweet_id } => {
                info!("Fetching tweet detail for {tweet_id}");
                print_json(&client.tweet_detail(&ctx, tweet_id, None).await?);
                Ok(())
            }
            Commands::Search { query, search_type } => {
                info!("Searching for '{query}' (type: {search_type})");
                print_json(&client.search(&ctx, query, Some(search_type), None).await?);
                Ok(())
            }
            Commands::Followers { user_id } => {
                info!("Fetching followers for user {user_id}");
                print_json(&client.followers(&ctx, user_id, None).await?);
                Ok(())
            }
            Commands::Followings { user_id } => {
                info!("Fetching followings for user {user_id}");
                print_json(&client.followings(&ctx, user_id, None).await?);
                Ok(())
            }
            Commands::Likes { user_id } => {
                info!("Fetching likes for user {user_id}");
                print_json(&client.user_likes(&ctx, user_id, None).await?);
                Ok(())
            }
            Commands::Trending => {
                info!("Fetching trending topics");
                print_json(&client.trending(&ctx).await?);
                Ok(())
            }
            Commands::TokenSync => {
                print_json(&client.token_sync(&ctx).await?);
                Ok(())
            }
        }
    }

    async fn user(&self, client: &Client, ctx: &CallContext, screen_name: &str) -> Result<()> {
        info!("Fetching user profile for @{screen_name}");
        let raw = client.user_by_screen_name_v2(ctx, screen_name).await?;
        print_json(&raw);

        let value: JsonValue = serde_json::from_str(raw.get()).context("user profile")?;
        println!("\n{}", profile_summary(&value, screen_name));
        Ok(())
    }

    async fn tweets(
        &self,
        client: &Client,
        ctx: &CallContext,
        user_id: &str,
        max_pages: u32,
    ) -> Result<()> {
        info!("Fetching tweets for user {user_id} (max {max_pages} pages)");
        let mut pages = client.user_tweets_pages(user_id, max_pages);

        while let NextPage::Page(page) = pages.next(ctx).await? {
            println!("\n=== Page {} ===", pages.pages_fetched());
            print_json(&page.raw);
            if let Some(cursor) = &page.next_cursor {
                println!("\n[Next cursor: {}]", truncate(cursor, CURSOR_DISPLAY_LIMIT));
            }
        }

        println!("\nTotal pages fetched: {}", pages.pages_fetched());
        Ok(())
    }
}

/// Print JSON indented, or as-is when it does not parse
fn print_json(raw: &RawJson) {
    println!("{}", pretty_json(raw.get()));
}

pub(crate) fn pretty_json(text: &str) -> String {
    serde_json::from_str::<JsonValue>(text)
        .and_then(|value| serde_json::to_string_pretty(&value))
        .unwrap_or_else(|_| text.to_string())
}

/// Look a profile field up at the top level, then under the known nestings
pub(crate) fn find_field(value: &JsonValue, field: &str) -> String {
    let top = value.get(field);
    let nested = || {
        FIELD_PREFIXES
            .iter()
            .find_map(|prefix| value.pointer(&format!("{prefix}/{field}")))
    };
    match top.or_else(nested) {
        Some(JsonValue::String(s)) => s.clone(),
        Some(JsonValue::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

pub(crate) fn profile_summary(value: &JsonValue, screen_name: &str) -> String {
    let mut lines = vec!["--- Summary ---".to_string()];
    for (label, field) in SUMMARY_FIELDS {
        let text = find_field(value, field);
        lines.push(format!("{:<11} {text}", format!("{label}:")));
        if field == "name" {
            lines.push(format!("{:<11} @{screen_name}", "Handle:"));
        }
    }
    lines.join("\n")
}
