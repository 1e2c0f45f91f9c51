//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Fetch social-network data through the uTools API
#[derive(Parser, Debug)]
#[command(name = "xcatch")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Configuration is read from xcatch.yaml (or -c FILE) and \
    XCATCH_* environment variables, which take precedence.")]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Get a user profile by screen name
    User {
        /// Screen name, without the @
        screen_name: String,
    },

    /// Get a user's tweets
    Tweets {
        user_id: String,

        /// Pages to fetch
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        max_pages: u32,
    },

    /// Get a tweet with its replies
    Tweet { tweet_id: String },

    /// Search tweets
    Search {
        query: String,

        /// Result tab: Latest, Top, People, Photos or Videos
        #[arg(long = "type", default_value = "Latest")]
        search_type: String,
    },

    /// Get a user's followers (first page)
    Followers { user_id: String },

    /// Get the accounts a user follows (first page)
    Followings { user_id: String },

    /// Get a user's liked tweets (first page)
    Likes { user_id: String },

    /// Get current trending topics
    Trending,

    /// Ask the upstream to refresh its token
    TokenSync,
}
