//! CLI module
//!
//! # Commands
//!
//! - `user` - Profile by screen name, with a short summary
//! - `tweets` - A user's tweets, page by page
//! - `tweet` - A tweet and its replies
//! - `search` - Tweet search
//! - `followers` / `followings` / `likes` - First page of each list
//! - `trending` - Trending topics
//! - `token-sync` - Upstream token refresh

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
