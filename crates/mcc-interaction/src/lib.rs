//! Remote agent platform access: invocation client, activity feed, and the
//! per-session activity tracker.

pub mod activity_feed;
pub mod agent_client;
pub mod config;
pub mod tracker;

pub use activity_feed::{ActivityFeed, FeedPage, HttpActivityFeed};
pub use agent_client::AgentInvocationClient;
pub use config::AgentPlatformConfig;
pub use tracker::SessionActivityTracker;
