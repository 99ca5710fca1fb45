//! HTTP clients for the two upstream video platforms.
//!
//! Both clients normalize third-party responses into the shared
//! [`creatordb_core::creators`] shapes. Their public search/details methods
//! never fail: any transport or parse error is logged and degrades to an
//! empty list or `None`, so an upstream outage shows up as missing results
//! rather than a failed request.

mod error;
pub mod twitch;
pub mod types;
pub mod youtube;

pub use error::PlatformError;
pub use twitch::TwitchClient;
pub use youtube::YouTubeClient;
