pub mod syndication;

use async_trait::async_trait;

use crate::error::FeedError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    pub summary: String,
}

impl FeedEntry {
    pub fn new(title: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            summary: summary.into(),
        }
    }
}

#[async_trait]
pub trait Feed: Send + Sync {
    /// First entry of the feed, `None` when the feed has no entries.
    async fn fetch_latest(&self) -> Result<Option<FeedEntry>, FeedError>;
    fn source(&self) -> &str;
}
