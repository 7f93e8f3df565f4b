use async_trait::async_trait;

use super::{Feed, FeedEntry};
use crate::error::FeedError;

/// RSS 2.0 or Atom feed over HTTP. Only the first entry is ever read.
pub struct SyndicationFeed {
    url: String,
    client: reqwest::Client,
}

impl SyndicationFeed {
    pub fn new(url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }
}

#[async_trait]
impl Feed for SyndicationFeed {
    fn source(&self) -> &str {
        &self.url
    }

    async fn fetch_latest(&self) -> Result<Option<FeedEntry>, FeedError> {
        let response = self.client.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(FeedError::Status {
                status: response.status().as_u16(),
                url: self.url.clone(),
            });
        }

        let content = response.bytes().await?;
        tracing::debug!("Fetched {} bytes from {}", content.len(), self.url);
        parse_first_entry(&content)
    }
}

/// Tries RSS first, then Atom.
pub fn parse_first_entry(content: &[u8]) -> Result<Option<FeedEntry>, FeedError> {
    if let Ok(channel) = rss::Channel::read_from(content) {
        let Some(item) = channel.items().first() else {
            return Ok(None);
        };
        let title = item.title().ok_or(FeedError::MissingTitle)?;
        let summary = item.description().unwrap_or_default();
        return Ok(Some(FeedEntry::new(title, summary)));
    }

    if let Ok(feed) = atom_syndication::Feed::read_from(content) {
        let Some(entry) = feed.entries().first() else {
            return Ok(None);
        };
        let summary = entry
            .summary()
            .map(|s| s.as_str())
            .or_else(|| entry.content().and_then(|c| c.value()))
            .unwrap_or_default();
        return Ok(Some(FeedEntry::new(entry.title().as_str(), summary)));
    }

    Err(FeedError::Parse)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Parenting news</title>
    <link>https://news.example</link>
    <description>Latest</description>
    <item>
      <title>Baby sleep tips</title>
      <description>diaper advice</description>
    </item>
    <item>
      <title>Second story</title>
      <description>ignored</description>
    </item>
  </channel>
</rss>"#;

    const ATOM: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Parenting blog</title>
  <id>urn:uuid:60a76c80-d399-11d9-b93C-0003939e0af6</id>
  <updated>2024-01-01T00:00:00Z</updated>
  <entry>
    <title>Toddler toy guide</title>
    <id>urn:uuid:1225c695-cfb8-4ebb-aaaa-80da344efa6a</id>
    <updated>2024-01-01T00:00:00Z</updated>
    <summary>Picking safe toys</summary>
  </entry>
</feed>"#;

    #[test]
    fn test_parse_rss_first_item() {
        let entry = parse_first_entry(RSS.as_bytes()).unwrap().unwrap();
        assert_eq!(entry, FeedEntry::new("Baby sleep tips", "diaper advice"));
    }

    #[test]
    fn test_parse_rss_missing_description() {
        let xml = RSS.replace("<description>diaper advice</description>", "");
        let entry = parse_first_entry(xml.as_bytes()).unwrap().unwrap();
        assert_eq!(entry.summary, "");
    }

    #[test]
    fn test_parse_rss_without_items() {
        let xml = r#"<rss version="2.0"><channel><title>t</title><link>l</link><description>d</description></channel></rss>"#;
        assert!(parse_first_entry(xml.as_bytes()).unwrap().is_none());
    }

    #[test]
    fn test_parse_atom_first_entry() {
        let entry = parse_first_entry(ATOM.as_bytes()).unwrap().unwrap();
        assert_eq!(entry, FeedEntry::new("Toddler toy guide", "Picking safe toys"));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(
            parse_first_entry(b"<html>not a feed</html>"),
            Err(FeedError::Parse)
        ));
    }

    #[tokio::test]
    #[ignore = "hits the network"]
    async fn test_fetch_google_news() {
        let client = crate::client::http_client().unwrap();
        let feed = SyndicationFeed::new(crate::constant::DEFAULT_RSS_URL, client);
        let entry = feed.fetch_latest().await.unwrap();
        println!("{:?}", entry);
    }
}
