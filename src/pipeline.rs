use anyhow::Result;

use crate::feed::Feed;
use crate::image::image_html;
use crate::llm::{ArticleGenerator, GeneratedArticle};
use crate::publisher::{EmailMessage, Mailer};
use crate::router::AffiliateRoutes;

/// What one run did with the first feed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub title: String,
    pub link: String,
    pub category: String,
    pub used_fallback: bool,
    pub delivered: bool,
}

pub struct Pipeline {
    feed: Box<dyn Feed>,
    routes: AffiliateRoutes,
    generator: ArticleGenerator,
    mailer: Box<dyn Mailer>,
}

impl Pipeline {
    /// Processes the first entry of the feed. Feed failures abort the run;
    /// generation failures fall back to an unstyled article and send
    /// failures are logged, neither fails the run.
    pub async fn run_once(&self) -> Result<Option<RunReport>> {
        tracing::info!("Fetching feed {}", self.feed.source());
        let Some(entry) = self.feed.fetch_latest().await? else {
            tracing::info!("Feed has no entries, nothing to post");
            return Ok(None);
        };
        tracing::info!("📄 {}", entry.title);

        let link = self.routes.route(&entry.title, &entry.summary).to_string();
        tracing::info!("Affiliate link: {}", link);

        let image = image_html(&entry.title);

        let (article, used_fallback) = match self.generator.generate(&entry, &link).await {
            Ok(article) => (article, false),
            Err(e) => {
                tracing::warn!("Failed to generate article, using fallback: {}", e);
                (GeneratedArticle::fallback(&entry.summary, &link), true)
            }
        };
        tracing::info!("Category: {}", article.category);

        let message = EmailMessage::new(
            entry.title.clone(),
            article.category.clone(),
            format!("{image}{}", article.html_body),
        );
        let delivered = match self.mailer.send(&message).await {
            Ok(()) => {
                tracing::info!("✅ Sent {:?}", message.full_subject());
                true
            }
            Err(e) => {
                tracing::error!("Failed to send email: {}", e);
                false
            }
        };

        Ok(Some(RunReport {
            title: entry.title,
            link,
            category: article.category,
            used_fallback,
            delivered,
        }))
    }
}

pub struct PipelineBuilder {
    feed: Option<Box<dyn Feed>>,
    routes: AffiliateRoutes,
    generator: Option<ArticleGenerator>,
    mailer: Option<Box<dyn Mailer>>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            feed: None,
            routes: AffiliateRoutes::default(),
            generator: None,
            mailer: None,
        }
    }

    pub fn build(self) -> Result<Pipeline> {
        Ok(Pipeline {
            feed: self.feed.ok_or_else(|| anyhow::anyhow!("Pipeline needs a feed"))?,
            routes: self.routes,
            generator: self
                .generator
                .ok_or_else(|| anyhow::anyhow!("Pipeline needs an article generator"))?,
            mailer: self.mailer.ok_or_else(|| anyhow::anyhow!("Pipeline needs a mailer"))?,
        })
    }

    pub fn with_feed(mut self, feed: impl Feed + 'static) -> Self {
        self.feed = Some(Box::new(feed));
        self
    }

    pub fn with_routes(mut self, routes: AffiliateRoutes) -> Self {
        self.routes = routes;
        self
    }

    pub fn with_generator(mut self, generator: ArticleGenerator) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn with_mailer(mut self, mailer: impl Mailer + 'static) -> Self {
        self.mailer = Some(Box::new(mailer));
        self
    }
}
