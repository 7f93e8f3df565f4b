mod client;
mod config;
mod constant;
mod error;
mod feed;
mod image;
mod llm;
mod pipeline;
mod publisher;
mod router;

use anyhow::Result;

use crate::config::Config;
use crate::feed::syndication::SyndicationFeed;
use crate::llm::{ArticleGenerator, LlmClient, PersonaSelector};
use crate::pipeline::PipelineBuilder;
use crate::publisher::{LogMailer, SmtpMailer};

#[tokio::main]
async fn main() -> Result<()> {
    setup_env_and_tracing();

    let config = Config::from_env()?;
    if config.preflight_check {
        config.preflight()?;
    }

    tracing::debug!(
        "Feed {}, fallback affiliate link {}",
        config.rss_url,
        config.routes.default_url()
    );

    let mut generator =
        ArticleGenerator::new(LlmClient::new(&config.llm)).with_field_defaults(config.parse_field_defaults);
    if config.persona_enabled {
        let personas = match config.persona_seed {
            Some(seed) => PersonaSelector::from_seed(seed),
            None => PersonaSelector::from_entropy(),
        };
        generator = generator.with_personas(personas);
    }

    let builder = PipelineBuilder::new()
        .with_feed(SyndicationFeed::new(config.rss_url.clone(), client::http_client()?))
        .with_routes(config.routes.clone())
        .with_generator(generator);
    let pipeline = if config.send_email {
        builder.with_mailer(SmtpMailer::new(config.smtp.clone()))
    } else {
        builder.with_mailer(LogMailer)
    }
    .build()?;

    match pipeline.run_once().await? {
        Some(report) => tracing::info!(
            "Run finished: {:?} -> {} (category {}, fallback: {}, delivered: {})",
            report.title,
            report.link,
            report.category,
            report.used_fallback,
            report.delivered
        ),
        None => tracing::info!("Run finished without a post"),
    }

    Ok(())
}

pub fn setup_env_and_tracing() {
    dotenv::dotenv().ok();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}
