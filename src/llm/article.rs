use serde::Deserialize;

use super::client::TextGenerator;
use super::prompt::{ArticlePrompt, PersonaSelector};
use crate::constant::*;
use crate::error::GenerateError;
use crate::feed::FeedEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArticle {
    pub category: String,
    pub html_body: String,
}

impl GeneratedArticle {
    /// Unstyled stand-in used whenever generation fails.
    pub fn fallback(summary: &str, link: &str) -> Self {
        Self {
            category: FALLBACK_CATEGORY.to_string(),
            html_body: fallback_body(summary, link),
        }
    }
}

fn fallback_body(summary: &str, link: &str) -> String {
    format!(r#"<p>{summary}</p><a href="{link}">{FALLBACK_LINK_TEXT}</a>"#)
}

#[derive(Debug, Deserialize)]
struct ReplyPayload {
    category: Option<String>,
    html_body: Option<String>,
}

/// Pulls the `{...}` object out of a free-form model reply. Code fences are
/// stripped and everything outside the first `{` and the last `}` is
/// ignored. With `field_defaults` a missing `category` becomes the default
/// category and a missing `html_body` becomes the fallback body.
pub fn parse_reply(
    reply: &str,
    field_defaults: bool,
    summary: &str,
    link: &str,
) -> Result<GeneratedArticle, GenerateError> {
    let text = reply.replace("```json", "").replace("```", "");
    let text = text.trim();

    let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) else {
        return Err(GenerateError::NoJsonObject);
    };
    if end < start {
        return Err(GenerateError::NoJsonObject);
    }

    let payload: ReplyPayload = serde_json::from_str(&text[start..=end])?;

    let category = match payload.category {
        Some(category) => category,
        None if field_defaults => DEFAULT_CATEGORY.to_string(),
        None => return Err(GenerateError::MissingField("category")),
    };
    let html_body = match payload.html_body {
        Some(html_body) => html_body,
        None if field_defaults => fallback_body(summary, link),
        None => return Err(GenerateError::MissingField("html_body")),
    };

    Ok(GeneratedArticle {
        category,
        html_body,
    })
}

pub struct ArticleGenerator {
    generator: Box<dyn TextGenerator>,
    personas: Option<PersonaSelector>,
    field_defaults: bool,
}

impl ArticleGenerator {
    pub fn new(generator: impl TextGenerator + 'static) -> Self {
        Self {
            generator: Box::new(generator),
            personas: None,
            field_defaults: true,
        }
    }

    pub fn with_personas(mut self, personas: PersonaSelector) -> Self {
        self.personas = Some(personas);
        self
    }

    pub fn with_field_defaults(mut self, field_defaults: bool) -> Self {
        self.field_defaults = field_defaults;
        self
    }

    pub async fn generate(
        &self,
        entry: &FeedEntry,
        link: &str,
    ) -> Result<GeneratedArticle, GenerateError> {
        let persona = match &self.personas {
            Some(personas) => Some(personas.pick().await),
            None => None,
        };
        if let Some(persona) = persona {
            tracing::info!("Writing as persona {:?}", persona);
        }

        let prompt = ArticlePrompt::new(&entry.title, &entry.summary, link)
            .with_persona(persona)
            .build();
        let reply = self.generator.generate(&prompt).await?;
        tracing::debug!("LLM reply: {}", reply);

        parse_reply(&reply, self.field_defaults, &entry.summary, link)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::*;

    /// Replays a fixed reply (or a request failure) and records prompts.
    #[derive(Clone)]
    pub struct FakeGenerator {
        reply: Option<String>,
        pub prompts: Arc<Mutex<Vec<String>>>,
    }

    impl FakeGenerator {
        pub fn replying(reply: &str) -> Self {
            Self {
                reply: Some(reply.to_string()),
                prompts: Default::default(),
            }
        }

        pub fn failing() -> Self {
            Self {
                reply: None,
                prompts: Default::default(),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for FakeGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.reply {
                Some(reply) => Ok(reply.clone()),
                None => Err(GenerateError::Request(
                    async_openai::error::OpenAIError::InvalidArgument("connection reset".into()),
                )),
            }
        }
    }

    const LINK: &str = "https://aff.example/d";

    #[test]
    fn test_parse_fenced_reply_with_prose() {
        let reply = "Sure! Here is your article:\n```json\n{\"category\": \"育兒日記\", \"html_body\": \"<h2>寶寶睡眠</h2><p>{重點}</p>\"}\n```\nHope it helps.";
        let article = parse_reply(reply, false, "s", LINK).unwrap();
        assert_eq!(article.category, "育兒日記");
        assert_eq!(article.html_body, "<h2>寶寶睡眠</h2><p>{重點}</p>");
    }

    #[test]
    fn test_parse_reply_without_braces() {
        assert!(matches!(
            parse_reply("I cannot help with that.", true, "s", LINK),
            Err(GenerateError::NoJsonObject)
        ));
        assert!(matches!(
            parse_reply("} backwards {", true, "s", LINK),
            Err(GenerateError::NoJsonObject)
        ));
    }

    #[test]
    fn test_parse_malformed_json() {
        assert!(matches!(
            parse_reply("{\"category\": \"x\", html_body}", true, "s", LINK),
            Err(GenerateError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_missing_fields_with_defaults() {
        let article = parse_reply("{\"html_body\": \"<p>hi</p>\"}", true, "s", LINK).unwrap();
        assert_eq!(article.category, DEFAULT_CATEGORY);

        let article = parse_reply("{\"category\": \"寶寶健康\"}", true, "summary", LINK).unwrap();
        assert_eq!(article.category, "寶寶健康");
        assert_eq!(article.html_body, GeneratedArticle::fallback("summary", LINK).html_body);
    }

    #[test]
    fn test_missing_fields_without_defaults() {
        assert!(matches!(
            parse_reply("{\"html_body\": \"<p>hi</p>\"}", false, "s", LINK),
            Err(GenerateError::MissingField("category"))
        ));
        assert!(matches!(
            parse_reply("{\"category\": \"x\"}", false, "s", LINK),
            Err(GenerateError::MissingField("html_body"))
        ));
    }

    #[test]
    fn test_fallback_article() {
        let article = GeneratedArticle::fallback("diaper advice", LINK);
        assert_eq!(article.category, "育兒快訊");
        assert!(article.html_body.starts_with("<p>diaper advice</p>"));
        assert!(article.html_body.contains(r#"<a href="https://aff.example/d">"#));
    }

    #[tokio::test]
    async fn test_generate_sends_prompt_and_parses_reply() {
        let fake = FakeGenerator::replying(r#"{"category": "寶寶健康", "html_body": "<p>ok</p>"}"#);
        let generator = ArticleGenerator::new(fake.clone());
        let entry = FeedEntry::new("Baby sleep tips", "diaper advice");

        let article = generator.generate(&entry, LINK).await.unwrap();
        assert_eq!(article.category, "寶寶健康");
        assert_eq!(article.html_body, "<p>ok</p>");

        let prompts = fake.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Baby sleep tips"));
        assert!(prompts[0].contains(LINK));
    }

    #[tokio::test]
    async fn test_generate_with_seeded_persona() {
        let fake = FakeGenerator::replying(r#"{"category": "c", "html_body": "b"}"#);
        let generator = ArticleGenerator::new(fake.clone()).with_personas(PersonaSelector::from_seed(3));
        let expected = PersonaSelector::from_seed(3).pick().await;

        generator
            .generate(&FeedEntry::new("t", "s"), LINK)
            .await
            .unwrap();
        assert!(fake.prompts.lock().unwrap()[0].contains(expected.description()));
    }

    #[tokio::test]
    async fn test_generate_propagates_request_failure() {
        let generator = ArticleGenerator::new(FakeGenerator::failing());
        let result = generator.generate(&FeedEntry::new("t", "s"), LINK).await;
        assert!(matches!(result, Err(GenerateError::Request(_))));
    }
}
