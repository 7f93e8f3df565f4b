pub mod article;
pub mod client;
pub mod prompt;

pub use article::{ArticleGenerator, GeneratedArticle};
pub use client::LlmClient;
pub use prompt::PersonaSelector;
