use async_openai::{
    config::{AzureConfig, OpenAIConfig},
    types::{ChatCompletionRequestMessageArgs, CreateChatCompletionRequestArgs},
    Client,
};
use async_trait::async_trait;

use crate::config::{LlmConfig, LlmProvider};
use crate::error::GenerateError;

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}

enum Backend {
    OpenAi(Client<OpenAIConfig>),
    Azure(Client<AzureConfig>),
}

/// Chat-completion client for an OpenAI-compatible endpoint or Azure OpenAI.
/// Without an API key every call fails with [`GenerateError::MissingApiKey`].
pub struct LlmClient {
    backend: Option<Backend>,
    model: String,
}

impl LlmClient {
    pub fn new(config: &LlmConfig) -> Self {
        let backend = config.api_key.as_ref().map(|api_key| match config.provider {
            LlmProvider::OpenAi => {
                let openai = OpenAIConfig::new()
                    .with_api_base(config.api_base.clone())
                    .with_api_key(api_key.clone());
                Backend::OpenAi(Client::with_config(openai))
            }
            LlmProvider::Azure => {
                let azure = AzureConfig::new()
                    .with_api_base(config.api_base.clone())
                    .with_api_key(api_key.clone())
                    .with_api_version(config.azure_api_version.clone().unwrap_or_default())
                    .with_deployment_id(config.model.clone());
                Backend::Azure(Client::with_config(azure))
            }
        });

        if backend.is_none() {
            tracing::warn!("{} is not set, text generation is disabled", config.provider.api_key_var());
        }

        Self {
            backend,
            model: config.model.clone(),
        }
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let backend = self.backend.as_ref().ok_or(GenerateError::MissingApiKey)?;

        let req = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages([ChatCompletionRequestMessageArgs::default()
                .content(prompt)
                .build()?
                .into()])
            .build()?;

        let resp = match backend {
            Backend::OpenAi(client) => client.chat().create(req).await?,
            Backend::Azure(client) => client.chat().create(req).await?,
        };

        resp.choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or(GenerateError::EmptyReply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constant::*;

    #[tokio::test]
    async fn test_missing_api_key_fails_without_network() {
        let client = LlmClient::new(&LlmConfig {
            provider: LlmProvider::OpenAi,
            api_key: None,
            api_base: DEFAULT_LLM_API_BASE.into(),
            model: DEFAULT_LLM_MODEL.into(),
            azure_api_version: None,
        });
        assert!(matches!(
            client.generate("hello").await,
            Err(GenerateError::MissingApiKey)
        ));
    }

    #[tokio::test]
    #[ignore = "needs GOOGLE_API_KEY and network"]
    async fn test_generate_live() {
        crate::setup_env_and_tracing();
        let config = crate::config::Config::from_env().unwrap();
        let client = LlmClient::new(&config.llm);
        let reply = client.generate("Say hi in one word.").await.unwrap();
        tracing::info!("{}", reply);
    }
}
