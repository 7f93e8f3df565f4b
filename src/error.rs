use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{name} must be a valid {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("Invalid affiliate route table: {0}")]
    Routes(String),
}

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Feed request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Feed returned status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Failed to parse feed as RSS or Atom")]
    Parse,

    #[error("First feed entry has no title")]
    MissingTitle,
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Text generation API key is not configured")]
    MissingApiKey,

    #[error("Text generation request failed: {0}")]
    Request(#[from] async_openai::error::OpenAIError),

    #[error("No content in response from LLM")]
    EmptyReply,

    #[error("No JSON object found in reply")]
    NoJsonObject,

    #[error("Invalid JSON in reply: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Reply JSON is missing field `{0}`")]
    MissingField(&'static str),
}

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("SMTP credentials or recipient are not configured")]
    MissingCredentials,

    #[error("Invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Failed to build email: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP transport failed: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}
