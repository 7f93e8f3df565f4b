use std::str::FromStr;

use crate::constant::*;
use crate::error::ConfigError;
use crate::router::AffiliateRoutes;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    OpenAi,
    Azure,
}

impl LlmProvider {
    pub fn api_key_var(&self) -> &'static str {
        match self {
            LlmProvider::OpenAi => "GOOGLE_API_KEY",
            LlmProvider::Azure => "AZURE_OPENAI_API_KEY",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: LlmProvider,
    pub api_key: Option<String>,
    /// OpenAI-compatible API base, or the Azure endpoint.
    pub api_base: String,
    /// Model name, or the Azure deployment id.
    pub model: String,
    pub azure_api_version: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Address that publishes whatever it receives to the blog.
    pub recipient: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    // Feed configuration
    pub rss_url: String,

    // Text generation configuration
    pub llm: LlmConfig,

    // Mail configuration
    pub smtp: SmtpConfig,
    pub send_email: bool,

    // Affiliate links
    pub routes: AffiliateRoutes,

    // Generation behaviour
    pub persona_enabled: bool,
    pub persona_seed: Option<u64>,
    pub parse_field_defaults: bool,

    // Abort before any network call when credentials are missing
    pub preflight_check: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable source. Empty values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let rss_url = var("RSS_URL").unwrap_or_else(|| DEFAULT_RSS_URL.into());

        let provider = match var("LLM_PROVIDER").as_deref() {
            None | Some("openai") => LlmProvider::OpenAi,
            Some("azure") => LlmProvider::Azure,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "LLM_PROVIDER",
                    expected: "provider (openai or azure)",
                    value: other.to_string(),
                })
            }
        };
        let llm = match provider {
            LlmProvider::OpenAi => LlmConfig {
                provider,
                api_key: var("GOOGLE_API_KEY"),
                api_base: var("LLM_API_BASE").unwrap_or_else(|| DEFAULT_LLM_API_BASE.into()),
                model: var("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.into()),
                azure_api_version: None,
            },
            LlmProvider::Azure => LlmConfig {
                provider,
                api_key: var("AZURE_OPENAI_API_KEY"),
                api_base: var("AZURE_OPENAI_ENDPOINT")
                    .ok_or(ConfigError::Missing("AZURE_OPENAI_ENDPOINT"))?,
                model: var("LLM_MODEL").ok_or(ConfigError::Missing("LLM_MODEL"))?,
                azure_api_version: Some(
                    var("AZURE_OPENAI_API_VERSION")
                        .ok_or(ConfigError::Missing("AZURE_OPENAI_API_VERSION"))?,
                ),
            },
        };

        let smtp = SmtpConfig {
            host: var("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.into()),
            port: parse_or("SMTP_PORT", var("SMTP_PORT"), DEFAULT_SMTP_PORT, "port number")?,
            username: var("GMAIL_USER"),
            password: var("GMAIL_APP_PASSWORD"),
            recipient: var("BLOGGER_EMAIL"),
        };

        let routes = match var("AFFILIATE_LINKS") {
            Some(table) => AffiliateRoutes::parse(&table)?,
            None => AffiliateRoutes::default(),
        };

        let persona_seed = var("PERSONA_SEED")
            .map(|seed| parse_value("PERSONA_SEED", seed, "u64"))
            .transpose()?;

        Ok(Config {
            rss_url,
            llm,
            smtp,
            send_email: parse_bool("SEND_EMAIL", var("SEND_EMAIL"), true)?,
            routes,
            persona_enabled: parse_bool("PERSONA_ENABLED", var("PERSONA_ENABLED"), false)?,
            persona_seed,
            parse_field_defaults: parse_bool(
                "PARSE_FIELD_DEFAULTS",
                var("PARSE_FIELD_DEFAULTS"),
                true,
            )?,
            preflight_check: parse_bool("PREFLIGHT_CHECK", var("PREFLIGHT_CHECK"), true)?,
        })
    }

    /// Fails on the first required credential that is missing. Mail
    /// credentials are only required when email sending is enabled.
    pub fn preflight(&self) -> Result<(), ConfigError> {
        if self.llm.api_key.is_none() {
            return Err(ConfigError::Missing(self.llm.provider.api_key_var()));
        }
        if !self.send_email {
            return Ok(());
        }
        if self.smtp.username.is_none() {
            return Err(ConfigError::Missing("GMAIL_USER"));
        }
        if self.smtp.password.is_none() {
            return Err(ConfigError::Missing("GMAIL_APP_PASSWORD"));
        }
        if self.smtp.recipient.is_none() {
            return Err(ConfigError::Missing("BLOGGER_EMAIL"));
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(
    name: &'static str,
    value: String,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match value.trim().parse() {
        Ok(parsed) => Ok(parsed),
        Err(_) => Err(ConfigError::Invalid {
            name,
            expected,
            value,
        }),
    }
}

fn parse_or<T: FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match value {
        Some(value) => parse_value(name, value, expected),
        None => Ok(default),
    }
}

fn parse_bool(name: &'static str, value: Option<String>, default: bool) -> Result<bool, ConfigError> {
    let Some(value) = value else {
        return Ok(default);
    };
    match value.trim() {
        "1" | "true" | "True" | "TRUE" | "yes" => Ok(true),
        "0" | "false" | "False" | "FALSE" | "no" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            expected: "boolean",
            value,
        }),
    }
}
