//! Default LLM configs loaded strictly from environment variables.
//!
//! Two roles are supported:
//!
//! - **Chat**      → answer generation
//! - **Embedding** → vector computation
//!
//! # Environment variables
//!
//! Common:
//! - `LLM_PROVIDER`   = `ollama` (default) or `openai`
//! - `LLM_MODEL`      = chat model (required)
//! - `EMBEDDING_MODEL` = embedding model (required)
//! - `LLM_MAX_TOKENS` = optional max tokens (u32)
//! - `LLM_TIMEOUT_SECS` = optional per-request timeout (u64)
//!
//! Provider-specific:
//! - `LLM_ENDPOINT`   = endpoint base URL; defaults to
//!   `http://localhost:11434` for Ollama and `https://api.openai.com`
//!   for OpenAI
//! - `OPENAI_API_KEY` = required when the provider is OpenAI

use crate::config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
use crate::error_handler::{ConfigError, LlmError, env_opt_u32, env_opt_u64, must_env};

/// Resolves the provider from `LLM_PROVIDER` (default Ollama).
///
/// # Errors
/// [`ConfigError::UnsupportedProvider`] for unrecognized values.
pub fn provider_from_env() -> Result<LlmProvider, LlmError> {
    match std::env::var("LLM_PROVIDER") {
        Ok(v) if !v.trim().is_empty() => match v.trim().to_ascii_lowercase().as_str() {
            "ollama" => Ok(LlmProvider::Ollama),
            "openai" => Ok(LlmProvider::OpenAI),
            other => Err(ConfigError::UnsupportedProvider(other.to_string()).into()),
        },
        _ => Ok(LlmProvider::Ollama),
    }
}

fn endpoint_for(provider: LlmProvider) -> String {
    if let Ok(url) = std::env::var("LLM_ENDPOINT") {
        if !url.trim().is_empty() {
            return url;
        }
    }
    match provider {
        LlmProvider::Ollama => "http://localhost:11434".to_string(),
        LlmProvider::OpenAI => "https://api.openai.com".to_string(),
    }
}

fn api_key_for(provider: LlmProvider) -> Result<Option<String>, LlmError> {
    match provider {
        LlmProvider::Ollama => Ok(None),
        LlmProvider::OpenAI => Ok(Some(must_env("OPENAI_API_KEY")?)),
    }
}

/// Constructs the **chat** profile config from the environment.
///
/// # Defaults
/// - `temperature = Some(0.7)`
/// - `top_p = Some(0.9)`
/// - `timeout_secs = Some(120)` unless `LLM_TIMEOUT_SECS` is set
pub fn config_chat() -> Result<LlmModelConfig, LlmError> {
    let provider = provider_from_env()?;
    let endpoint = endpoint_for(provider);
    let model = must_env("LLM_MODEL")?;
    let api_key = api_key_for(provider)?;
    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?;
    let timeout_secs = env_opt_u64("LLM_TIMEOUT_SECS")?.or(Some(120));

    Ok(LlmModelConfig {
        provider,
        model,
        endpoint,
        api_key,
        max_tokens,
        temperature: Some(0.7),
        top_p: Some(0.9),
        timeout_secs,
    })
}

/// Constructs the **embedding** profile config from the environment.
///
/// # Defaults
/// - `temperature = Some(0.0)` (deterministic)
/// - `max_tokens = None`
/// - `timeout_secs = Some(30)` unless `LLM_TIMEOUT_SECS` is set
pub fn config_embedding() -> Result<LlmModelConfig, LlmError> {
    let provider = provider_from_env()?;
    let endpoint = endpoint_for(provider);
    let model = must_env("EMBEDDING_MODEL")?;
    let api_key = api_key_for(provider)?;
    let timeout_secs = env_opt_u64("LLM_TIMEOUT_SECS")?.or(Some(30));

    Ok(LlmModelConfig {
        provider,
        model,
        endpoint,
        api_key,
        max_tokens: None,
        temperature: Some(0.0),
        top_p: None,
        timeout_secs,
    })
}
