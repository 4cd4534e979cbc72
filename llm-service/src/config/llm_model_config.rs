use crate::config::llm_provider::LlmProvider;

/// Configuration for one LLM model invocation profile.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// Which backend serves this profile.
    pub provider: LlmProvider,

    /// Model identifier (e.g. `"gpt-4o"`, `"qwen3:14b"`).
    pub model: String,

    /// Inference endpoint (local server or remote API base URL).
    pub endpoint: String,

    /// Optional API key for providers that require authentication.
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature.
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
}
