//! LLM provider clients behind two logical profiles: **chat** (answer
//! generation) and **embedding**.
//!
//! Construct [`service_profiles::LlmServiceProfiles`] once, wrap it in
//! `Arc`, and pass clones to dependents. Providers (Ollama, OpenAI) are
//! thin non-streaming HTTP clients sharing a unified error type.

pub mod config;
pub mod error_handler;
pub mod service_profiles;
pub mod services;

pub use config::llm_model_config::LlmModelConfig;
pub use config::llm_provider::LlmProvider;
pub use error_handler::LlmError;
pub use service_profiles::LlmServiceProfiles;
