//! Typed configuration for the ingestion/retrieval pipeline.

use crate::chain::CONTEXT_K;
use crate::errors::StoreError;
use std::path::PathBuf;

/// Pipeline configuration. Built from the environment by the binary,
/// or directly in code and tests.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding the raw JSON/XML ticket dumps.
    pub data_path: PathBuf,
    /// Directory where collections are persisted.
    pub store_dir: PathBuf,
    /// Hits folded into each answer prompt.
    pub top_k: usize,
}

impl StoreConfig {
    /// Reads `DATA_PATH` (default `data`), `VECTOR_STORE_DIR` (default
    /// `vector_store`) and `TOP_K` (default 3) from the environment.
    pub fn from_env() -> Result<Self, StoreError> {
        let data_path = env_or("DATA_PATH", "data");
        let store_dir = env_or("VECTOR_STORE_DIR", "vector_store");
        let top_k = match std::env::var("TOP_K") {
            Ok(v) if !v.trim().is_empty() => v
                .trim()
                .parse::<usize>()
                .map_err(|_| StoreError::Config(format!("TOP_K must be a positive integer, got '{v}'")))?,
            _ => CONTEXT_K,
        };

        let cfg = Self {
            data_path: PathBuf::from(data_path),
            store_dir: PathBuf::from(store_dir),
            top_k,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        if self.top_k == 0 {
            return Err(StoreError::Config("top_k must be at least 1".to_string()));
        }
        Ok(())
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
