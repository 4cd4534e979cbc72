//! Adapter from the llm-service embedding profile to the store's
//! provider seam.

use super::EmbeddingsProvider;
use crate::errors::StoreError;
use llm_service::service_profiles::LlmServiceProfiles;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Embeds through the configured llm-service embedding profile.
pub struct ProfilesEmbedder {
    profiles: Arc<LlmServiceProfiles>,
    /// When set, vectors of any other dimension are rejected.
    expected_dim: Option<usize>,
}

impl ProfilesEmbedder {
    pub fn new(profiles: Arc<LlmServiceProfiles>) -> Self {
        Self {
            profiles,
            expected_dim: None,
        }
    }

    pub fn with_expected_dim(mut self, dim: usize) -> Self {
        self.expected_dim = Some(dim);
        self
    }
}

impl EmbeddingsProvider for ProfilesEmbedder {
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, StoreError>> + Send + 'a>> {
        Box::pin(async move {
            let vector = self
                .profiles
                .embed(text)
                .await
                .map_err(|e| StoreError::Embedding(e.to_string()))?;
            if let Some(dim) = self.expected_dim {
                if vector.len() != dim {
                    return Err(StoreError::Embedding(format!(
                        "provider returned dim {}, expected {dim}",
                        vector.len()
                    )));
                }
            }
            Ok(vector)
        })
    }
}
