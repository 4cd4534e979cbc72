//! Placeholder embedder for wiring that has no provider configured yet.

use super::EmbeddingsProvider;
use crate::errors::StoreError;
use std::future::Future;
use std::pin::Pin;

/// Always fails. Useful as a stand-in when reopening a persisted store
/// for read-only inspection paths that never embed.
pub struct NoopEmbedder;

impl EmbeddingsProvider for NoopEmbedder {
    fn embed<'a>(
        &'a self,
        _text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, StoreError>> + Send + 'a>> {
        Box::pin(async {
            Err(StoreError::Embedding(
                "no embeddings provider configured".to_string(),
            ))
        })
    }
}
