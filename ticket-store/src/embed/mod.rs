//! Embedding collaborator seam.
//!
//! Production wiring adapts the llm-service profiles; tests plug in
//! deterministic in-memory embedders.

pub mod noop_embedder;
pub mod profiles;

use crate::errors::StoreError;
use futures::StreamExt;
use futures::stream;
use std::future::Future;
use std::pin::Pin;

pub use noop_embedder::NoopEmbedder;
pub use profiles::ProfilesEmbedder;

/// In-flight requests per batch.
const BATCH_CONCURRENCY: usize = 4;

/// Text-to-vector provider. Dyn-compatible so stores can hold it behind
/// `Arc<dyn EmbeddingsProvider>`.
pub trait EmbeddingsProvider: Send + Sync {
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, StoreError>> + Send + 'a>>;

    /// Embeds a batch with bounded concurrency, preserving input order.
    fn embed_batch<'a>(
        &'a self,
        texts: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Vec<f32>>, StoreError>> + Send + 'a>> {
        Box::pin(async move {
            let futures: Vec<_> = texts.iter().map(|text| self.embed(text)).collect();
            let results: Vec<Result<Vec<f32>, StoreError>> = stream::iter(futures)
                .buffered(BATCH_CONCURRENCY)
                .collect()
                .await;
            results.into_iter().collect()
        })
    }
}
