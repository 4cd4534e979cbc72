//! Answer Composer: strict query gates, context assembly, and the
//! completion call.
//!
//! Unlike the retrieval layer, this boundary rejects bad input with
//! errors. The exact messages are part of the public contract.

use crate::errors::StoreError;
use crate::record::SearchHit;
use crate::retrieve::MIN_QUERY_CHARS;
use crate::store::TicketVectorStore;
use llm_service::service_profiles::LlmServiceProfiles;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::debug;

/// Default number of hits folded into the prompt context.
pub const CONTEXT_K: usize = 3;

const EMPTY_CONTEXT: &str = "No relevant support tickets found.";

/// Completion collaborator seam. Implemented by [`LlmServiceProfiles`]
/// for production and by in-memory fakes in tests.
pub trait CompletionProvider: Send + Sync {
    fn complete<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, StoreError>> + Send + 'a>>;
}

impl CompletionProvider for LlmServiceProfiles {
    fn complete<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, StoreError>> + Send + 'a>> {
        Box::pin(async move {
            self.generate(prompt, None)
                .await
                .map_err(|e| StoreError::Completion(e.to_string()))
        })
    }
}

/// Retrieval-augmented answer chain over a [`TicketVectorStore`].
pub struct SupportRagChain {
    store: Arc<TicketVectorStore>,
    llm: Arc<dyn CompletionProvider>,
    context_k: usize,
}

impl SupportRagChain {
    pub fn new(store: Arc<TicketVectorStore>, llm: Arc<dyn CompletionProvider>) -> Self {
        Self {
            store,
            llm,
            context_k: CONTEXT_K,
        }
    }

    /// Overrides how many hits [`SupportRagChain::query`] folds into the
    /// prompt context.
    pub fn with_context_k(mut self, k: usize) -> Self {
        self.context_k = k;
        self
    }

    /// Retrieves the documents that would back an answer to `query`.
    ///
    /// # Errors
    /// [`StoreError::EmptyQuery`] / [`StoreError::QueryTooShort`] on the
    /// strict gates; retrieval errors propagate.
    pub async fn get_relevant_documents(
        &self,
        query: &str,
        support_type: Option<&str>,
        k: usize,
    ) -> Result<Vec<SearchHit>, StoreError> {
        validate_query(query)?;
        self.store.query_similar(query, support_type, k).await
    }

    /// Answers a support query with retrieval-augmented generation.
    ///
    /// Completion errors propagate as-is; there is no retry and no
    /// fallback answer.
    pub async fn query(
        &self,
        query: &str,
        support_type: Option<&str>,
    ) -> Result<String, StoreError> {
        let hits = self
            .get_relevant_documents(query, support_type, self.context_k)
            .await?;
        let context = prepare_context(&hits);
        debug!("composed context from {} hits", hits.len());

        let prompt = format!(
            "You are a customer support assistant. Answer the question using \
             only the support ticket context below. If the context does not \
             contain the answer, say that you do not know.\n\n\
             Context:\n{context}\n\n\
             Question: {query}\n\n\
             Answer:"
        );
        self.llm.complete(&prompt).await
    }
}

fn validate_query(query: &str) -> Result<(), StoreError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(StoreError::EmptyQuery);
    }
    if trimmed.chars().count() < MIN_QUERY_CHARS {
        return Err(StoreError::QueryTooShort);
    }
    Ok(())
}

/// Formats ranked hits into the prompt context, one block per hit.
pub fn prepare_context(hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return EMPTY_CONTEXT.to_string();
    }

    hits.iter()
        .enumerate()
        .map(|(i, hit)| {
            let support_type = hit
                .metadata
                .get("support_type")
                .and_then(Value::as_str)
                .unwrap_or("Unknown");
            let tags = hit
                .metadata
                .get("tags")
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .filter_map(Value::as_str)
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .unwrap_or_default();
            format!(
                "Ticket {}:\nSupport Type: {}\nTags: {}\nContent: {}",
                i + 1,
                support_type,
                tags,
                hit.content
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
