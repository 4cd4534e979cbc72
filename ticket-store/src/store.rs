//! Category Vector Store: one embedded similarity collection per support
//! category, plus the registry tying them together.

use crate::collection::{CategoryCollection, StoredPoint, list_collections};
use crate::embed::EmbeddingsProvider;
use crate::errors::StoreError;
use crate::mappers::prepare_metadata;
use crate::record::{SearchHit, TicketDocument};
use crate::retrieve;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Payload key holding the document content alongside the metadata.
pub(crate) const CONTENT_KEY: &str = "content";

/// Owns the category → collection registry and the embedding collaborator.
///
/// The registry is append-only during [`TicketVectorStore::create_index`]
/// and read-only during queries, so `&self` queries are safe to issue
/// concurrently from multiple callers.
pub struct TicketVectorStore {
    path: PathBuf,
    embedder: Arc<dyn EmbeddingsProvider>,
    collections: BTreeMap<String, CategoryCollection>,
}

impl TicketVectorStore {
    /// Creates an empty store rooted at `path` (created if missing).
    pub fn new(
        path: impl Into<PathBuf>,
        embedder: Arc<dyn EmbeddingsProvider>,
    ) -> Result<Self, StoreError> {
        let path = path.into();
        fs::create_dir_all(&path)?;
        Ok(Self {
            path,
            embedder,
            collections: BTreeMap::new(),
        })
    }

    /// Builds one collection per category: embeds every document's content
    /// in one batch, upserts with `ticket_id` keys, persists. Each category
    /// is written as a unit before the next one starts. Categories with no
    /// documents still register an (empty) collection.
    pub async fn create_index(
        &mut self,
        documents_by_category: &BTreeMap<String, Vec<TicketDocument>>,
    ) -> Result<(), StoreError> {
        let bar = ProgressBar::new(documents_by_category.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("##-"),
        );

        for (category, docs) in documents_by_category {
            bar.set_message(category.clone());
            self.build_category(category, docs).await?;
            bar.inc(1);
        }
        bar.finish_and_clear();

        info!(
            "indexed {} categories under {:?}",
            documents_by_category.len(),
            self.path
        );
        Ok(())
    }

    async fn build_category(
        &mut self,
        category: &str,
        docs: &[TicketDocument],
    ) -> Result<(), StoreError> {
        let collection = self
            .collections
            .entry(category.to_string())
            .or_insert_with(|| CategoryCollection::new(category));

        if !docs.is_empty() {
            let contents: Vec<String> = docs.iter().map(|d| d.content.clone()).collect();
            let vectors = self.embedder.embed_batch(&contents).await?;
            if vectors.len() != docs.len() {
                return Err(StoreError::Embedding(format!(
                    "provider returned {} vectors for {} documents",
                    vectors.len(),
                    docs.len()
                )));
            }

            let mut points = Vec::with_capacity(docs.len());
            for (doc, vector) in docs.iter().zip(vectors) {
                let id = doc
                    .metadata
                    .get("ticket_id")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                let mut payload = prepare_metadata(&doc.metadata);
                payload.insert(CONTENT_KEY.to_string(), Value::String(doc.content.clone()));
                points.push(StoredPoint {
                    id,
                    vector,
                    payload,
                });
            }
            collection.upsert_points(points);
        }

        collection.persist(&self.path)?;
        debug!("collection '{category}' ready ({} points)", collection.len());
        Ok(())
    }

    /// Reopens a persisted store: enumerates existing collections and
    /// rebuilds the registry without the original documents and without
    /// re-embedding anything.
    pub fn load_local(
        path: impl Into<PathBuf>,
        embedder: Arc<dyn EmbeddingsProvider>,
    ) -> Result<Self, StoreError> {
        let path = path.into();
        if !path.is_dir() {
            return Err(StoreError::DataPathNotFound(path));
        }

        let mut store = Self {
            path,
            embedder,
            collections: BTreeMap::new(),
        };
        for name in list_collections(&store.path)? {
            let collection = CategoryCollection::load(&store.path, &name)?;
            store.collections.insert(name, collection);
        }
        info!(
            "reopened store at {:?} with {} collections",
            store.path,
            store.collections.len()
        );
        Ok(store)
    }

    /// Registered category keys.
    pub fn support_types(&self) -> Vec<String> {
        self.collections.keys().cloned().collect()
    }

    pub(crate) fn collection(&self, category: &str) -> Option<&CategoryCollection> {
        self.collections.get(category)
    }

    pub(crate) fn embedder(&self) -> &dyn EmbeddingsProvider {
        self.embedder.as_ref()
    }

    /// Fan-out similarity query. See [`crate::retrieve`] for the permissive
    /// gates and the global merge rule.
    pub async fn query_similar(
        &self,
        query: &str,
        support_type: Option<&str>,
        k: usize,
    ) -> Result<Vec<SearchHit>, StoreError> {
        retrieve::search(self, query, support_type, k).await
    }
}
