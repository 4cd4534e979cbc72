#![allow(dead_code)]

//! Deterministic test doubles: in-memory embedders and completion fakes.

use std::collections::HashMap;
use std::future::Future;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::pin::Pin;
use std::sync::Mutex;

use serde_json::{Value, json};
use ticket_store::chain::CompletionProvider;
use ticket_store::{EmbeddingsProvider, StoreError, TicketDocument};

pub const HASH_DIM: usize = 64;

/// Hashed bag-of-words embedder. Same text always maps to the same
/// L2-normalized vector, and shared vocabulary raises cosine similarity.
pub struct HashEmbedder;

impl EmbeddingsProvider for HashEmbedder {
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, StoreError>> + Send + 'a>> {
        let mut vector = vec![0.0f32; HASH_DIM];
        for token in text
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let mut hasher = DefaultHasher::new();
            token.hash(&mut hasher);
            vector[(hasher.finish() % HASH_DIM as u64) as usize] += 1.0;
        }
        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut vector {
                *x /= norm;
            }
        }
        Box::pin(async move { Ok(vector) })
    }
}

/// Fixed text-to-vector table for tests that need exact similarities.
pub struct TableEmbedder {
    table: HashMap<String, Vec<f32>>,
}

impl TableEmbedder {
    pub fn new(entries: &[(&str, Vec<f32>)]) -> Self {
        Self {
            table: entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        }
    }
}

impl EmbeddingsProvider for TableEmbedder {
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, StoreError>> + Send + 'a>> {
        let result = self
            .table
            .get(text)
            .cloned()
            .ok_or_else(|| StoreError::Embedding(format!("no table entry for '{text}'")));
        Box::pin(async move { result })
    }
}

/// Against a unit query `[1, 0, 0]`, this vector scores exactly
/// `similarity` under cosine.
pub fn unit_vec(similarity: f32) -> Vec<f32> {
    vec![similarity, (1.0 - similarity * similarity).sqrt(), 0.0]
}

/// Records every prompt and returns a canned answer.
pub struct MockCompleter {
    pub prompts: Mutex<Vec<String>>,
    pub answer: String,
}

impl MockCompleter {
    pub fn new(answer: &str) -> Self {
        Self {
            prompts: Mutex::new(Vec::new()),
            answer: answer.to_string(),
        }
    }

    pub fn captured(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl CompletionProvider for MockCompleter {
    fn complete<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, StoreError>> + Send + 'a>> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let answer = self.answer.clone();
        Box::pin(async move { Ok(answer) })
    }
}

/// Always fails, for completion-error propagation tests.
pub struct FailingCompleter;

impl CompletionProvider for FailingCompleter {
    fn complete<'a>(
        &'a self,
        _prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, StoreError>> + Send + 'a>> {
        Box::pin(async {
            Err(StoreError::Completion("upstream unavailable".to_string()))
        })
    }
}

/// Builds a document the way the normalizer would, with the metadata
/// fields retrieval and context assembly rely on.
pub fn doc(ticket_id: &str, support_type: &str, tags: &[&str], content: &str) -> TicketDocument {
    let metadata = [
        ("ticket_id", json!(ticket_id)),
        ("support_type", json!(support_type)),
        ("tags", json!(tags)),
        ("priority", json!("high")),
        ("source", json!("json")),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect::<std::collections::BTreeMap<String, Value>>();

    TicketDocument {
        content: content.to_string(),
        metadata,
    }
}
