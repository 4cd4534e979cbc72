//! Retrieval Aggregator: validity gates, per-category fan-out, global
//! top-k merge.
//!
//! This layer is deliberately permissive: blank, too-short, and
//! unknown-category queries log a warning and return no hits instead of
//! failing. The answer boundary in [`crate::chain`] applies the strict
//! version of the same gates.

use crate::collection::ScoredPoint;
use crate::errors::StoreError;
use crate::mappers::restore_metadata;
use crate::record::SearchHit;
use crate::store::{CONTENT_KEY, TicketVectorStore};
use serde_json::Value;
use tracing::{trace, warn};

/// Minimum trimmed query length accepted by both gate layers.
pub const MIN_QUERY_CHARS: usize = 10;

/// Default number of globally merged hits.
pub const DEFAULT_TOP_K: usize = 5;

/// Embeds the query once, fans it out across the selected categories, and
/// merges the hits into a single globally ranked top-k.
pub async fn search(
    store: &TicketVectorStore,
    query: &str,
    support_type: Option<&str>,
    k: usize,
) -> Result<Vec<SearchHit>, StoreError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        warn!("empty query rejected; returning no hits");
        return Ok(Vec::new());
    }
    if trimmed.chars().count() < MIN_QUERY_CHARS {
        warn!("query under {MIN_QUERY_CHARS} chars rejected; returning no hits");
        return Ok(Vec::new());
    }

    let categories: Vec<String> = match support_type {
        Some(requested) => {
            if store.collection(requested).is_none() {
                warn!("support type '{requested}' not present in store; returning no hits");
                return Ok(Vec::new());
            }
            vec![requested.to_string()]
        }
        None => store.support_types(),
    };
    if categories.is_empty() {
        warn!("no collections registered; returning no hits");
        return Ok(Vec::new());
    }

    let query_vector = store.embedder().embed(query).await?;

    let mut hits: Vec<SearchHit> = Vec::new();
    for category in &categories {
        let Some(collection) = store.collection(category) else {
            continue;
        };
        match collection.search(&query_vector, k) {
            Ok(scored) => hits.extend(scored.into_iter().map(to_hit)),
            // One failing category never aborts the others.
            Err(e) => warn!("search failed for category '{category}': {e}"),
        }
    }

    // Global re-rank; sort_by is stable, so ties keep collection order.
    hits.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    hits.truncate(k);
    trace!("search returned {} hits", hits.len());
    Ok(hits)
}

fn to_hit(point: ScoredPoint) -> SearchHit {
    let similarity = point.distance.map_or(0.0, |d| 1.0 - d);
    let mut payload = point.payload;
    let content = match payload.remove(CONTENT_KEY) {
        Some(Value::String(s)) => s,
        _ => String::new(),
    };
    SearchHit {
        content,
        metadata: restore_metadata(&payload),
        similarity,
    }
}
