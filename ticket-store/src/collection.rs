//! Embedded per-category similarity collection.
//!
//! Points live in memory keyed by ticket id and persist as one JSON Lines
//! file per collection under the store directory. Search is an exact
//! cosine-distance scan; a collection holds one support category, so the
//! scan stays small.

use crate::errors::StoreError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// One stored point: id, embedding vector, scalar payload.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoredPoint {
    pub id: String,
    pub vector: Vec<f32>,
    pub payload: BTreeMap<String, Value>,
}

/// A search hit before score inversion: payload plus raw distance.
#[derive(Clone, Debug)]
pub struct ScoredPoint {
    /// Cosine distance; `None` when the backing entry had no usable score.
    pub distance: Option<f32>,
    pub payload: BTreeMap<String, Value>,
}

/// One similarity collection scoped to a single category.
pub struct CategoryCollection {
    name: String,
    points: BTreeMap<String, StoredPoint>,
}

impl CategoryCollection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Inserts or replaces points by id.
    pub fn upsert_points(&mut self, points: Vec<StoredPoint>) {
        for point in points {
            self.points.insert(point.id.clone(), point);
        }
    }

    /// Exact nearest-neighbor scan, ascending by distance, truncated to `k`.
    ///
    /// # Errors
    /// [`StoreError::Index`] when a stored vector does not match the query
    /// dimensionality.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<ScoredPoint>, StoreError> {
        let mut hits = Vec::with_capacity(self.points.len());
        for point in self.points.values() {
            if point.vector.len() != query.len() {
                return Err(StoreError::Index(format!(
                    "collection '{}': stored vector dim {} != query dim {}",
                    self.name,
                    point.vector.len(),
                    query.len(),
                )));
            }
            hits.push(ScoredPoint {
                distance: Some(cosine_distance(query, &point.vector)),
                payload: point.payload.clone(),
            });
        }
        hits.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(k);
        Ok(hits)
    }

    /// Writes the collection as one point per line.
    pub fn persist(&self, dir: &Path) -> Result<(), StoreError> {
        let path = collection_path(dir, &self.name);
        let mut writer = BufWriter::new(File::create(&path)?);
        for point in self.points.values() {
            serde_json::to_writer(&mut writer, point)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        debug!(
            "persisted collection '{}' ({} points) to {:?}",
            self.name,
            self.points.len(),
            path
        );
        Ok(())
    }

    /// Reads a persisted collection back. Never re-embeds.
    pub fn load(dir: &Path, name: &str) -> Result<Self, StoreError> {
        let path = collection_path(dir, name);
        let reader = BufReader::new(File::open(&path)?);

        let mut collection = Self::new(name);
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let point: StoredPoint = serde_json::from_str(&line)?;
            collection.points.insert(point.id.clone(), point);
        }
        trace!(
            "loaded collection '{}' ({} points)",
            name,
            collection.points.len()
        );
        Ok(collection)
    }
}

fn collection_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.jsonl"))
}

/// Enumerates the collection names persisted under a store directory.
pub fn list_collections(dir: &Path) -> Result<Vec<String>, StoreError> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|s| s.to_str()) != Some("jsonl") {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            names.push(stem.to_string());
        }
    }
    names.sort();
    Ok(names)
}

/// `1 - cosine_similarity`; zero-norm vectors count as maximally distant.
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }
    1.0 - dot / (norm_a.sqrt() * norm_b.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn point(id: &str, vector: Vec<f32>) -> StoredPoint {
        let mut payload = BTreeMap::new();
        payload.insert("content".to_string(), json!(id));
        StoredPoint {
            id: id.to_string(),
            vector,
            payload,
        }
    }

    #[test]
    fn cosine_distance_basics() {
        assert!(cosine_distance(&[1.0, 0.0], &[1.0, 0.0]).abs() < 1e-6);
        assert!((cosine_distance(&[1.0, 0.0], &[0.0, 1.0]) - 1.0).abs() < 1e-6);
        assert_eq!(cosine_distance(&[0.0, 0.0], &[1.0, 0.0]), 1.0);
    }

    #[test]
    fn search_orders_by_distance_and_truncates() {
        let mut collection = CategoryCollection::new("technical");
        collection.upsert_points(vec![
            point("far", vec![0.0, 1.0]),
            point("near", vec![1.0, 0.0]),
            point("mid", vec![1.0, 1.0]),
        ]);
        let hits = collection.search(&[1.0, 0.0], 2).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].payload["content"], json!("near"));
        assert_eq!(hits[1].payload["content"], json!("mid"));
    }

    #[test]
    fn upsert_replaces_by_id() {
        let mut collection = CategoryCollection::new("technical");
        collection.upsert_points(vec![point("a", vec![1.0, 0.0])]);
        collection.upsert_points(vec![point("a", vec![0.0, 1.0])]);
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn dimension_mismatch_is_an_index_error() {
        let mut collection = CategoryCollection::new("technical");
        collection.upsert_points(vec![point("a", vec![1.0, 0.0, 0.0])]);
        let err = collection.search(&[1.0, 0.0], 1).unwrap_err();
        assert!(matches!(err, StoreError::Index(_)));
    }

    #[test]
    fn persist_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut collection = CategoryCollection::new("technical");
        collection.upsert_points(vec![
            point("a", vec![1.0, 0.0]),
            point("b", vec![0.0, 1.0]),
        ]);
        collection.persist(dir.path()).unwrap();

        let loaded = CategoryCollection::load(dir.path(), "technical").unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(list_collections(dir.path()).unwrap(), vec!["technical"]);
    }
}
