//! Corpus Loader: per-file normalization with failure isolation and a
//! global ticket-id uniqueness gate.

use crate::discovery::{TicketFormat, discover_ticket_files};
use crate::errors::StoreError;
use crate::normalize::normalize_ticket;
use crate::raw::RawTicket;
use crate::record::TicketDocument;
use crate::xml::read_ticket_file;
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Loads and normalizes every ticket dump under one data directory.
#[derive(Debug)]
pub struct CorpusLoader {
    data_path: PathBuf,
}

impl CorpusLoader {
    /// # Errors
    /// [`StoreError::DataPathNotFound`] if the path is missing or not a
    /// directory. Checked here, before any file scanning.
    pub fn new(data_path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_path = data_path.into();
        if !data_path.is_dir() {
            return Err(StoreError::DataPathNotFound(data_path));
        }
        Ok(Self { data_path })
    }

    /// Loads every discovered ticket file, grouped by category.
    ///
    /// Failure isolation is per file: a malformed JSON file registers its
    /// category but contributes nothing; a malformed XML file is dropped
    /// entirely. Other files of the same category still contribute.
    ///
    /// # Errors
    /// [`StoreError::DuplicateTicketId`] if any ticket id repeats anywhere
    /// in the corpus; the corpus is not returned in that case.
    pub fn load_tickets(&self) -> Result<BTreeMap<String, Vec<TicketDocument>>, StoreError> {
        let files = discover_ticket_files(&self.data_path)?;
        let mut by_category: BTreeMap<String, Vec<TicketDocument>> = BTreeMap::new();

        for file in &files {
            match file.format {
                TicketFormat::Json => {
                    let docs = by_category.entry(file.category.clone()).or_default();
                    match load_json_file(&file.path, &file.category) {
                        Ok(mut loaded) => docs.append(&mut loaded),
                        Err(e) => warn!("skipping malformed JSON file {:?}: {e}", file.path),
                    }
                }
                TicketFormat::Xml => match load_xml_file(&file.path, &file.category) {
                    Ok(loaded) => by_category
                        .entry(file.category.clone())
                        .or_default()
                        .extend(loaded),
                    Err(e) => warn!("dropping malformed XML file {:?}: {e}", file.path),
                },
            }
        }

        validate_unique_ids(&by_category)?;
        info!(
            "loaded {} categories from {:?}",
            by_category.len(),
            self.data_path
        );
        Ok(by_category)
    }
}

fn load_json_file(path: &Path, category: &str) -> Result<Vec<TicketDocument>, StoreError> {
    let text = fs::read_to_string(path)?;
    let records: Vec<Value> = serde_json::from_str(&text)?;

    let mut docs = Vec::with_capacity(records.len());
    for record in records {
        match record {
            Value::Object(map) => docs.push(normalize_ticket(&RawTicket::Json(map), category)?),
            other => warn!("skipping non-object JSON record in {:?}: {other}", path),
        }
    }
    Ok(docs)
}

fn load_xml_file(path: &Path, category: &str) -> Result<Vec<TicketDocument>, StoreError> {
    read_ticket_file(path)?
        .into_iter()
        .map(|ticket| normalize_ticket(&RawTicket::Xml(ticket), category))
        .collect()
}

/// Ticket ids must be unique across the entire corpus, not per category.
fn validate_unique_ids(
    by_category: &BTreeMap<String, Vec<TicketDocument>>,
) -> Result<(), StoreError> {
    let mut seen = HashSet::new();
    for docs in by_category.values() {
        for doc in docs {
            let id = doc
                .metadata
                .get("ticket_id")
                .and_then(Value::as_str)
                .unwrap_or_default();
            if !seen.insert(id.to_string()) {
                return Err(StoreError::DuplicateTicketId(id.to_string()));
            }
        }
    }
    Ok(())
}
