//! Ticket-file discovery: naming conventions and category labels.

use crate::errors::StoreError;
use crate::record::normalize_category;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Source format of a discovered corpus file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TicketFormat {
    Json,
    Xml,
}

/// One discovered corpus file with its derived category.
#[derive(Clone, Debug)]
pub struct TicketFile {
    pub path: PathBuf,
    pub category: String,
    pub format: TicketFormat,
}

/// Scans a directory for `*.json` / `*.xml` ticket dumps.
///
/// The category label is the file stem with a trailing `_tickets` or
/// `_support` marker stripped, then normalized. Files come back in name
/// order so repeated loads see the corpus deterministically.
pub fn discover_ticket_files(dir: &Path) -> Result<Vec<TicketFile>, StoreError> {
    trace!("discovery::discover_ticket_files dir={:?}", dir);

    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .collect();
    paths.sort();

    let mut out = Vec::new();
    for path in paths {
        let format = match path.extension().and_then(|s| s.to_str()) {
            Some("json") => TicketFormat::Json,
            Some("xml") => TicketFormat::Xml,
            _ => continue,
        };
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let category = category_from_stem(stem);
        debug!("discovered {:?} category={category} format={format:?}", path);
        out.push(TicketFile {
            path,
            category,
            format,
        });
    }
    Ok(out)
}

/// Derives the category from a file stem such as
/// `Technical Support_tickets` or `technical_support`.
pub fn category_from_stem(stem: &str) -> String {
    let label = stem
        .strip_suffix("_tickets")
        .or_else(|| stem.strip_suffix("_support"))
        .unwrap_or(stem);
    normalize_category(label)
}
