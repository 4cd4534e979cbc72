//! Support-ticket RAG core: corpus normalization and per-category vector
//! retrieval.
//!
//! The pipeline: raw JSON/XML ticket dumps → [`CorpusLoader`] → canonical
//! [`TicketDocument`]s grouped by support category → [`TicketVectorStore`]
//! (one similarity collection per category) → fan-out retrieval with a
//! global top-k merge → [`SupportRagChain`] (context assembly + completion
//! call).
//!
//! The design is flat (no deep nesting) and splits responsibilities into
//! focused modules.

mod collection;
mod config;
mod discovery;
mod errors;
mod loader;
mod mappers;
mod normalize;
mod raw;
mod record;
mod retrieve;
mod store;
mod xml;

pub mod chain;
pub mod embed;

pub use chain::{CONTEXT_K, CompletionProvider, SupportRagChain, prepare_context};
pub use config::StoreConfig;
pub use discovery::{TicketFile, TicketFormat};
pub use embed::EmbeddingsProvider;
pub use errors::StoreError;
pub use loader::CorpusLoader;
pub use mappers::{prepare_metadata, restore_metadata};
pub use normalize::normalize_ticket;
pub use raw::RawTicket;
pub use record::{SearchHit, TicketDocument, normalize_category};
pub use retrieve::{DEFAULT_TOP_K, MIN_QUERY_CHARS};
pub use store::TicketVectorStore;
