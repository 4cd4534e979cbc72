//! Interactive front-end: builds or reopens the ticket store, then runs a
//! stdin Q&A loop over the retrieval-augmented answer chain.

use std::io::{BufRead, Write};
use std::sync::Arc;

use anyhow::Context;
use llm_service::LlmServiceProfiles;
use ticket_store::embed::ProfilesEmbedder;
use ticket_store::{CorpusLoader, StoreConfig, SupportRagChain, TicketVectorStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Optional .env file; the environment itself is enough.
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let cfg = StoreConfig::from_env().context("invalid store configuration")?;

    let profiles = Arc::new(LlmServiceProfiles::from_env().context("invalid LLM configuration")?);
    let embedder = Arc::new(ProfilesEmbedder::new(profiles.clone()));

    let store = if has_collections(&cfg.store_dir) {
        info!("reopening existing vector store at {:?}", cfg.store_dir);
        TicketVectorStore::load_local(&cfg.store_dir, embedder)?
    } else {
        info!("building vector store from corpus at {:?}", cfg.data_path);
        let loader = CorpusLoader::new(&cfg.data_path)?;
        let documents = loader.load_tickets()?;
        let mut store = TicketVectorStore::new(&cfg.store_dir, embedder)?;
        store.create_index(&documents).await?;
        store
    };

    let chain = SupportRagChain::new(Arc::new(store), profiles).with_context_k(cfg.top_k);
    run_repl(&chain).await
}

fn has_collections(dir: &std::path::Path) -> bool {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .flatten()
                .any(|e| e.path().extension().and_then(|s| s.to_str()) == Some("jsonl"))
        })
        .unwrap_or(false)
}

/// Reads queries from stdin until EOF. A leading `@category ` restricts
/// retrieval to one support category.
async fn run_repl(chain: &SupportRagChain) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    println!("Ask a support question (prefix with @category to scope it, Ctrl-D to quit).");
    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (category, query) = split_category(line);
        match chain.query(query, category).await {
            Ok(answer) => println!("{answer}\n"),
            // Gate errors are user input problems, not crashes.
            Err(e) => eprintln!("error: {e}\n"),
        }
    }
    Ok(())
}

/// Splits an optional `@category` prefix off a query line.
fn split_category(line: &str) -> (Option<&str>, &str) {
    let Some(rest) = line.strip_prefix('@') else {
        return (None, line);
    };
    match rest.split_once(char::is_whitespace) {
        Some((category, query)) => (Some(category), query.trim_start()),
        None => (Some(rest), ""),
    }
}
