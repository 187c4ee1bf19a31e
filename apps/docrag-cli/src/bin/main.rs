//! docrag CLI: index a directory of `.txt` files and query it in memory.
//!
//! ```bash
//! docrag index ./data
//! docrag query ./data "escrow shortage" --limit 3 --json
//! docrag query ./data "late fee" --hits
//! docrag embed "loan default"
//! ```
use anyhow::Result;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use docrag_core::config::{resolve_with_base, Config, RetrievalConfig};
use docrag_core::data_processor::DataProcessor;
use docrag_core::traits::ChunkStore;
use docrag_core::types::{IndexReport, RagQuery};
use docrag_embed::{embed, get_default_embedder};
use docrag_hybrid::RetrievalEngine;
use docrag_vector::MemoryStore;

#[derive(Parser)]
#[command(name = "docrag", version, about = "Deterministic hashed-embedding document retrieval")]
struct Cli {
    /// Enable info-level logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Chunk and embed every .txt file under a directory
    Index {
        data_dir: String,
        /// Only load the first N files
        #[arg(long)]
        limit_files: Option<usize>,
    },
    /// Index a directory, then run one query against it
    Query {
        data_dir: String,
        query: String,
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        #[arg(long)]
        loan_id: Option<String>,
        #[arg(long)]
        doc_type: Option<String>,
        /// Print the response as JSON
        #[arg(long)]
        json: bool,
        /// Print raw ranked hits (chunk ids and scores) instead of answers
        #[arg(long)]
        hits: bool,
    },
    /// Print the embedding of a text as JSON
    Embed { text: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "info" } else { "warn" }));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Command::Index { data_dir, limit_files } => {
            let engine = build_engine(&data_dir, limit_files)?;
            let reports = index_with_progress(&engine)?;
            for r in &reports { println!("{}\t{} chunks", r.doc_id, r.chunks); }
            println!("✅ Indexed {} documents into {} chunks", reports.len(), engine.store().chunk_count());
        }
        Command::Query { data_dir, query, limit, loan_id, doc_type, json, hits } => {
            let engine = build_engine(&data_dir, None)?;
            index_with_progress(&engine)?;
            let request = RagQuery { q: query, loan_id, doc_type, limit };
            if hits {
                let found = engine.search(&request);
                if json {
                    println!("{}", serde_json::to_string_pretty(&found)?);
                } else {
                    for h in &found { println!("{:.4}\t{:?}\t{}", h.score, h.source, h.id); }
                }
                return Ok(());
            }
            let response = engine.query(&request);
            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                println!("🔍 Found {} results for: \"{}\" ({:.3}s)", response.total_results, response.query, response.processing_time);
                for (i, a) in response.answers.iter().enumerate() {
                    println!("\n  {}. similarity={:.4}  doc={}  type={}", i + 1, a.similarity, a.doc_id, a.chunk_type.as_deref().unwrap_or("-"));
                    println!("     📝 {}", a.text);
                }
            }
        }
        Command::Embed { text } => println!("{}", serde_json::to_string(&embed(&text))?),
    }
    Ok(())
}

/// `[retrieval]` from config.toml / config.<env>.toml / `APP_*`; missing files mean defaults.
fn retrieval_config() -> Result<RetrievalConfig> {
    Ok(Config::load()?.retrieval()?)
}

fn build_engine(data_dir: &str, limit_files: Option<usize>) -> Result<RetrievalEngine<MemoryStore>> {
    let cwd = std::env::current_dir()?;
    let dir: PathBuf = resolve_with_base(&cwd, data_dir);
    let docs = load(&dir, limit_files)?;
    let engine = RetrievalEngine::new(MemoryStore::with_documents(docs), get_default_embedder(), retrieval_config()?)?;
    Ok(engine)
}

fn load(dir: &Path, limit_files: Option<usize>) -> Result<Vec<docrag_core::types::Document>> {
    let processor = DataProcessor::new();
    match limit_files {
        Some(limit) => processor.load_directory_limited(dir, limit),
        None => processor.load_directory(dir),
    }
}

fn index_with_progress(engine: &RetrievalEngine<MemoryStore>) -> Result<Vec<IndexReport>> {
    let ids = engine.store().document_ids();
    let pb = ProgressBar::new(ids.len() as u64);
    pb.set_style(ProgressStyle::default_bar().template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} documents {msg}")?.progress_chars("#>-"));
    let mut reports = Vec::with_capacity(ids.len());
    for id in ids {
        pb.set_message(id.clone());
        reports.push(engine.index(&id)?);
        pb.inc(1);
    }
    pb.finish_and_clear();
    Ok(reports)
}
