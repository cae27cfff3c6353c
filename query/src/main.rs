use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use searchcore::tokenizer::normalize_query;
use searchcore::{DocId, EngineConfig, FsStore, Judgments, RankedResult, SearchEngine};
use serde::Serialize;
use std::collections::BTreeSet;
use std::time::Instant;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "query")]
#[command(about = "Rank documents and expand queries against a crawled collection", long_about = None)]
struct Cli {
    /// Directory holding the crawler's `words/` and `documents/`
    #[arg(long, default_value = ".", global = true)]
    data_dir: String,
    /// Optional JSON engine config
    #[arg(long, global = true)]
    config: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Top-k documents for a query
    Search {
        #[arg(long)]
        query: String,
        /// Number of results (config default when omitted)
        #[arg(long)]
        k: Option<usize>,
    },
    /// Expanded query from relevance judgments
    Feedback(FeedbackArgs),
    /// Feedback, then search with the expanded query
    Refine {
        #[command(flatten)]
        judged: FeedbackArgs,
        #[arg(long)]
        k: Option<usize>,
    },
}

#[derive(Args)]
struct FeedbackArgs {
    #[arg(long)]
    query: String,
    /// Comma-separated ids judged relevant
    #[arg(long, value_delimiter = ',')]
    relevant: Vec<DocId>,
    /// Comma-separated ids judged non-relevant
    #[arg(long, value_delimiter = ',')]
    non_relevant: Vec<DocId>,
}

impl FeedbackArgs {
    fn judgments(&self) -> Judgments {
        Judgments {
            relevant: self.relevant.iter().copied().collect::<BTreeSet<_>>(),
            non_relevant: self.non_relevant.iter().copied().collect::<BTreeSet<_>>(),
        }
    }
    fn normalized_query(&self) -> String { normalize_query(&self.query).join(" ") }
}

#[derive(Serialize)]
struct SearchResponse {
    query: String,
    took_s: f64,
    total_hits: usize,
    results: Vec<RankedResult>,
}

#[derive(Serialize)]
struct RefineResponse {
    query: String,
    expanded_query: String,
    took_s: f64,
    results: Vec<RankedResult>,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EngineConfig::load(path).with_context(|| format!("loading config {path}"))?,
        None => EngineConfig::default(),
    };
    let store = FsStore::open(&cli.data_dir).with_context(|| format!("opening store at {}", cli.data_dir))?;
    let engine = SearchEngine::new(store.clone(), store, config);

    let start = Instant::now();
    match cli.command {
        Commands::Search { query, k } => {
            let results = engine.search(&normalize_query(&query), k)?;
            let response = SearchResponse { query, took_s: start.elapsed().as_secs_f64(), total_hits: results.len(), results };
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Commands::Feedback(args) => {
            let judgments = args.judgments();
            let expanded = engine.feedback(&args.normalized_query(), &judgments.relevant, &judgments.non_relevant)?;
            println!("{expanded}");
        }
        Commands::Refine { judged, k } => {
            let refined = engine.refine(&judged.normalized_query(), &judged.judgments(), k)?;
            let response = RefineResponse {
                query: judged.query,
                expanded_query: refined.expanded_query,
                took_s: start.elapsed().as_secs_f64(),
                results: refined.results,
            };
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }
    tracing::debug!(elapsed_s = start.elapsed().as_secs_f64(), "done");
    Ok(())
}
