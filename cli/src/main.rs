mod session;

use anyhow::{bail, Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use krawl_core::config::{DEFAULT_DOCS_ROOT, DEFAULT_INDEX_FILE, DEFAULT_MAX_RESULTS};
use krawl_core::{Config, IndexStore, SearchEngine};
use krawl_indexer::Indexer;
use session::Session;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "krawl")]
#[command(about = "Index a directory of HTML documents and search them", long_about = None)]
struct Cli {
    /// Directory of documents to index
    #[arg(long, global = true, env = "KRAWL_DOCS_ROOT", default_value = DEFAULT_DOCS_ROOT)]
    docs_root: PathBuf,
    /// Index file to write and read
    #[arg(long, global = true, env = "KRAWL_INDEX_FILE", default_value = DEFAULT_INDEX_FILE)]
    index_file: PathBuf,
    /// Maximum number of results shown per query
    #[arg(long, global = true, env = "KRAWL_MAX_RESULTS", default_value_t = DEFAULT_MAX_RESULTS)]
    max_results: usize,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Build the index from the document root
    Index,
    /// Search the index interactively (enter `q` to quit)
    Search,
}

impl Cli {
    fn config(&self) -> Config {
        Config::default()
            .with_docs_root(&self.docs_root)
            .with_index_file(&self.index_file)
            .with_max_results(self.max_results)
    }
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.print()?;
            return Ok(());
        }
        Err(err) => {
            tracing::debug!(error = %err, "unrecognized arguments");
            return print_usage();
        }
    };
    let config = cli.config();

    match cli.command {
        Some(Commands::Index) => run_index(&config),
        Some(Commands::Search) => run_search(&config),
        None => print_usage(),
    }
}

fn print_usage() -> Result<()> {
    Cli::command().print_help()?;
    Ok(())
}

fn run_index(config: &Config) -> Result<()> {
    let report = Indexer::new(config)
        .run()
        .with_context(|| format!("indexing {} failed", config.docs_root.display()))?;
    println!("total files processed => {}", report.files_processed);
    tracing::info!(
        documents = report.documents_indexed,
        index = %config.index_file.display(),
        "index build complete"
    );
    Ok(())
}

fn run_search(config: &Config) -> Result<()> {
    let store = IndexStore::new(config);
    let engine = match SearchEngine::open(&store, config) {
        Ok(engine) => engine,
        Err(err) if err.is_not_found() => {
            bail!("no index found at {}; run `krawl index` first", store.path().display())
        }
        Err(err) => return Err(err).context("cannot load index"),
    };
    tracing::info!(documents = engine.index().len(), "index loaded");

    let stdin = io::stdin();
    Session::new(&engine).run(stdin.lock(), io::stdout().lock())?;
    Ok(())
}
