use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use repochunk_engine::{ChunkAssembler, RepositoryRef};
use repochunk_pipeline::{IngestPipeline, LocalCheckoutSource, MemorySink, RepositorySource};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "repochunk")]
#[command(about = "Chunk a repository checkout for vector search", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Chunk a local checkout and print the chunk list as JSON
    Chunk {
        /// Path to the already-fetched checkout
        path: PathBuf,

        /// Repository URL recorded in chunk metadata
        #[arg(long)]
        repo_url: Option<String>,

        /// Branch recorded in chunk metadata
        #[arg(long)]
        branch: Option<String>,

        /// Print run statistics instead of the chunks themselves
        #[arg(long)]
        stats: bool,
    },

    /// Run the full pipeline against the in-memory sink and report stats
    Index {
        /// Path to the already-fetched checkout
        path: PathBuf,

        /// Repository URL used as the purge key
        #[arg(long)]
        repo_url: Option<String>,

        /// Branch recorded in chunk metadata
        #[arg(long)]
        branch: Option<String>,

        /// Sink submission batch size
        #[arg(long, default_value_t = 100)]
        batch_size: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Chunk {
            path,
            repo_url,
            branch,
            stats,
        } => {
            let repository = resolve_repository(&path, repo_url, branch)?;
            let source = LocalCheckoutSource::new(&path, repository.clone())
                .with_context(|| format!("Cannot open checkout at {}", path.display()))?;

            let files = source.collect()?;
            let assembler = ChunkAssembler::new().with_repository(repository);
            let chunks = assembler.process_files(&files);

            if stats {
                let summary = serde_json::json!({
                    "files": files.len(),
                    "chunks": chunks.len(),
                });
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&chunks)?);
            }
        }

        Commands::Index {
            path,
            repo_url,
            branch,
            batch_size,
        } => {
            let repository = resolve_repository(&path, repo_url, branch)?;
            let source = LocalCheckoutSource::new(&path, repository)
                .with_context(|| format!("Cannot open checkout at {}", path.display()))?;

            let pipeline = IngestPipeline::new(MemorySink::new()).with_batch_size(batch_size);
            let run_stats = pipeline.run(&source).await?;
            println!("{}", serde_json::to_string_pretty(&run_stats)?);
        }
    }

    Ok(())
}

/// Build the repository reference from the flags, falling back to the
/// checkout directory name when no URL is given.
fn resolve_repository(
    path: &Path,
    repo_url: Option<String>,
    branch: Option<String>,
) -> Result<RepositoryRef> {
    let mut repository = match repo_url {
        Some(url) => RepositoryRef::parse(url)?,
        None => {
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("checkout")
                .to_string();
            RepositoryRef::new(path.to_string_lossy(), "local", name)
        }
    };

    if let Some(branch) = branch {
        repository = repository.branch(branch);
    }
    Ok(repository)
}

fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if quiet {
        "warn"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level));
    builder.target(env_logger::Target::Stderr).init();
}
