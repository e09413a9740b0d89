use anyhow::Result;
use clap::{Parser, Subcommand};
use pitchmatch_common::{logger, AppConfig};
use pitchmatch_server::ProposalStore;
use pitchmatch_vector::{Ranker, Tokenizer, TokenizerOptions};
use std::path::PathBuf;

/// Find project root by looking for .git directory
fn find_project_root() -> Option<PathBuf> {
    let mut current_dir = std::env::current_dir().ok()?;

    loop {
        if current_dir.join(".git").exists() {
            return Some(current_dir);
        }

        if !current_dir.pop() {
            break;
        }
    }

    None
}

/// Load .env file from project root
fn load_dotenv_from_project_root() {
    if let Some(root) = find_project_root() {
        let env_path = root.join(".env");
        if env_path.exists() {
            dotenv::from_path(&env_path).ok();
        }
    } else {
        dotenv::dotenv().ok();
    }
}

#[derive(Parser)]
#[command(name = "pitchmatch")]
#[command(about = "PitchMatch - proposal matching and generation service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long)]
        port: Option<u16>,

        /// Proposal store file
        #[arg(long)]
        store: Option<String>,
    },

    /// Rank stored proposals against a job description and print the scores
    Match {
        /// Job description text
        job_description: String,

        /// Number of proposals to print
        #[arg(long, default_value = "3")]
        top_k: usize,

        /// Proposal store file
        #[arg(long)]
        store: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // AppConfig::from_env() loads .env too, but CLI overrides below must win
    load_dotenv_from_project_root();

    match cli.command {
        Some(Commands::Serve { host, port, store }) => {
            if let Some(host) = &host {
                std::env::set_var("SERVER_HOST", host);
            }
            if let Some(port) = port {
                std::env::set_var("PORT", port.to_string());
            }
            if let Some(store) = &store {
                std::env::set_var("PROPOSAL_STORE", store);
            }

            serve().await?;
        }
        Some(Commands::Match {
            job_description,
            top_k,
            store,
        }) => {
            if let Some(store) = &store {
                std::env::set_var("PROPOSAL_STORE", store);
            }

            let config = AppConfig::from_env()?;
            logger::setup_console_logging(&config.log_level)?;

            run_match(&config, &job_description, top_k).await?;
        }
        None => serve().await?,
    }

    Ok(())
}

async fn serve() -> Result<()> {
    let config = AppConfig::from_env()?;
    logger::setup_logging(&config.log_dir, &config.log_level)?;

    tracing::info!("PitchMatch starting...");
    tracing::info!("Configuration loaded:");
    tracing::info!("  Address: {}", config.server_bind_address());
    tracing::info!("  Proposal store: {}", config.proposal_store_path.display());
    tracing::info!("  Sample count: {}", config.sample_count);

    println!("Server listening on http://{}", config.server_bind_address());

    pitchmatch_server::start_server(config).await?;
    Ok(())
}

async fn run_match(config: &AppConfig, job_description: &str, top_k: usize) -> Result<()> {
    let store = ProposalStore::new(&config.proposal_store_path);
    let proposals = store.load().await?;

    let ranker = Ranker::new(Tokenizer::new(TokenizerOptions {
        remove_stopwords: config.tokenizer_stopwords,
        stem: config.tokenizer_stemming,
    }));
    let ranked = ranker.rank(job_description, &proposals)?;

    for result in ranked.iter().take(top_k) {
        println!(
            "{:>3}  {:.4}  {}",
            result.position, result.score, result.document.name
        );
    }

    Ok(())
}
