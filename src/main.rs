use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{error, info};

use riot_ingest::app::{MatchArchive, RiotIngestUseCase};
use riot_ingest::common::constants::Endpoints;
use riot_ingest::config::Config;
use riot_ingest::infra::{InMemoryMatchStore, ReqwestHttp};
use riot_ingest::observability::{self, metrics};
use riot_ingest::status::RpcStatus;

#[derive(Parser)]
#[command(name = "riot_ingest")]
#[command(about = "Fetch and normalize Valorant match and content data")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to the TOML config file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the upstream base URL from the config
    #[arg(long)]
    base_url: Option<String>,

    /// Print Prometheus metrics to stderr when done
    #[arg(long)]
    metrics: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch one match and print the normalized record
    Match {
        match_id: String,
    },
    /// Fetch the content catalog
    Content,
    /// Look up an account by Riot id
    Account {
        game_name: String,
        tag_line: String,
    },
    /// List recent matches for a player
    Matchlist {
        puuid: String,
    },
    /// Fetch the ranked leaderboard for an act
    Leaderboard {
        act_id: String,
    },
    /// Fetch matches, store them in memory, then read each one back
    Archive {
        /// Match ids (comma-separated)
        #[arg(long)]
        matches: String,
    },
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn aborted(status: RpcStatus) -> anyhow::Error {
    error!("RPC aborted: code={} ({}) detail={}", status.code, status.code.as_i32(), status.detail);
    anyhow::Error::new(status)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(base_url) = cli.base_url {
        config.riot.base_url = base_url;
    }

    let _log_guard = observability::init_logging(&config.logging.dir);
    if cli.metrics {
        metrics::init()?;
    }

    let api_key = config.riot.resolve_api_key()?;
    let http = Arc::new(ReqwestHttp::new(config.riot.timeout())?);
    let endpoints = Endpoints::new(&config.riot.base_url);
    info!("Using upstream {}", endpoints.base_url());
    let ingest = Arc::new(RiotIngestUseCase::new(http, endpoints, api_key));

    match cli.command {
        Commands::Match { match_id } => {
            let record = ingest.get_match_data(&match_id).await.map_err(aborted)?;
            print_json(&record)?;
        }
        Commands::Content => {
            let catalog = ingest.get_content_data().await.map_err(aborted)?;
            print_json(&catalog)?;
        }
        Commands::Account { game_name, tag_line } => {
            let account = ingest
                .get_account_by_riot_id(&game_name, &tag_line)
                .await
                .map_err(aborted)?;
            print_json(&account)?;
        }
        Commands::Matchlist { puuid } => {
            let history = ingest.get_player_matches(&puuid).await.map_err(aborted)?;
            print_json(&history)?;
        }
        Commands::Leaderboard { act_id } => {
            let leaderboard = ingest.get_leaderboard(&act_id).await.map_err(aborted)?;
            print_json(&leaderboard)?;
        }
        Commands::Archive { matches } => {
            let store = Arc::new(InMemoryMatchStore::new());
            let archive = MatchArchive::new(ingest.clone(), store.clone());
            for match_id in matches.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                archive.archive(match_id).await?;
                let stored = archive.find(match_id).await?;
                info!("Match {} stored={}", match_id, stored.is_some());
            }
            info!("Archive holds {} matches", store.len());
        }
    }

    if let Some(rendered) = metrics::render() {
        eprintln!("{}", rendered);
    }

    Ok(())
}
