use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use tft_stats::{
    config::ClientConfig, init_tracing, matches_in_set, secrets::load_api_key, Context, TftClient,
};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "tft-stats", version, about = "Query the Teamfight Tactics API")]
struct Cli {
    /// Configuration file (YAML); defaults are used when absent
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Give up after this many seconds
    #[arg(long)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Look up a summoner
    Summoner { platform: String, name: String },
    /// Ranked standing of a summoner
    League { platform: String, name: String },
    /// Most recent match ids of a summoner
    Matches {
        platform: String,
        name: String,
        #[arg(long, default_value_t = 20)]
        count: u32,
    },
    /// One full match record
    Match { region: String, match_id: String },
    /// All ranked matches of a summoner in one set
    Set {
        platform: String,
        name: String,
        set: i32,
    },
}

#[tokio::main]
async fn main() {
    init_tracing();
    tft_stats::metrics::describe_metrics();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => ClientConfig::from_file(path)?,
        None => ClientConfig::default(),
    };

    let api_key = load_api_key(&config.credentials)?;
    let client = TftClient::new(&config, api_key)?;

    let ctx = match cli.timeout {
        Some(secs) => Context::background().with_timeout(Duration::from_secs(secs)),
        None => Context::background(),
    };

    match cli.command {
        Command::Summoner { platform, name } => {
            let summoner = client.summoner_by_name(&ctx, &platform, &name).await?;
            print_json(&summoner)?;
        }
        Command::League { platform, name } => {
            let summoner = client.summoner_by_name(&ctx, &platform, &name).await?;
            let league = client.league(&ctx, &summoner).await?;
            print_json(&league)?;
        }
        Command::Matches {
            platform,
            name,
            count,
        } => {
            let summoner = client.summoner_by_name(&ctx, &platform, &name).await?;
            let ids = client.matches(&ctx, &summoner, count).await?;
            print_json(&ids)?;
        }
        Command::Match { region, match_id } => {
            let m = client.get_match(&ctx, &region, &match_id).await?;
            print_json(&m)?;
        }
        Command::Set {
            platform,
            name,
            set,
        } => {
            let summoner = client.summoner_by_name(&ctx, &platform, &name).await?;
            let result = matches_in_set(&ctx, &client, &summoner, set).await?;
            info!(matches = result.matches.len(), "Set scan finished");
            print_json(&result.matches)?;

            if let Some(failures) = result.failures {
                for (id, err) in failures.failures() {
                    eprintln!("failed to fetch {}: {}", id, err);
                }
                anyhow::bail!("{} match(es) could not be fetched", failures.len());
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
