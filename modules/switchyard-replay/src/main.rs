use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use switchyard_replay::{env_filter, load_config, read_actions, run};

#[derive(Parser)]
#[command(name = "replay", about = "Replay a JSON-lines action log through configured reducers")]
struct Cli {
    /// TOML file describing the counters to combine
    #[arg(long, env = "SWITCHYARD_CONFIG")]
    config: PathBuf,

    /// JSON-lines file with one action per line
    actions: PathBuf,

    /// Pretty-print the summary
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(std::env::var("RUST_LOG").ok().as_deref(), &config.log.filter)?)
        .with_writer(std::io::stderr)
        .init();

    info!(
        config = %cli.config.display(),
        counters = config.counters.len(),
        "Replay starting"
    );

    let actions = read_actions(&cli.actions)?;
    let summary = run(&config, &actions)?;

    let output = if cli.pretty {
        serde_json::to_string_pretty(&summary)?
    } else {
        serde_json::to_string(&summary)?
    };
    println!("{output}");
    Ok(())
}
