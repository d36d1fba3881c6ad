use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::Context;
use clap::Parser;
use mimalloc::MiMalloc;
use station_summary::{format_summary, summarize, Config};
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[command(name = "station-summary")]
#[command(about = "Per-station min/mean/max temperatures from a `<station>;<temperature>` file")]
#[command(version)]
struct Cli {
    /// Measurements file, one `<station>;<temperature>` record per line
    path: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let cli = Cli::parse();
    let config = Config::new(cli.path);
    tracing::debug!(?config, "starting");

    let table = summarize(&config)
        .await
        .with_context(|| format!("failed to summarize {}", config.path.display()))?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(format_summary(&table).as_bytes())?;
    stdout.flush()?;
    Ok(())
}
