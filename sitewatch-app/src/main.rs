use std::sync::Arc;

use anyhow::Context as _;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use sitewatch_core::{Config, Context, config::DATA_VAR};
use sitewatch_store::{MemoryApi, Snapshot};
use sitewatch_views::{Console, Route};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load the .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    let data_path = config
        .data_path
        .clone()
        .with_context(|| format!("{DATA_VAR} must point at a dashboard snapshot"))?;

    let snapshot = Snapshot::load(&data_path).await?;
    info!(path = %data_path.display(), sites = snapshot.sites.len(), "snapshot loaded");

    let ctx = Context::new(Arc::new(MemoryApi::new(snapshot)), config);
    let mut console = Console::new(ctx);

    let mut stdout = tokio::io::stdout();
    let home = console.navigate(Route::Home).await?;
    write_block(&mut stdout, &home).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if matches!(line.trim(), "quit" | "exit") {
            break;
        }

        match console.handle_line(&line).await {
            Ok(Some(out)) => write_block(&mut stdout, &out).await?,
            Ok(None) => {}
            Err(source) => {
                error!(?source, "command failed");
                write_block(&mut stdout, &format!("Error: {source:#}")).await?;
            }
        }
    }

    Ok(()) // Return Success, shutdown cleanly
}

async fn write_block(stdout: &mut tokio::io::Stdout, text: &str) -> anyhow::Result<()> {
    stdout.write_all(text.as_bytes()).await?;
    stdout.write_all(b"\n\n").await?;
    stdout.flush().await?;
    Ok(())
}
