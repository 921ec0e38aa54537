//! `warden` operator console.

mod cli;
mod commands;

use clap::Parser;

use warden_client::{ApiClient, ClientConfig, FileSessionStore, MemorySessionStore, Session};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    warden_observability::init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.api_url {
        config.api_url = url.trim_end_matches('/').to_string();
    }
    let api = ApiClient::from_config(&config);

    match config.session_file {
        Some(path) => {
            tracing::debug!(path = %path.display(), "using session file");
            let mut session = Session::hydrate(FileSessionStore::new(path));
            commands::run(cli.command, &mut session, &api).await
        }
        None => {
            tracing::warn!("no data directory; the session will not outlive this process");
            let mut session = Session::hydrate(MemorySessionStore::new());
            commands::run(cli.command, &mut session, &api).await
        }
    }
}
