//! Internship Watcher — Binary Entrypoint
//! Runs one fetch → diff → notify → persist pass and exits. Scheduling is
//! left to cron or any other periodic invoker.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use internship_watcher::config::Config;
use internship_watcher::notify::{discord::DiscordApi, Dispatcher};
use internship_watcher::pipeline;
use internship_watcher::snapshot::SnapshotStore;
use internship_watcher::source::GitFetcher;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("internship_watcher=info,warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when variables come from the real env.
    let _ = dotenvy::dotenv();
    init_tracing();

    // Required config must be present before any network activity.
    let cfg = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    };

    let fetcher = GitFetcher::new(cfg.repo_url.clone(), cfg.local_repo_path.clone());
    let api = DiscordApi::new(cfg.token.clone());
    let mut dispatcher = Dispatcher::new(api, &cfg.channel_ids, cfg.send_delay);
    let store = SnapshotStore::new(cfg.snapshot_path.clone());

    pipeline::run(&cfg, &fetcher, &mut dispatcher, &store).await?;

    tracing::info!("run complete");
    Ok(())
}
