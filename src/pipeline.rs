// src/pipeline.rs
use anyhow::Result;
use chrono::Utc;

use crate::config::Config;
use crate::detector;
use crate::format;
use crate::notify::{ChannelSender, Dispatcher};
use crate::snapshot::SnapshotStore;
use crate::source::{self, SourceFetcher};

/// One full pass: refresh the source, diff against the snapshot, notify,
/// persist. Cadence lives outside the process (cron); the binary exits
/// after this returns.
pub async fn run<F, S>(
    cfg: &Config,
    fetcher: &F,
    dispatcher: &mut Dispatcher<S>,
    store: &SnapshotStore,
) -> Result<()>
where
    F: SourceFetcher,
    S: ChannelSender + 'static,
{
    fetcher.refresh().await?;

    let current = source::load_listings(&cfg.listings_path()).await?;
    let previous = store.load().await?;
    if previous.is_empty() {
        tracing::info!("no previous snapshot found");
    }

    let new_roles = detector::detect_new(&previous, &current);
    tracing::info!(
        new = new_roles.len(),
        total = current.len(),
        "change detection finished"
    );

    let posted_at = Utc::now();
    for listing in &new_roles {
        tracing::info!(
            company = %listing.company_name,
            title = %listing.title,
            "new listing"
        );
        let message = format::new_listing_message(listing, posted_at);
        dispatcher.dispatch(&message).await;
    }

    #[cfg(feature = "deactivation-alerts")]
    {
        let gone = detector::detect_deactivated(&previous, &current);
        for listing in &gone {
            tracing::info!(
                company = %listing.company_name,
                title = %listing.title,
                "listing deactivated"
            );
            let message = format::deactivation_message(listing, posted_at);
            dispatcher.dispatch(&message).await;
        }
    }

    // The snapshot always becomes the full current dataset, even when
    // nothing was new or some channels failed.
    store.save(&current).await?;
    Ok(())
}
