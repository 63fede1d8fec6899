use std::path::PathBuf;

use anyhow::{anyhow, Result};
use quakemap::{write_atomic, Feed, FeedSource, LocatedFeeds, PlateCollection, SeismicCollection};

use crate::cli::{Cli, FetchArgs};

pub async fn run(_cli: &Cli, args: &FetchArgs) -> Result<()> {
    let config = super::load_config(args.config.as_deref())?;
    let timeout = args.timeout.or(config.timeout_secs).map(std::time::Duration::from_secs);
    let out_dir: PathBuf = args.output.clone().unwrap_or_else(|| ".".into());
    let feeds = LocatedFeeds::from_config(&config)?;

    // Same order as rendering: plates only after the seismic feed succeeded.
    for feed in [Feed::Seismic, Feed::Plates] {
        let location = feeds.location(feed);
        tracing::info!("[fetch] {location} -> {}", out_dir.join(feed.file_name()).display());

        let bytes = match timeout {
            Some(limit) => tokio::time::timeout(limit, feeds.fetch(feed)).await
                .map_err(|_| anyhow!("[fetch] {feed} feed timed out after {limit:?}"))??,
            None => feeds.fetch(feed).await?,
        };

        // Refuse to save something the renderer could not use.
        let count = match feed {
            Feed::Seismic => SeismicCollection::from_geojson_bytes(&bytes)?.len(),
            Feed::Plates => PlateCollection::from_geojson_bytes(&bytes)?.len(),
        };

        write_atomic(&out_dir.join(feed.file_name()), &bytes, args.force)?;
        println!("[fetch] saved {count} {feed} features to {}", out_dir.join(feed.file_name()).display());
    }

    Ok(())
}
