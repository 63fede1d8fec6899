use std::path::Path;

use anyhow::{anyhow, Result};
use quakemap::{LocatedFeeds, Outcome, Stage};

use crate::cli::{Cli, OutputFormat, RenderArgs};

pub async fn run(_cli: &Cli, args: &RenderArgs) -> Result<()> {
    let mut config = super::load_config(args.config.as_deref())?;
    if let Some(seismic) = &args.seismic { config.seismic_feed = seismic.clone() }
    if let Some(plates) = &args.plates { config.plates_feed = plates.clone() }
    if args.timeout.is_some() { config.timeout_secs = args.timeout }

    let out_path = args.output.clone().unwrap_or_else(|| match args.format {
        OutputFormat::Html => "./map.html".into(),
        OutputFormat::Svg => "./map.svg".into(),
    });

    let feeds = LocatedFeeds::from_config(&config)?;
    let outcome = quakemap::run(&config, &feeds).await?;

    write_outcome(outcome, args.format, &out_path, args.width, args.force)
}

/// Write whatever loaded, then fail if a stage stopped early.
pub(crate) fn write_outcome(outcome: Outcome, format: OutputFormat, out_path: &Path, width: u32, force: bool) -> Result<()> {
    if let Some(error) = &outcome.error {
        tracing::error!("[render] stopped at {}: {error:#}", outcome.stage);
    }
    if outcome.stage != Stage::PlatesReady {
        tracing::warn!("[render] layer control not attached; writing partial map");
    }

    tracing::info!("[render] writing map to {}", out_path.display());
    match format {
        OutputFormat::Html => outcome.map.to_html(out_path, force)?,
        OutputFormat::Svg => outcome.map.to_svg(out_path, width, force)?,
    }

    match outcome.error {
        Some(error) => Err(anyhow!("[render] map written to {} is incomplete: {error:#}", out_path.display())),
        None => Ok(()),
    }
}
