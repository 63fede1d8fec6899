//! Staged construction of a map: basemap, then earthquakes, then plates.
//!
//! Each stage owns the map and the layer registry and hands them to the next
//! stage by value. Only [`PlatesReady`] can attach the layer control, so the
//! control never exists before both overlays do.

use std::{fmt, time::Duration};

use anyhow::{anyhow, Result};
use bytes::Bytes;

use crate::{
    config::MapConfig,
    feed::{Feed, FeedSource, PlateCollection, SeismicCollection},
    map::{build_legend, Control, LayerRegistry, MapView, OverlayId, TileLayer},
    render::{plates_overlay, seismic_overlay},
};

pub const EARTHQUAKES: &str = "Earthquakes";
pub const TECTONIC_PLATES: &str = "Tectonic Plates";

/// Furthest point a pipeline run reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    BasemapReady,
    SeismicReady,
    PlatesReady,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::BasemapReady => "basemap ready",
            Stage::SeismicReady => "seismic ready",
            Stage::PlatesReady => "plates ready",
        })
    }
}

/// A stage transition that failed. The map keeps whatever was already on it.
pub struct StageFailure {
    pub map: MapView,
    pub stage: Stage,
    pub error: anyhow::Error,
}

impl fmt::Debug for StageFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StageFailure").field("stage", &self.stage).field("error", &self.error).finish()
    }
}

/// Map with its base layers; nothing fetched yet.
#[derive(Debug)]
pub struct BasemapReady {
    map: MapView,
    registry: LayerRegistry,
    timeout: Option<Duration>,
}

/// Earthquake overlay and legend on the map.
#[derive(Debug)]
pub struct SeismicReady {
    map: MapView,
    registry: LayerRegistry,
    timeout: Option<Duration>,
    quakes: OverlayId,
}

/// Both overlays on the map and the layer control attached.
#[derive(Debug)]
pub struct PlatesReady {
    map: MapView,
    quakes: OverlayId,
    plates: OverlayId,
}

/// Create the map canvas and register the configured base layers.
pub fn init(config: &MapConfig) -> Result<BasemapReady> {
    config.validate()?;

    let mut map = MapView::new(config.container.clone(), config.center, config.zoom);
    let mut registry = LayerRegistry::new();
    for layer in &config.base_layers {
        let id = map.add_base_layer(TileLayer::from(layer));
        registry.register_base(layer.name.clone(), id);
    }

    tracing::info!("[pipeline] map {:?} centered on {:?} at zoom {}, {} base layers",
        config.container, config.center, config.zoom, config.base_layers.len());

    Ok(BasemapReady { map, registry, timeout: config.timeout() })
}

async fn fetch<S: FeedSource>(source: &S, feed: Feed, timeout: Option<Duration>) -> Result<Bytes> {
    tracing::info!("[pipeline] fetching {feed} feed");
    match timeout {
        Some(limit) => tokio::time::timeout(limit, source.fetch(feed)).await
            .map_err(|_| anyhow!("[pipeline] {feed} feed timed out after {limit:?}"))?,
        None => source.fetch(feed).await,
    }
}

impl BasemapReady {
    pub fn map(&self) -> &MapView { &self.map }

    pub fn into_map(self) -> MapView { self.map }

    /// Fetch the seismic feed, plot it and attach the depth legend.
    pub async fn load_seismic<S: FeedSource>(self, source: &S) -> Result<SeismicReady, StageFailure> {
        let Self { mut map, mut registry, timeout } = self;

        let parsed = match fetch(source, Feed::Seismic, timeout).await {
            Ok(bytes) => SeismicCollection::from_geojson_bytes(&bytes),
            Err(error) => Err(error),
        };
        let collection = match parsed {
            Ok(collection) => collection,
            Err(error) => return Err(StageFailure { map, stage: Stage::BasemapReady, error }),
        };
        tracing::info!("[pipeline] plotting {} earthquakes", collection.len());

        let quakes = map.add_overlay(seismic_overlay(&collection));
        registry.register_overlay(EARTHQUAKES, quakes);
        map.add_control(Control::Legend(build_legend()));

        Ok(SeismicReady { map, registry, timeout, quakes })
    }
}

impl SeismicReady {
    pub fn map(&self) -> &MapView { &self.map }

    pub fn into_map(self) -> MapView { self.map }

    pub fn quakes(&self) -> OverlayId { self.quakes }

    /// Fetch the plate boundaries, plot them and attach the layer control.
    pub async fn load_plates<S: FeedSource>(self, source: &S) -> Result<PlatesReady, StageFailure> {
        let Self { mut map, mut registry, timeout, quakes } = self;

        let parsed = match fetch(source, Feed::Plates, timeout).await {
            Ok(bytes) => PlateCollection::from_geojson_bytes(&bytes),
            Err(error) => Err(error),
        };
        let collection = match parsed {
            Ok(collection) => collection,
            Err(error) => return Err(StageFailure { map, stage: Stage::SeismicReady, error }),
        };
        tracing::info!("[pipeline] plotting {} plate boundaries", collection.len());

        let plates = map.add_overlay(plates_overlay(&collection));
        registry.register_overlay(TECTONIC_PLATES, plates);
        map.add_control(Control::Layers(registry.into_control()));

        Ok(PlatesReady { map, quakes, plates })
    }
}

impl PlatesReady {
    pub fn map(&self) -> &MapView { &self.map }

    pub fn into_map(self) -> MapView { self.map }

    pub fn quakes(&self) -> OverlayId { self.quakes }

    pub fn plates(&self) -> OverlayId { self.plates }
}

/// Result of a full run: the map as far as it got, and what stopped it.
#[derive(Debug)]
pub struct Outcome {
    pub map: MapView,
    pub stage: Stage,
    pub error: Option<anyhow::Error>,
}

impl Outcome {
    pub fn is_complete(&self) -> bool { self.stage == Stage::PlatesReady }
}

impl From<StageFailure> for Outcome {
    fn from(failure: StageFailure) -> Self {
        Self { map: failure.map, stage: failure.stage, error: Some(failure.error) }
    }
}

/// Run every stage in order. Configuration errors are returned directly;
/// fetch and parse errors end the run early and are reported in the [`Outcome`].
pub async fn run<S: FeedSource>(config: &MapConfig, source: &S) -> Result<Outcome> {
    let basemap = init(config)?;

    let seismic = match basemap.load_seismic(source).await {
        Ok(seismic) => seismic,
        Err(failure) => return Ok(failure.into()),
    };

    Ok(match seismic.load_plates(source).await {
        Ok(plates) => Outcome { map: plates.into_map(), stage: Stage::PlatesReady, error: None },
        Err(failure) => failure.into(),
    })
}
