use std::time::Duration;

use quakemap::{
    run, Feed, MapConfig, MemFeeds, OverlayKind, Stage, EARTHQUAKES, TECTONIC_PLATES,
};

const QUAKES: &str = r#"{
    "type": "FeatureCollection",
    "metadata": { "title": "USGS All Earthquakes, Past Week" },
    "features": [
        { "type": "Feature", "id": "tv01",
          "properties": { "mag": 4.5, "place": "10km N of Testville", "time": 1700000000000 },
          "geometry": { "type": "Point", "coordinates": [-118.25, 34.05, 45.0] } },
        { "type": "Feature", "id": "tv02",
          "properties": { "mag": 0, "place": "Offshore", "time": 1700000001000 },
          "geometry": { "type": "Point", "coordinates": [-125.0, 40.0, 120.5] } },
        { "type": "Feature", "id": "tv03",
          "properties": { "mag": 1.1, "place": "Volcano summit", "time": 1700000002000 },
          "geometry": { "type": "Point", "coordinates": [-155.28, 19.41, -1.2] } }
    ]
}"#;

const PLATES: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        { "type": "Feature", "properties": { "LAYER": "plate boundary", "Name": "AF-AN", "PlateA": "AF", "PlateB": "AN" },
          "geometry": { "type": "LineString", "coordinates": [[-0.4379, -54.8518], [-0.0388, -54.6772], [0.443, -54.4512]] } },
        { "type": "Feature", "properties": { "LAYER": "plate boundary", "Name": "NA-PA" },
          "geometry": { "type": "LineString", "coordinates": [[-124.5, 40.3], [-124.0, 41.0]] } }
    ]
}"#;

fn config() -> MapConfig {
    MapConfig { timeout_secs: Some(5), ..MapConfig::default() }
}

#[tokio::test]
async fn full_run_builds_every_layer_and_control() {
    let feeds = MemFeeds::new().with(Feed::Seismic, QUAKES).with(Feed::Plates, PLATES);
    let outcome = run(&MapConfig::default(), &feeds).await.unwrap();

    assert!(outcome.is_complete());
    assert!(outcome.error.is_none());

    let map = &outcome.map;
    assert_eq!(map.center(), [37.0902, -95.7129]);
    assert_eq!(map.zoom(), 4);
    assert_eq!(map.overlays().len(), 2);
    assert!(map.legend().is_some());

    let control = map.layer_control().expect("layer control");
    let bases: Vec<_> = control.base.iter().map(|(name, _)| name.as_str()).collect();
    let overlays: Vec<_> = control.overlays.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(bases, ["Basemap", "Street"]);
    assert_eq!(overlays, [EARTHQUAKES, TECTONIC_PLATES]);
}

#[tokio::test]
async fn testville_marker_is_styled_from_depth_and_magnitude() {
    let feeds = MemFeeds::new().with(Feed::Seismic, QUAKES).with(Feed::Plates, PLATES);
    let outcome = run(&MapConfig::default(), &feeds).await.unwrap();

    let OverlayKind::Markers { markers } = &outcome.map.overlays()[0].kind else { panic!("expected markers") };
    assert_eq!(markers.len(), 3);

    let testville = &markers[0];
    assert_eq!(testville.center, [34.05, -118.25]);
    assert_eq!(testville.style.fill_color.unwrap().as_str(), "#eecc00");
    assert_eq!(testville.style.radius, Some(18.0));
    assert_eq!(testville.popup.as_deref(), Some("Magnitude: 4.5<br>Location: 10km N of Testville"));

    let offshore = &markers[1];
    assert_eq!(offshore.style.fill_color.unwrap().as_str(), "#ea2c2c");
    assert_eq!(offshore.style.radius, Some(1.0));
    assert_eq!(offshore.popup.as_deref(), Some("Magnitude: 0<br>Location: Offshore"));

    let summit = &markers[2];
    assert_eq!(summit.style.fill_color.unwrap().as_str(), "#98ee00");
}

#[tokio::test]
async fn plate_lines_are_orange() {
    let feeds = MemFeeds::new().with(Feed::Seismic, QUAKES).with(Feed::Plates, PLATES);
    let outcome = run(&MapConfig::default(), &feeds).await.unwrap();

    let OverlayKind::Lines { style, lines } = &outcome.map.overlays()[1].kind else { panic!("expected lines") };
    assert_eq!(style.color.as_str(), "orange");
    assert_eq!(style.weight, 2.0);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1][0], [40.3, -124.5]);
}

#[tokio::test(start_paused = true)]
async fn stalled_plate_feed_never_attaches_control() {
    let feeds = MemFeeds::new().with(Feed::Seismic, QUAKES).stall(Feed::Plates);
    let outcome = run(&config(), &feeds).await.unwrap();

    assert_eq!(outcome.stage, Stage::SeismicReady);
    assert!(outcome.error.unwrap().to_string().contains("timed out"));
    assert!(outcome.map.layer_control().is_none());
    assert!(outcome.map.legend().is_some());
    assert_eq!(outcome.map.overlays().len(), 1);
    assert_eq!(outcome.map.overlays()[0].len(), 3);
}

#[tokio::test(start_paused = true)]
async fn stalled_plate_feed_without_timeout_never_completes() {
    let feeds = MemFeeds::new().with(Feed::Seismic, QUAKES).stall(Feed::Plates);
    let pending = tokio::time::timeout(Duration::from_secs(3600), run(&MapConfig::default(), &feeds)).await;
    assert!(pending.is_err());
}

#[tokio::test]
async fn plates_are_not_fetched_when_seismic_fails() {
    // The plate feed would stall forever if it were ever requested.
    let feeds = MemFeeds::new().stall(Feed::Plates);
    let outcome = run(&MapConfig::default(), &feeds).await.unwrap();

    assert_eq!(outcome.stage, Stage::BasemapReady);
    assert!(outcome.error.is_some());
    assert!(outcome.map.overlays().is_empty());
    assert!(outcome.map.legend().is_none());
    assert!(outcome.map.layer_control().is_none());
}

#[tokio::test]
async fn malformed_plate_feed_keeps_seismic_layer() {
    let feeds = MemFeeds::new().with(Feed::Seismic, QUAKES).with(Feed::Plates, r#"{ "type": "Topology" }"#);
    let outcome = run(&MapConfig::default(), &feeds).await.unwrap();

    assert_eq!(outcome.stage, Stage::SeismicReady);
    assert!(outcome.map.layer_control().is_none());
    assert!(outcome.map.legend().is_some());
}

#[tokio::test]
async fn malformed_quake_aborts_seismic_layer() {
    let quakes = r#"{ "type": "FeatureCollection", "features": [
        { "type": "Feature", "properties": { "mag": 2.0, "place": "ok" },
          "geometry": { "type": "Point", "coordinates": [1.0, 2.0, 3.0] } },
        { "type": "Feature", "properties": { "mag": 2.0, "place": "broken" } }
    ] }"#;
    let feeds = MemFeeds::new().with(Feed::Seismic, quakes).with(Feed::Plates, PLATES);
    let outcome = run(&MapConfig::default(), &feeds).await.unwrap();

    assert_eq!(outcome.stage, Stage::BasemapReady);
    assert!(outcome.map.overlays().is_empty());
    assert!(format!("{:#}", outcome.error.unwrap()).contains("seismic feature 1"));
}
