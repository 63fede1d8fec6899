pub mod fetch;
pub mod render;

use anyhow::Result;
use quakemap::MapConfig;

/// Load the config file if one was given, then validate it.
pub(crate) fn load_config(path: Option<&std::path::Path>) -> Result<MapConfig> {
    let config = match path {
        Some(path) => MapConfig::from_json_file(path)?,
        None => MapConfig::default(),
    };
    config.validate()?;
    Ok(config)
}
