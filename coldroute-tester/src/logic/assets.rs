use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use coldroute_game::{CargoCatalog, EngineConfig, NetworkConfig, RouteNetwork};

/// Network, catalog, and engine tuning shared by every journey in a run.
#[derive(Debug, Clone)]
pub struct TesterAssets {
    pub network: RouteNetwork,
    pub catalog: CargoCatalog,
    pub engine: EngineConfig,
}

impl TesterAssets {
    /// Bundled ten-city map, built-in catalog, and default tuning.
    pub fn load_default() -> Self {
        Self {
            network: RouteNetwork::reference(),
            catalog: CargoCatalog::default_config(),
            engine: EngineConfig::default(),
        }
    }

    /// Load assets, replacing the map and engine tuning from JSON files when
    /// paths are given.
    pub fn load(map: Option<&Path>, engine: Option<&Path>) -> Result<Self> {
        let mut assets = Self::load_default();
        if let Some(path) = map {
            let config = NetworkConfig::from_json(&read(path)?)
                .with_context(|| format!("invalid network map {}", path.display()))?;
            assets.network = RouteNetwork::from_config(&config)
                .with_context(|| format!("invalid network map {}", path.display()))?;
        }
        if let Some(path) = engine {
            assets.engine = EngineConfig::from_json(&read(path)?)
                .with_context(|| format!("invalid engine config {}", path.display()))?;
        }
        Ok(assets)
    }

    /// Override the search depth, keeping the rest of the tuning.
    pub fn with_search_depth(mut self, depth: Option<u32>) -> Result<Self> {
        if let Some(depth) = depth {
            self.engine.search_depth = depth;
            self.engine
                .validate()
                .context("invalid --depth")?;
        }
        Ok(self)
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_the_reference_map() {
        let assets = TesterAssets::load_default();
        assert_eq!(assets.network.location_count(), 10);
        assert!(assets.catalog.find("milk").is_some());
        assert_eq!(assets.engine.search_depth, 2);
    }

    #[test]
    fn missing_files_and_bad_depth_are_errors() {
        assert!(TesterAssets::load(Some(Path::new("/nonexistent/map.json")), None).is_err());
        assert!(TesterAssets::load_default().with_search_depth(Some(0)).is_err());
        let deeper = TesterAssets::load_default()
            .with_search_depth(Some(3))
            .unwrap();
        assert_eq!(deeper.engine.search_depth, 3);
    }
}
