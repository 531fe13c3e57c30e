use crate::error::{PlotError, PlotResult};
use crate::plot::types::{ClassOrder, DEFAULT_POINT_SIZE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Marker size in pixels.
    pub point_size: u32,
    /// Draw grid lines and axis titles.
    pub show_grid: bool,
    /// How distinct labels are ordered into classes.
    pub class_order: ClassOrder,
    /// Number of generated palettes kept per plotter.
    pub palette_cache_capacity: usize,
    /// PNG output size in pixels.
    pub width: u32,
    pub height: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            point_size: DEFAULT_POINT_SIZE,
            show_grid: true,
            class_order: ClassOrder::FirstOccurrence,
            palette_cache_capacity: 16,
            width: 800,
            height: 600,
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> PlotResult<Self> {
        toml::from_str(content).map_err(|e| PlotError::Config(e.to_string()))
    }
}

/// Get or create the config directory (~/.config/classplot/).
pub fn config_dir() -> Option<PathBuf> {
    let dir = dirs::config_dir()?.join("classplot");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir)
}

/// Path to the config file.
pub fn config_path() -> Option<PathBuf> {
    Some(config_dir()?.join("config.toml"))
}

/// Load config from disk, returning defaults if file doesn't exist or is invalid.
pub fn load_config() -> Config {
    let path = match config_path() {
        Some(p) => p,
        None => return Config::default(),
    };
    load_config_from(&path)
}

/// Load config from `path`. A missing file is created with the defaults.
pub fn load_config_from(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(content) => Config::from_toml_str(&content).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "ignoring invalid config");
            Config::default()
        }),
        Err(_) => {
            // Create default config file on first run
            let config = Config::default();
            if let Err(e) = write_default_config(path, &config) {
                debug!(path = %path.display(), error = %e, "could not write default config");
            }
            config
        }
    }
}

/// Write a default config file with comments.
fn write_default_config(path: &Path, config: &Config) -> PlotResult<()> {
    let content = format!(
        "# classplot configuration\n\
         \n\
         # Marker size in pixels\n\
         point_size = {}\n\
         \n\
         # Draw grid lines and axis titles\n\
         show_grid = {}\n\
         \n\
         # Class order: \"first-occurrence\" or \"sorted\"\n\
         class_order = \"first-occurrence\"\n\
         \n\
         # Generated palettes remembered per session\n\
         palette_cache_capacity = {}\n\
         \n\
         # PNG output size in pixels\n\
         width = {}\n\
         height = {}\n",
        config.point_size,
        config.show_grid,
        config.palette_cache_capacity,
        config.width,
        config.height,
    );
    std::fs::write(path, content.as_bytes())?;
    Ok(())
}
