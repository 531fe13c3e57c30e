use crate::config::Config;
use crate::error::{PlotResult, ValidationError};
use crate::plot::palette::PaletteCache;
use crate::plot::render::render_figure;
use crate::plot::request::ClassLabel;
use crate::plot::scatter::{build_scatter_2d_with, build_scatter_3d_with, ScatterOptions};
use crate::plot::types::{Figure, RenderedPlot};

/// Long-lived plotting session.
///
/// Owns the configuration and a palette cache, so figures with the same
/// number of classes get the same generated colors.
pub struct Plotter {
    config: Config,
    palettes: PaletteCache,
}

impl Plotter {
    pub fn new(config: Config) -> Self {
        let palettes = PaletteCache::new(config.palette_cache_capacity);
        Self { config, palettes }
    }

    /// Session with reproducible generated palettes.
    pub fn seeded(config: Config, seed: u64) -> Self {
        let palettes = PaletteCache::seeded(config.palette_cache_capacity, seed);
        Self { config, palettes }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Scatter options seeded from the config.
    pub fn options(&self) -> ScatterOptions {
        ScatterOptions::default()
            .point_size(self.config.point_size)
            .show_grid(self.config.show_grid)
            .class_order(self.config.class_order)
    }

    pub fn scatter_2d<L: ClassLabel>(
        &mut self,
        features: Vec<Vec<f64>>,
        labels: Vec<L>,
        text: Option<Vec<String>>,
        names: Option<Vec<String>>,
        options: &ScatterOptions,
    ) -> Result<Figure, ValidationError> {
        build_scatter_2d_with(features, labels, text, names, options, &mut self.palettes)
    }

    pub fn scatter_3d<L: ClassLabel>(
        &mut self,
        features: Vec<Vec<f64>>,
        labels: Vec<L>,
        text: Option<Vec<String>>,
        names: Option<Vec<String>>,
        options: &ScatterOptions,
    ) -> Result<Figure, ValidationError> {
        build_scatter_3d_with(features, labels, text, names, options, &mut self.palettes)
    }

    /// Render at the configured image size.
    pub fn render(&self, figure: &Figure) -> PlotResult<RenderedPlot> {
        render_figure(figure, self.config.width, self.config.height)
    }
}
