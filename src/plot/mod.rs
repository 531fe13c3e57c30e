pub mod palette;
pub mod plotter;
pub mod render;
pub mod request;
pub mod scatter;
pub mod types;

pub use palette::{
    generate_palette, generate_palette_seeded, PaletteCache, PaletteSource, RandomPalettes,
};
pub use plotter::Plotter;
pub use render::render_figure;
pub use request::{build_plot_request, build_plot_request_with, ClassLabel, PlotRequest};
pub use scatter::{build_scatter_2d, build_scatter_3d, ScatterOptions};
pub use types::{ClassOrder, Figure, Palette, Rgb, Trace, DEFAULT_PALETTE};
