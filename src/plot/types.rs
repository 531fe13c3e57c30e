/// Figure, trace and palette types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default marker size in pixels.
pub const DEFAULT_POINT_SIZE: u32 = 10;
/// Margin on every side of the plot area.
pub const PLOT_MARGIN: u32 = 50;

/// Background / axis color.
pub const GREY: &str = "#f2f3f4";
/// Grid line color.
pub const LIGHT: &str = "#dddddd";
/// Zero line color.
pub const DARK: &str = "#cccccc";
/// Title and legend font color.
pub const TEXT: &str = "#aaaaaa";

/// An RGB color, 0-255 per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.0, self.1, self.2)
    }
}

/// Class colors used while the class count fits.
pub const DEFAULT_PALETTE: [Rgb; 7] = [
    Rgb(204, 37, 41),  // red
    Rgb(57, 106, 177), // blue
    Rgb(62, 150, 81),  // green
    Rgb(218, 124, 48), // orange
    Rgb(107, 76, 154), // purple
    Rgb(10, 10, 10),   // near-black
    Rgb(204, 194, 16), // gold
];

pub type Palette = Vec<Rgb>;

/// Order in which distinct labels become classes.
///
/// The class order decides which display name and which palette entry each
/// class gets, and the order of traces in the figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClassOrder {
    /// Classes appear in the order their first sample appears.
    #[default]
    FirstOccurrence,
    /// Classes are sorted by label value.
    Sorted,
}

/// Marker styling for one trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub color: String,
    pub size: u32,
    pub symbol: String,
}

/// Plot type of a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    Scatter,
    Scatter3d,
}

/// One marker series: every sample of a single class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: TraceKind,
    pub mode: String,
    pub name: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<Vec<f64>>,
    pub text: Vec<String>,
    pub marker: Marker,
    /// Color the marker string was built from, kept for rasterizing.
    #[serde(skip)]
    pub color: Rgb,
}

impl Trace {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub b: u32,
    pub t: u32,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            l: PLOT_MARGIN,
            r: PLOT_MARGIN,
            b: PLOT_MARGIN,
            t: PLOT_MARGIN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    pub color: String,
}

/// Styling of a single axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub color: String,
    pub gridcolor: String,
    pub zerolinecolor: String,
    pub showgrid: bool,
    pub zeroline: bool,
    pub showline: bool,
    pub ticks: String,
    pub showticklabels: bool,
    pub title: String,
}

impl Axis {
    /// Themed axis. Hiding the grid also hides ticks and the axis title.
    pub fn themed(title: &str, show_grid: bool) -> Self {
        let (ticks, title) = if show_grid {
            ("outside", title)
        } else {
            ("", "")
        };
        Self {
            color: GREY.to_string(),
            gridcolor: LIGHT.to_string(),
            zerolinecolor: DARK.to_string(),
            showgrid: show_grid,
            zeroline: show_grid,
            showline: show_grid,
            ticks: ticks.to_string(),
            showticklabels: false,
            title: title.to_string(),
        }
    }
}

/// Axes of a 3D scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub zaxis: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: String,
    pub margin: Margin,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene: Option<Scene>,
    pub plot_bgcolor: String,
    pub paper_bgcolor: String,
    pub font: Font,
}

impl Layout {
    fn themed(title: &str) -> Self {
        Self {
            title: title.to_string(),
            margin: Margin::default(),
            xaxis: None,
            yaxis: None,
            scene: None,
            plot_bgcolor: GREY.to_string(),
            paper_bgcolor: GREY.to_string(),
            font: Font {
                color: TEXT.to_string(),
            },
        }
    }

    pub fn cartesian(title: &str, x: Axis, y: Axis) -> Self {
        Self {
            xaxis: Some(x),
            yaxis: Some(y),
            ..Self::themed(title)
        }
    }

    pub fn scene(title: &str, scene: Scene) -> Self {
        Self {
            scene: Some(scene),
            ..Self::themed(title)
        }
    }

    /// Whether any axis has its grid switched on.
    pub fn shows_grid(&self) -> bool {
        match &self.scene {
            Some(scene) => scene.xaxis.showgrid || scene.yaxis.showgrid || scene.zaxis.showgrid,
            None => self
                .xaxis
                .iter()
                .chain(self.yaxis.iter())
                .any(|axis| axis.showgrid),
        }
    }
}

/// A complete figure ready for an external renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    pub fn is_3d(&self) -> bool {
        self.layout.scene.is_some()
    }

    /// Total number of points across all traces.
    pub fn point_count(&self) -> usize {
        self.data.iter().map(Trace::len).sum()
    }

    /// Serialize as a `{data, layout}` figure document.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// A rendered figure image.
#[derive(Debug, Clone)]
pub struct RenderedPlot {
    pub png_bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}
