/// 2D and 3D per-class scatter figure builders.

use crate::error::ValidationError;
use crate::plot::palette::{PaletteSource, RandomPalettes};
use crate::plot::request::{build_plot_request_with, ClassLabel, PlotRequest};
use crate::plot::types::*;

/// Presentation options shared by both builders.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterOptions {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Ignored by the 2D builder.
    pub z_label: String,
    pub point_size: u32,
    /// Turning the grid off also blanks the axis titles.
    pub show_grid: bool,
    pub class_order: ClassOrder,
}

impl Default for ScatterOptions {
    fn default() -> Self {
        Self {
            title: String::new(),
            x_label: "x".to_string(),
            y_label: "y".to_string(),
            z_label: "z".to_string(),
            point_size: DEFAULT_POINT_SIZE,
            show_grid: true,
            class_order: ClassOrder::default(),
        }
    }
}

impl ScatterOptions {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = label.into();
        self
    }

    pub fn y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = label.into();
        self
    }

    pub fn z_label(mut self, label: impl Into<String>) -> Self {
        self.z_label = label.into();
        self
    }

    pub fn point_size(mut self, size: u32) -> Self {
        self.point_size = size;
        self
    }

    pub fn show_grid(mut self, show: bool) -> Self {
        self.show_grid = show;
        self
    }

    pub fn class_order(mut self, order: ClassOrder) -> Self {
        self.class_order = order;
        self
    }
}

/// Build a 2D scatter figure with one trace per class.
pub fn build_scatter_2d<L: ClassLabel>(
    features: Vec<Vec<f64>>,
    labels: Vec<L>,
    text: Option<Vec<String>>,
    names: Option<Vec<String>>,
    options: &ScatterOptions,
) -> Result<Figure, ValidationError> {
    let mut source = RandomPalettes::new(rand::thread_rng());
    build_scatter_2d_with(features, labels, text, names, options, &mut source)
}

/// Build a 3D scatter figure from the first three components of each vector.
pub fn build_scatter_3d<L: ClassLabel>(
    features: Vec<Vec<f64>>,
    labels: Vec<L>,
    text: Option<Vec<String>>,
    names: Option<Vec<String>>,
    options: &ScatterOptions,
) -> Result<Figure, ValidationError> {
    let mut source = RandomPalettes::new(rand::thread_rng());
    build_scatter_3d_with(features, labels, text, names, options, &mut source)
}

pub fn build_scatter_2d_with<L, S>(
    features: Vec<Vec<f64>>,
    labels: Vec<L>,
    text: Option<Vec<String>>,
    names: Option<Vec<String>>,
    options: &ScatterOptions,
    palettes: &mut S,
) -> Result<Figure, ValidationError>
where
    L: ClassLabel,
    S: PaletteSource + ?Sized,
{
    let req = build_plot_request_with(
        features,
        labels,
        text,
        names,
        options.class_order,
        palettes,
    )?;
    require_dimension(&req, 2)?;

    let data = build_traces(&req, TraceKind::Scatter, options.point_size);
    let layout = Layout::cartesian(
        &options.title,
        Axis::themed(&options.x_label, options.show_grid),
        Axis::themed(&options.y_label, options.show_grid),
    );
    Ok(Figure { data, layout })
}

pub fn build_scatter_3d_with<L, S>(
    features: Vec<Vec<f64>>,
    labels: Vec<L>,
    text: Option<Vec<String>>,
    names: Option<Vec<String>>,
    options: &ScatterOptions,
    palettes: &mut S,
) -> Result<Figure, ValidationError>
where
    L: ClassLabel,
    S: PaletteSource + ?Sized,
{
    let req = build_plot_request_with(
        features,
        labels,
        text,
        names,
        options.class_order,
        palettes,
    )?;
    require_dimension(&req, 3)?;

    let data = build_traces(&req, TraceKind::Scatter3d, options.point_size);
    let scene = Scene {
        xaxis: Axis::themed(&options.x_label, options.show_grid),
        yaxis: Axis::themed(&options.y_label, options.show_grid),
        zaxis: Axis::themed(&options.z_label, options.show_grid),
    };
    Ok(Figure {
        data,
        layout: Layout::scene(&options.title, scene),
    })
}

fn require_dimension<L: ClassLabel>(
    req: &PlotRequest<L>,
    required: usize,
) -> Result<(), ValidationError> {
    let found = req.dimension();
    // An empty sample set has no dimension to check.
    if req.sample_count() > 0 && found < required {
        return Err(ValidationError::Dimension { required, found });
    }
    Ok(())
}

fn build_traces<L: ClassLabel>(req: &PlotRequest<L>, kind: TraceKind, size: u32) -> Vec<Trace> {
    req.partition()
        .into_iter()
        .enumerate()
        .map(|(i, idx)| {
            let axis = |a: usize| -> Vec<f64> { idx.iter().map(|&s| req.features[s][a]).collect() };
            let color = req.palette[i];
            Trace {
                kind,
                mode: "markers".to_string(),
                name: req.names[i].clone(),
                x: axis(0),
                y: axis(1),
                z: (kind == TraceKind::Scatter3d).then(|| axis(2)),
                text: idx.iter().map(|&s| req.text[s].clone()).collect(),
                marker: Marker {
                    color: color.to_string(),
                    size,
                    symbol: "circle".to_string(),
                },
                color,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagonal() -> (Vec<Vec<f64>>, Vec<i32>) {
        (
            vec![vec![0.0, 0.0], vec![1.0, 1.0], vec![2.0, 2.0]],
            vec![0, 1, 0],
        )
    }

    #[test]
    fn test_scatter_2d_groups_by_class() {
        let (features, labels) = diagonal();
        let fig = build_scatter_2d(features, labels, None, None, &ScatterOptions::default()).unwrap();
        assert_eq!(fig.data.len(), 2);

        let first = &fig.data[0];
        assert_eq!(first.name, "class_0");
        assert_eq!(first.x, vec![0.0, 2.0]);
        assert_eq!(first.y, vec![0.0, 2.0]);
        assert_eq!(first.marker.color, "rgb(204, 37, 41)");
        assert_eq!(first.kind, TraceKind::Scatter);
        assert!(first.z.is_none());

        let second = &fig.data[1];
        assert_eq!(second.name, "class_1");
        assert_eq!(second.x, vec![1.0]);
        assert_eq!(second.marker.color, "rgb(57, 106, 177)");
        assert_eq!(fig.point_count(), 3);
    }

    #[test]
    fn test_scatter_text_follows_samples() {
        let (features, labels) = diagonal();
        let text = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let fig =
            build_scatter_2d(features, labels, Some(text), None, &ScatterOptions::default()).unwrap();
        assert_eq!(fig.data[0].text, vec!["a", "c"]);
        assert_eq!(fig.data[1].text, vec!["b"]);
    }

    #[test]
    fn test_scatter_2d_layout() {
        let (features, labels) = diagonal();
        let opts = ScatterOptions::default()
            .title("demo")
            .x_label("pc1")
            .y_label("pc2")
            .point_size(4);
        let fig = build_scatter_2d(features, labels, None, None, &opts).unwrap();
        assert_eq!(fig.layout.title, "demo");
        assert_eq!(fig.layout.xaxis.as_ref().unwrap().title, "pc1");
        assert_eq!(fig.layout.yaxis.as_ref().unwrap().title, "pc2");
        assert!(fig.layout.scene.is_none());
        assert!(fig.data.iter().all(|t| t.marker.size == 4));
        assert!(!fig.is_3d());
    }

    #[test]
    fn test_hidden_grid_blanks_labels() {
        let (features, labels) = diagonal();
        let opts = ScatterOptions::default()
            .x_label("pc1")
            .y_label("pc2")
            .show_grid(false);
        let fig = build_scatter_2d(features, labels, None, None, &opts).unwrap();
        let x = fig.layout.xaxis.unwrap();
        assert_eq!(x.title, "");
        assert!(!x.showgrid);
        assert_eq!(fig.layout.yaxis.unwrap().title, "");
    }

    #[test]
    fn test_scatter_3d_uses_first_three_components() {
        let features = vec![vec![0.0, 1.0, 2.0, 9.0], vec![3.0, 4.0, 5.0, 9.0]];
        let opts = ScatterOptions::default().z_label("depth");
        let fig = build_scatter_3d(features, vec!["a", "b"], None, None, &opts).unwrap();
        assert!(fig.is_3d());
        assert_eq!(fig.data.len(), 2);
        assert_eq!(fig.data[0].z, Some(vec![2.0]));
        assert_eq!(fig.data[1].x, vec![3.0]);
        assert_eq!(fig.data[1].kind, TraceKind::Scatter3d);
        let scene = fig.layout.scene.unwrap();
        assert_eq!(scene.zaxis.title, "depth");
        assert!(fig.layout.xaxis.is_none());
    }

    #[test]
    fn test_scatter_3d_hidden_grid() {
        let features = vec![vec![0.0, 1.0, 2.0]];
        let opts = ScatterOptions::default().show_grid(false);
        let fig = build_scatter_3d(features, vec![1], None, None, &opts).unwrap();
        let scene = fig.layout.scene.unwrap();
        for axis in [scene.xaxis, scene.yaxis, scene.zaxis] {
            assert_eq!(axis.title, "");
            assert_eq!(axis.ticks, "");
        }
    }

    #[test]
    fn test_dimension_checked() {
        let err = build_scatter_2d(vec![vec![1.0]], vec![0], None, None, &ScatterOptions::default())
            .unwrap_err();
        assert_eq!(err, ValidationError::Dimension { required: 2, found: 1 });

        let err = build_scatter_3d(
            vec![vec![1.0, 2.0]],
            vec![0],
            None,
            None,
            &ScatterOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::Dimension { required: 3, found: 2 });
    }

    #[test]
    fn test_validation_error_propagates() {
        let err = build_scatter_2d(
            vec![vec![0.0, 0.0]; 3],
            vec![0, 1, 2],
            None,
            Some(vec!["a".to_string()]),
            &ScatterOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::NameCountMismatch { .. }));
    }

    #[test]
    fn test_sorted_class_order() {
        let features = vec![vec![0.0, 0.0], vec![1.0, 1.0], vec![2.0, 2.0]];
        let names = Some(vec!["low".to_string(), "high".to_string()]);
        let opts = ScatterOptions::default().class_order(ClassOrder::Sorted);
        let fig = build_scatter_2d(features, vec![9, 2, 9], None, names, &opts).unwrap();
        assert_eq!(fig.data[0].name, "low");
        assert_eq!(fig.data[0].x, vec![1.0]);
        assert_eq!(fig.data[1].name, "high");
        assert_eq!(fig.data[1].x, vec![0.0, 2.0]);
    }

    #[test]
    fn test_many_classes_one_color_each() {
        let features: Vec<Vec<f64>> = (0..20).map(|i| vec![i as f64, 0.0]).collect();
        let labels: Vec<usize> = (0..20).map(|i| i % 10).collect();
        let fig = build_scatter_2d(features, labels, None, None, &ScatterOptions::default()).unwrap();
        assert_eq!(fig.data.len(), 10);
        assert!(fig.data.iter().all(|t| t.len() == 2));
        assert_eq!(fig.point_count(), 20);
    }
}
