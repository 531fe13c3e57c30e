use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use classplot::config::load_config;
use classplot::{ClassOrder, Figure, Plotter, ScatterOptions};

/// Build a per-class scatter figure from a JSON sample file.
#[derive(Parser, Debug)]
#[command(name = "classplot", version)]
struct Cli {
    /// JSON file with `features`, `labels` and optional `text` / `names`
    input: PathBuf,

    /// Plot dimension
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(2..=3))]
    dim: u8,

    #[arg(long, default_value = "")]
    title: String,

    #[arg(long, default_value = "x")]
    x_label: String,

    #[arg(long, default_value = "y")]
    y_label: String,

    #[arg(long, default_value = "z")]
    z_label: String,

    /// Marker size (defaults to the config value)
    #[arg(long)]
    point_size: Option<u32>,

    /// Hide grid lines and axis titles
    #[arg(long)]
    no_grid: bool,

    /// Order classes by label value instead of first appearance
    #[arg(long)]
    sorted: bool,

    /// Seed for generated palettes
    #[arg(long)]
    seed: Option<u64>,

    /// Write a PNG rendering here
    #[arg(long)]
    png: Option<PathBuf>,

    /// Write the figure JSON here
    #[arg(long)]
    json: Option<PathBuf>,
}

impl Cli {
    /// Apply the command-line overrides on top of config-derived options.
    fn scatter_options(&self, base: ScatterOptions) -> ScatterOptions {
        let mut options = base
            .title(self.title.as_str())
            .x_label(self.x_label.as_str())
            .y_label(self.y_label.as_str())
            .z_label(self.z_label.as_str());
        if let Some(size) = self.point_size {
            options = options.point_size(size);
        }
        if self.no_grid {
            options = options.show_grid(false);
        }
        if self.sorted {
            options = options.class_order(ClassOrder::Sorted);
        }
        options
    }

    /// Print the figure when no output file was requested.
    fn prints_to_stdout(&self) -> bool {
        self.png.is_none() && self.json.is_none()
    }
}

/// A class label as it appears in the input file.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(untagged)]
enum RawLabel {
    Int(i64),
    Text(String),
}

#[derive(Deserialize, Debug)]
struct SampleFile {
    features: Vec<Vec<f64>>,
    labels: Vec<RawLabel>,
    #[serde(default)]
    text: Option<Vec<String>>,
    #[serde(default)]
    names: Option<Vec<String>>,
}

fn read_samples(content: &str) -> anyhow::Result<SampleFile> {
    Ok(serde_json::from_str(content)?)
}

fn build_figure(
    plotter: &mut Plotter,
    dim: u8,
    samples: SampleFile,
    options: &ScatterOptions,
) -> anyhow::Result<Figure> {
    let SampleFile {
        features,
        labels,
        text,
        names,
    } = samples;
    let figure = if dim == 3 {
        plotter.scatter_3d(features, labels, text, names, options)?
    } else {
        plotter.scatter_2d(features, labels, text, names, options)?
    };
    Ok(figure)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config();

    let content = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;
    let samples =
        read_samples(&content).with_context(|| format!("parsing {}", cli.input.display()))?;

    let mut plotter = match cli.seed {
        Some(seed) => Plotter::seeded(config, seed),
        None => Plotter::new(config),
    };
    let options = cli.scatter_options(plotter.options());
    let figure = build_figure(&mut plotter, cli.dim, samples, &options)?;
    info!(
        traces = figure.data.len(),
        points = figure.point_count(),
        "figure built"
    );

    if let Some(path) = &cli.png {
        let rendered = plotter.render(&figure)?;
        std::fs::write(path, &rendered.png_bytes)
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "wrote PNG");
    }
    if let Some(path) = &cli.json {
        std::fs::write(path, figure.to_json_pretty()?)
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "wrote figure JSON");
    }
    if cli.prints_to_stdout() {
        println!("{}", figure.to_json()?);
    }

    Ok(())
}
