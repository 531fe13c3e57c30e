/// Figure rasterizing: Figure → PNG bytes via plotters.

use crate::error::{PlotError, PlotResult};
use crate::plot::types::{Figure, RenderedPlot, Rgb, Trace};
use image::codecs::png::PngEncoder;
use image::ImageEncoder;
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::debug;

/// Fallback background when the layout color doesn't parse.
const BG_COLOR: RGBColor = RGBColor(242, 243, 244);
/// Pixel margin around the chart area.
const CHART_MARGIN: u32 = 10;
/// Largest RGB buffer we allocate (256 MiB, roughly 9000x9000 pixels).
const MAX_BUFFER_BYTES: usize = 256 * 1024 * 1024;

/// Render a figure to a PNG image of the given size.
///
/// Only markers and grid lines are drawn; titles and tick labels are left to
/// richer renderers.
pub fn render_figure(figure: &Figure, width: u32, height: u32) -> PlotResult<RenderedPlot> {
    if width == 0 || height == 0 {
        return Err(PlotError::Render(format!(
            "invalid image size {}x{}",
            width, height
        )));
    }
    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(3))
        .filter(|&n| n <= MAX_BUFFER_BYTES)
        .ok_or_else(|| {
            PlotError::Render(format!("image too large: {}x{}", width, height))
        })?;
    let mut buf = vec![0u8; len];

    {
        let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
        let bg = parse_hex(&figure.layout.paper_bgcolor).unwrap_or(BG_COLOR);
        root.fill(&bg).map_err(|e| render_err("fill", e))?;

        if figure.is_3d() {
            draw_3d(&root, figure)?;
        } else {
            draw_2d(&root, figure)?;
        }

        root.present().map_err(|e| render_err("present", e))?;
    }
    debug!(
        traces = figure.data.len(),
        points = figure.point_count(),
        width,
        height,
        "figure rendered"
    );

    let png_bytes = encode_rgb_to_png(&buf, width, height)?;
    Ok(RenderedPlot {
        png_bytes,
        width,
        height,
    })
}

fn draw_2d(root: &DrawingArea<BitMapBackend<'_>, Shift>, figure: &Figure) -> PlotResult<()> {
    let x_range = axis_range(figure.data.iter().flat_map(|t| t.x.iter().copied()));
    let y_range = axis_range(figure.data.iter().flat_map(|t| t.y.iter().copied()));

    let mut chart = ChartBuilder::on(root)
        .margin(CHART_MARGIN)
        .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)
        .map_err(|e| render_err("chart build", e))?;

    if figure.layout.shows_grid() {
        let grid = axis_color(figure);
        chart
            .configure_mesh()
            .axis_style(grid)
            .bold_line_style(grid.mix(0.6))
            .light_line_style(grid.mix(0.2))
            .x_labels(0)
            .y_labels(0)
            .draw()
            .map_err(|e| render_err("mesh", e))?;
    }

    for trace in &figure.data {
        let style = trace_color(trace).filled();
        let radius = marker_radius(trace);
        chart
            .draw_series(
                trace
                    .x
                    .iter()
                    .zip(&trace.y)
                    .map(|(&x, &y)| Circle::new((x, y), radius, style)),
            )
            .map_err(|e| render_err("draw series", e))?;
    }
    Ok(())
}

fn draw_3d(root: &DrawingArea<BitMapBackend<'_>, Shift>, figure: &Figure) -> PlotResult<()> {
    let x_range = axis_range(figure.data.iter().flat_map(|t| t.x.iter().copied()));
    let y_range = axis_range(figure.data.iter().flat_map(|t| t.y.iter().copied()));
    let z_range = axis_range(
        figure
            .data
            .iter()
            .flat_map(|t| t.z.iter().flatten().copied()),
    );

    let mut chart = ChartBuilder::on(root)
        .margin(CHART_MARGIN)
        .build_cartesian_3d(
            x_range.0..x_range.1,
            y_range.0..y_range.1,
            z_range.0..z_range.1,
        )
        .map_err(|e| render_err("chart build", e))?;

    if figure.layout.shows_grid() {
        let grid = axis_color(figure);
        chart
            .configure_axes()
            .x_labels(0)
            .y_labels(0)
            .z_labels(0)
            .bold_grid_style(grid.mix(0.6))
            .light_grid_style(grid.mix(0.2))
            .draw()
            .map_err(|e| render_err("axes", e))?;
    }

    for trace in &figure.data {
        let Some(z) = &trace.z else { continue };
        let style = trace_color(trace).filled();
        let radius = marker_radius(trace);
        chart
            .draw_series(
                trace
                    .x
                    .iter()
                    .zip(&trace.y)
                    .zip(z)
                    .map(|((&x, &y), &z)| Circle::new((x, y, z), radius, style)),
            )
            .map_err(|e| render_err("draw series", e))?;
    }
    Ok(())
}

fn render_err(stage: &str, e: impl std::fmt::Display) -> PlotError {
    PlotError::Render(format!("{}: {}", stage, e))
}

/// Marker size is a diameter; plotters circles take a radius.
fn marker_radius(trace: &Trace) -> u32 {
    (trace.marker.size / 2).max(1)
}

fn trace_color(trace: &Trace) -> RGBColor {
    let Rgb(r, g, b) = trace.color;
    RGBColor(r, g, b)
}

/// Grid color of the first axis, which all axes share.
fn axis_color(figure: &Figure) -> RGBColor {
    let axis = match &figure.layout.scene {
        Some(scene) => Some(&scene.xaxis),
        None => figure.layout.xaxis.as_ref(),
    };
    // Half-intensity zero-line color.
    axis.and_then(|a| parse_hex(&a.zerolinecolor))
        .map(|RGBColor(r, g, b)| RGBColor(r / 2, g / 2, b / 2))
        .unwrap_or(RGBColor(102, 102, 102))
}

/// Parse a `#rrggbb` color string.
fn parse_hex(s: &str) -> Option<RGBColor> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}

/// Data range of one axis with 10% padding.
fn axis_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in values.filter(|v| v.is_finite()) {
        lo = lo.min(v);
        hi = hi.max(v);
    }

    // Fallback for empty/constant data
    if !lo.is_finite() || !hi.is_finite() {
        return (-1.0, 1.0);
    }
    if (hi - lo).abs() < 1e-10 {
        return (lo - 1.0, hi + 1.0);
    }

    let pad = (hi - lo) * 0.1;
    (lo - pad, hi + pad)
}

/// Encode a raw RGB pixel buffer to PNG.
fn encode_rgb_to_png(rgb: &[u8], width: u32, height: u32) -> PlotResult<Vec<u8>> {
    let mut png = Vec::new();
    let encoder = PngEncoder::new(&mut png);
    encoder
        .write_image(rgb, width, height, image::ExtendedColorType::Rgb8)
        .map_err(|e| PlotError::Encode(e.to_string()))?;
    Ok(png)
}
