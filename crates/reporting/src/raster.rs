//! Rasterization seam: turns a chart selector into a bitmap for embedding.
//!
//! Exports await the rasterizer once per chart section, in order. A selector
//! with nothing behind it yields `Ok(None)` and the section is skipped.

use async_trait::async_trait;
use image::{Rgb, RgbImage};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum RasterError {
    #[error("failed to capture {selector}: {reason}")]
    Capture { selector: String, reason: String },

    #[error("raster worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

/// A captured bitmap. Cheap to clone.
#[derive(Debug, Clone)]
pub struct RasterImage {
    pixels: Arc<RgbImage>,
}

impl RasterImage {
    pub fn new(pixels: RgbImage) -> Self {
        Self {
            pixels: Arc::new(pixels),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> Arc<RgbImage> {
        Arc::clone(&self.pixels)
    }

    /// Height in mm when scaled to `target_width` mm, keeping aspect ratio.
    pub fn scaled_height(&self, target_width: f32) -> f32 {
        if self.width() == 0 {
            return 0.0;
        }
        target_width * self.height() as f32 / self.width() as f32
    }
}

#[async_trait]
pub trait Rasterizer: Send + Sync {
    /// Capture the element behind `selector`; `None` when nothing matches.
    async fn rasterize(&self, selector: &str) -> Result<Option<RasterImage>, RasterError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Line,
}

#[derive(Debug, Clone)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub series: Vec<(String, f64)>,
    pub color: [u8; 3],
}

impl ChartSpec {
    pub fn bar(series: Vec<(String, f64)>, color: [u8; 3]) -> Self {
        Self {
            kind: ChartKind::Bar,
            series,
            color,
        }
    }

    pub fn line(series: Vec<(String, f64)>, color: [u8; 3]) -> Self {
        Self {
            kind: ChartKind::Line,
            series,
            color,
        }
    }
}

/// Paints registered chart series into bitmaps on the blocking pool.
pub struct ChartRasterizer {
    charts: HashMap<String, ChartSpec>,
    width: u32,
    height: u32,
}

impl ChartRasterizer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            charts: HashMap::new(),
            width,
            height,
        }
    }

    pub fn register(&mut self, selector: impl Into<String>, spec: ChartSpec) -> &mut Self {
        self.charts.insert(selector.into(), spec);
        self
    }

    pub fn chart(&self, selector: &str) -> Option<&ChartSpec> {
        self.charts.get(selector)
    }

    pub fn is_registered(&self, selector: &str) -> bool {
        self.chart(selector).is_some()
    }
}

impl Default for ChartRasterizer {
    fn default() -> Self {
        Self::new(800, 400)
    }
}

#[async_trait]
impl Rasterizer for ChartRasterizer {
    async fn rasterize(&self, selector: &str) -> Result<Option<RasterImage>, RasterError> {
        let Some(spec) = self.charts.get(selector).cloned() else {
            debug!(selector, "No chart registered for selector");
            return Ok(None);
        };
        let (width, height) = (self.width, self.height);
        if width == 0 || height == 0 {
            return Err(RasterError::Capture {
                selector: selector.to_string(),
                reason: "empty canvas".into(),
            });
        }

        let pixels = tokio::task::spawn_blocking(move || paint(&spec, width, height)).await?;
        debug!(selector, width, height, "Chart rasterized");
        Ok(Some(RasterImage::new(pixels)))
    }
}

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([203, 213, 225]);

fn paint(spec: &ChartSpec, width: u32, height: u32) -> RgbImage {
    let mut img = RgbImage::from_pixel(width, height, BACKGROUND);
    let pad = (width.min(height) / 10).max(1);
    let plot_w = width.saturating_sub(2 * pad).max(1);
    let plot_h = height.saturating_sub(2 * pad).max(1);
    let baseline = pad + plot_h;

    fill(&mut img, pad, baseline, plot_w, 1, AXIS);
    fill(&mut img, pad, pad, 1, plot_h, AXIS);

    let max = spec
        .series
        .iter()
        .map(|(_, v)| *v)
        .fold(0.0_f64, f64::max);
    if spec.series.is_empty() || max <= 0.0 {
        return img;
    }

    let color = Rgb(spec.color);
    let slot = plot_w as f64 / spec.series.len() as f64;
    let bar_height = |v: f64| ((v.max(0.0) / max) * plot_h as f64).round() as u32;

    match spec.kind {
        ChartKind::Bar => {
            for (i, (_, value)) in spec.series.iter().enumerate() {
                let h = bar_height(*value);
                let x = pad + (slot * i as f64 + slot * 0.15) as u32;
                let w = ((slot * 0.7) as u32).max(1);
                fill(&mut img, x, baseline - h, w, h, color);
            }
        }
        ChartKind::Line => {
            let points: Vec<(f64, f64)> = spec
                .series
                .iter()
                .enumerate()
                .map(|(i, (_, value))| {
                    let x = pad as f64 + slot * (i as f64 + 0.5);
                    let y = (baseline - bar_height(*value)) as f64;
                    (x, y)
                })
                .collect();
            for pair in points.windows(2) {
                line(&mut img, pair[0], pair[1], color);
            }
            for &(x, y) in &points {
                let (x, y) = ((x as u32).saturating_sub(2), (y as u32).saturating_sub(2));
                fill(&mut img, x, y, 5, 5, color);
            }
        }
    }
    img
}

fn fill(img: &mut RgbImage, x: u32, y: u32, w: u32, h: u32, color: Rgb<u8>) {
    let x_end = (x + w).min(img.width());
    let y_end = (y + h).min(img.height());
    for py in y..y_end {
        for px in x..x_end {
            img.put_pixel(px, py, color);
        }
    }
}

fn line(img: &mut RgbImage, from: (f64, f64), to: (f64, f64), color: Rgb<u8>) {
    let steps = (to.0 - from.0).abs().max((to.1 - from.1).abs()).ceil().max(1.0) as u32;
    for step in 0..=steps {
        let t = step as f64 / steps as f64;
        let x = from.0 + (to.0 - from.0) * t;
        let y = from.1 + (to.1 - from.1) * t;
        fill(img, x as u32, y as u32, 2, 2, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
    }

    fn series() -> Vec<(String, f64)> {
        vec![("A".into(), 10.0), ("B".into(), 40.0), ("C".into(), 20.0)]
    }

    #[test]
    fn test_unregistered_selector_is_none() {
        let rasterizer = ChartRasterizer::default();
        let result = runtime().block_on(rasterizer.rasterize("#missing")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_registered_chart_has_canvas_size() {
        let mut rasterizer = ChartRasterizer::new(400, 200);
        rasterizer.register("#bars", ChartSpec::bar(series(), [59, 130, 246]));
        assert!(rasterizer.is_registered("#bars"));

        let image = runtime()
            .block_on(rasterizer.rasterize("#bars"))
            .unwrap()
            .unwrap();
        assert_eq!((image.width(), image.height()), (400, 200));
        assert!((image.scaled_height(170.0) - 85.0).abs() < 1e-4);
    }

    #[test]
    fn test_bar_paints_series_color() {
        let img = paint(&ChartSpec::bar(series(), [200, 0, 0]), 300, 150);
        let painted = img.pixels().filter(|p| **p == Rgb([200, 0, 0])).count();
        assert!(painted > 0);
    }

    #[test]
    fn test_line_paints_series_color() {
        let img = paint(&ChartSpec::line(series(), [0, 200, 0]), 300, 150);
        assert!(img.pixels().any(|p| *p == Rgb([0, 200, 0])));
    }

    #[test]
    fn test_all_zero_series_is_blank_plot() {
        let spec = ChartSpec::bar(vec![("A".into(), 0.0)], [1, 2, 3]);
        let img = paint(&spec, 100, 50);
        assert!(!img.pixels().any(|p| *p == Rgb([1, 2, 3])));
    }

    #[test]
    fn test_zero_canvas_is_capture_error() {
        let mut rasterizer = ChartRasterizer::new(0, 0);
        rasterizer.register("#bars", ChartSpec::bar(series(), [0, 0, 0]));
        let err = runtime().block_on(rasterizer.rasterize("#bars")).unwrap_err();
        assert!(matches!(err, RasterError::Capture { .. }));
    }
}
