//! Paginated drawing model: absolute-positioned primitives grouped into
//! fixed-size pages. Lengths are millimetres, origin top-left, y down.

use campaign_core::config::ReportConfig;
use image::RgbImage;
use std::sync::Arc;

/// Points to millimetres.
pub const PT_TO_MM: f32 = 0.352_778;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const BLACK: Color = Color(0, 0, 0);
    pub const WHITE: Color = Color(255, 255, 255);
    pub const BRAND: Color = Color(59, 130, 246);
    pub const SECTION: Color = Color(52, 152, 219);
    pub const MUTED: Color = Color(111, 111, 111);
    pub const CARD: Color = Color(248, 250, 252);
    pub const CARD_BORDER: Color = Color(226, 232, 240);

    pub fn gray(level: u8) -> Self {
        Color(level, level, level)
    }

    pub fn from_rgb(rgb: [u8; 3]) -> Self {
        Color(rgb[0], rgb[1], rgb[2])
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub color: Color,
    pub bold: bool,
}

impl TextStyle {
    pub fn new(size: f32) -> Self {
        Self {
            size,
            color: Color::BLACK,
            bold: false,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Approximate rendered width of `text` in mm (Helvetica averages
    /// about half an em per glyph).
    pub fn text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.size * 0.5 * PT_TO_MM
    }
}

#[derive(Debug, Clone)]
pub enum DrawOp {
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        fill: Option<Color>,
        stroke: Option<Color>,
    },
    /// `y` is the text baseline.
    Text {
        x: f32,
        y: f32,
        text: String,
        style: TextStyle,
    },
    Image {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        image: Arc<RgbImage>,
    },
}

#[derive(Debug, Clone, Default)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    pub fn is_blank(&self) -> bool {
        self.ops.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    /// Top and bottom exclusion; also the left content edge.
    pub margin: f32,
}

impl PageGeometry {
    pub const A4: PageGeometry = PageGeometry {
        width: 210.0,
        height: 297.0,
        margin: 20.0,
    };

    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    /// Lowest y a block may reach without crossing the bottom margin.
    pub fn content_bottom(&self) -> f32 {
        self.height - self.margin
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::A4
    }
}

impl From<&ReportConfig> for PageGeometry {
    fn from(config: &ReportConfig) -> Self {
        Self {
            width: config.page_width_mm,
            height: config.page_height_mm,
            margin: config.margin_mm,
        }
    }
}

/// A finished, paginated report ready for a document writer.
#[derive(Debug, Clone)]
pub struct ReportDocument {
    pub title: String,
    pub geometry: PageGeometry,
    pub pages: Vec<Page>,
    /// Drawn on every page inside the bottom margin.
    pub footer: Option<String>,
}

impl ReportDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn ops(&self) -> impl Iterator<Item = (usize, &DrawOp)> {
        self.pages
            .iter()
            .enumerate()
            .flat_map(|(i, page)| page.ops.iter().map(move |op| (i, op)))
    }

    /// All text runs in page order, handy for assertions and previews.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops().filter_map(|(_, op)| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_from_config() {
        let cfg = ReportConfig {
            margin_mm: 15.0,
            ..ReportConfig::default()
        };
        let geometry = PageGeometry::from(&cfg);
        assert_eq!(geometry.content_width(), 180.0);
        assert_eq!(geometry.content_bottom(), 282.0);
    }

    #[test]
    fn test_text_width_scales_with_size() {
        let small = TextStyle::new(10.0).text_width("Performance");
        let large = TextStyle::new(20.0).text_width("Performance");
        assert!((large - 2.0 * small).abs() < 1e-4);
        assert_eq!(TextStyle::new(10.0).text_width(""), 0.0);
    }
}
