//! Serializes a [`ReportDocument`] to bytes. `PdfWriter` renders through
//! printpdf's built-in Helvetica faces; document y runs down, PDF y runs up.

use crate::document::{Color, DrawOp, PageGeometry, ReportDocument, TextStyle};
use crate::export::ExportError;
use image::RgbImage;
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, ColorBits, ColorSpace, Image, ImageTransform, ImageXObject, IndirectFontRef,
    Line, Mm, PdfDocument, PdfLayerReference, Point, Polygon, Px, Rgb,
};
use std::io::{BufWriter, Cursor};
use tracing::debug;

pub trait DocumentWriter: Send + Sync {
    fn write(&self, document: &ReportDocument) -> Result<Vec<u8>, ExportError>;
}

const FOOTER_SIZE: f32 = 8.0;
const FOOTER_OFFSET: f32 = 10.0;
const IMAGE_DPI: f32 = 72.0;
const MM_PER_PX_AT_72_DPI: f32 = 25.4 / IMAGE_DPI;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Fonts {
    fn pick(&self, style: &TextStyle) -> &IndirectFontRef {
        if style.bold {
            &self.bold
        } else {
            &self.regular
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PdfWriter;

impl PdfWriter {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentWriter for PdfWriter {
    fn write(&self, document: &ReportDocument) -> Result<Vec<u8>, ExportError> {
        let geometry = document.geometry;
        let (width, height) = (Mm(geometry.width), Mm(geometry.height));
        let (doc, first_page, first_layer) =
            PdfDocument::new(&document.title, width, height, "Layer 1");

        let fonts = Fonts {
            regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(render)?,
            bold: doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(render)?,
        };

        for (index, page) in document.pages.iter().enumerate() {
            let layer = if index == 0 {
                doc.get_page(first_page).get_layer(first_layer)
            } else {
                let (page, layer) = doc.add_page(width, height, "Layer 1");
                doc.get_page(page).get_layer(layer)
            };

            for op in &page.ops {
                draw(&layer, &geometry, &fonts, op);
            }
            if let Some(footer) = &document.footer {
                draw_footer(&layer, &geometry, &fonts, footer);
            }
        }

        let mut bytes = Vec::new();
        {
            let mut out = BufWriter::new(Cursor::new(&mut bytes));
            doc.save(&mut out).map_err(render)?;
        }
        debug!(
            title = %document.title,
            pages = document.page_count(),
            bytes = bytes.len(),
            "PDF rendered"
        );
        Ok(bytes)
    }
}

fn render(err: impl std::fmt::Display) -> ExportError {
    ExportError::Render(err.to_string())
}

fn pdf_color(color: Color) -> printpdf::Color {
    let channel = |c: u8| f32::from(c) / 255.0;
    printpdf::Color::Rgb(Rgb::new(channel(color.0), channel(color.1), channel(color.2), None))
}

fn point(geometry: &PageGeometry, x: f32, y: f32) -> (Point, bool) {
    (Point::new(Mm(x), Mm(geometry.height - y)), false)
}

fn draw(layer: &PdfLayerReference, geometry: &PageGeometry, fonts: &Fonts, op: &DrawOp) {
    match op {
        DrawOp::Rect {
            x,
            y,
            w,
            h,
            fill,
            stroke,
        } => {
            let points = vec![
                point(geometry, *x, *y),
                point(geometry, x + w, *y),
                point(geometry, x + w, y + h),
                point(geometry, *x, y + h),
            ];
            if let Some(fill) = fill {
                layer.set_fill_color(pdf_color(*fill));
                if let Some(stroke) = stroke {
                    layer.set_outline_color(pdf_color(*stroke));
                    layer.set_outline_thickness(0.5);
                }
                layer.add_polygon(Polygon {
                    rings: vec![points],
                    mode: if stroke.is_some() {
                        PaintMode::FillStroke
                    } else {
                        PaintMode::Fill
                    },
                    winding_order: WindingOrder::NonZero,
                });
            } else if let Some(stroke) = stroke {
                layer.set_outline_color(pdf_color(*stroke));
                layer.set_outline_thickness(0.5);
                layer.add_line(Line {
                    points,
                    is_closed: true,
                });
            }
        }
        DrawOp::Text { x, y, text, style } => {
            layer.set_fill_color(pdf_color(style.color));
            layer.use_text(
                text.as_str(),
                style.size,
                Mm(*x),
                Mm(geometry.height - y),
                fonts.pick(style),
            );
        }
        DrawOp::Image { x, y, w, h, image } => draw_image(layer, geometry, *x, *y, *w, *h, image),
    }
}

fn draw_image(
    layer: &PdfLayerReference,
    geometry: &PageGeometry,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    image: &RgbImage,
) {
    if image.width() == 0 || image.height() == 0 {
        return;
    }
    let natural_w = image.width() as f32 * MM_PER_PX_AT_72_DPI;
    let natural_h = image.height() as f32 * MM_PER_PX_AT_72_DPI;

    let xobject = ImageXObject {
        width: Px(image.width() as usize),
        height: Px(image.height() as usize),
        color_space: ColorSpace::Rgb,
        bits_per_component: ColorBits::Bit8,
        interpolate: true,
        image_data: image.as_raw().clone(),
        image_filter: None,
        clipping_bbox: None,
        smask: None,
    };
    Image::from(xobject).add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(x)),
            translate_y: Some(Mm(geometry.height - y - h)),
            scale_x: Some(w / natural_w),
            scale_y: Some(h / natural_h),
            dpi: Some(IMAGE_DPI),
            ..Default::default()
        },
    );
}

fn draw_footer(layer: &PdfLayerReference, geometry: &PageGeometry, fonts: &Fonts, footer: &str) {
    let style = TextStyle::new(FOOTER_SIZE).color(Color::gray(128));
    let x = ((geometry.width - style.text_width(footer)) / 2.0).max(0.0);
    layer.set_fill_color(pdf_color(style.color));
    layer.use_text(footer, style.size, Mm(x), Mm(FOOTER_OFFSET), fonts.pick(&style));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Page;
    use image::Rgb as Pixel;
    use std::sync::Arc;

    fn document(pages: Vec<Page>) -> ReportDocument {
        ReportDocument {
            title: "Test Report".into(),
            geometry: PageGeometry::A4,
            pages,
            footer: Some("© 2024 Ad Analytics - Confidential".into()),
        }
    }

    fn sample_page() -> Page {
        Page {
            ops: vec![
                DrawOp::Rect {
                    x: 0.0,
                    y: 0.0,
                    w: 210.0,
                    h: 40.0,
                    fill: Some(Color::BRAND),
                    stroke: None,
                },
                DrawOp::Rect {
                    x: 20.0,
                    y: 60.0,
                    w: 80.0,
                    h: 20.0,
                    fill: None,
                    stroke: Some(Color::CARD_BORDER),
                },
                DrawOp::Text {
                    x: 20.0,
                    y: 25.0,
                    text: "Campaign Performance Report".into(),
                    style: TextStyle::new(24.0).color(Color::WHITE).bold(),
                },
                DrawOp::Image {
                    x: 20.0,
                    y: 100.0,
                    w: 170.0,
                    h: 85.0,
                    image: Arc::new(RgbImage::from_pixel(40, 20, Pixel([59, 130, 246]))),
                },
            ],
        }
    }

    #[test]
    fn test_writes_pdf_bytes() {
        let bytes = PdfWriter::new().write(&document(vec![sample_page()])).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_more_pages_more_bytes() {
        let one = PdfWriter::new().write(&document(vec![sample_page()])).unwrap();
        let three = PdfWriter::new()
            .write(&document(vec![sample_page(), sample_page(), sample_page()]))
            .unwrap();
        assert!(three.len() > one.len());
    }

    #[test]
    fn test_blank_document_still_renders() {
        let bytes = PdfWriter::new().write(&document(vec![Page::default()])).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
