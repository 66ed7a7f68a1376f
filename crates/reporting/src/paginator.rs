//! Single-pass page layout. Blocks are placed top to bottom at a vertical
//! cursor; a block that would cross the bottom margin starts a new page.
//! Placement never backtracks and never shrinks a block.

use crate::document::{Color, DrawOp, Page, PageGeometry, ReportDocument, TextStyle};
use image::RgbImage;
use std::sync::Arc;
use tracing::trace;

/// Where a block landed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub page: usize,
    pub x: f32,
    pub y: f32,
}

pub struct ReportPaginator {
    geometry: PageGeometry,
    pages: Vec<Page>,
    cursor_y: f32,
}

impl ReportPaginator {
    /// Starts with one blank page, cursor at the top margin.
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: vec![Page::default()],
            cursor_y: geometry.margin,
        }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn cursor_y(&self) -> f32 {
        self.cursor_y
    }

    /// Index of the page currently receiving content.
    pub fn current_page(&self) -> usize {
        self.pages.len() - 1
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// True while nothing has been placed on the current page.
    pub fn at_page_top(&self) -> bool {
        self.cursor_y <= self.geometry.margin
    }

    pub fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.cursor_y = self.geometry.margin;
        trace!(page = self.current_page(), "Page break");
    }

    fn overflows(&self, height: f32) -> bool {
        self.cursor_y + height > self.geometry.content_bottom()
    }

    /// Break to a new page unless `height` still fits below the cursor.
    /// The cursor does not move otherwise.
    pub fn ensure_space(&mut self, height: f32) {
        if self.overflows(height) && !self.at_page_top() {
            self.new_page();
        }
    }

    /// Reserve `height` for a block and return its origin. A block taller
    /// than the usable page is placed at the top of a page and overflows.
    pub fn place_block(&mut self, height: f32) -> Placement {
        if self.overflows(height) && !self.at_page_top() {
            self.new_page();
        }
        let placement = Placement {
            page: self.current_page(),
            x: self.geometry.margin,
            y: self.cursor_y,
        };
        self.cursor_y += height;
        placement
    }

    /// Move the cursor down to at least `y` on the current page.
    pub fn advance_to(&mut self, y: f32) {
        self.cursor_y = self.cursor_y.max(y);
    }

    pub fn push(&mut self, page: usize, op: DrawOp) {
        if let Some(page) = self.pages.get_mut(page) {
            page.ops.push(op);
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn rect(
        &mut self,
        page: usize,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        fill: Option<Color>,
        stroke: Option<Color>,
    ) {
        self.push(
            page,
            DrawOp::Rect {
                x,
                y,
                w,
                h,
                fill,
                stroke,
            },
        );
    }

    pub fn text(&mut self, page: usize, x: f32, y: f32, text: impl Into<String>, style: TextStyle) {
        self.push(
            page,
            DrawOp::Text {
                x,
                y,
                text: text.into(),
                style,
            },
        );
    }

    pub fn image(&mut self, page: usize, x: f32, y: f32, w: f32, h: f32, image: Arc<RgbImage>) {
        self.push(page, DrawOp::Image { x, y, w, h, image });
    }

    pub fn finish(self, title: impl Into<String>, footer: Option<String>) -> ReportDocument {
        ReportDocument {
            title: title.into(),
            geometry: self.geometry,
            pages: self.pages,
            footer,
        }
    }
}
