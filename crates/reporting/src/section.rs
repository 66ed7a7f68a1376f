//! Report sections. Each variant measures itself and draws at the origin
//! the paginator hands back; multi-row variants (tables, wrapped text, card
//! grids) place one block per row so they can break across pages.

use crate::document::{Color, TextStyle, PT_TO_MM};
use crate::paginator::ReportPaginator;
use crate::raster::RasterImage;

/// One logical unit of report content, placed in list order.
#[derive(Debug, Clone)]
pub enum Section {
    Banner(Banner),
    Heading(Heading),
    Text(TextBlock),
    Badges(Vec<Badge>),
    KpiGrid(KpiGrid),
    Table(Table),
    /// Rasterized by the exporter before placement.
    Chart(Chart),
}

impl Section {
    /// Lay out every non-chart section. Charts need their bitmap first;
    /// see [`Chart::place`].
    pub(crate) fn place(&self, pager: &mut ReportPaginator) {
        match self {
            Section::Banner(banner) => banner.place(pager),
            Section::Heading(heading) => heading.place(pager),
            Section::Text(text) => text.place(pager),
            Section::Badges(badges) => place_badges(badges, pager),
            Section::KpiGrid(grid) => grid.place(pager),
            Section::Table(table) => table.place(pager),
            Section::Chart(_) => {}
        }
    }
}

fn baseline(size: f32) -> f32 {
    size * PT_TO_MM * 0.8
}

// ─── Banner ─────────────────────────────────────────────────────────────────

/// Full-width colored header band at the top of a page.
#[derive(Debug, Clone)]
pub struct Banner {
    pub title: String,
    pub subtitle: Option<String>,
}

impl Banner {
    pub const HEIGHT: f32 = 40.0;
    const GAP_AFTER: f32 = 20.0;

    pub fn new(title: impl Into<String>, subtitle: Option<String>) -> Self {
        Self {
            title: title.into(),
            subtitle,
        }
    }

    fn place(&self, pager: &mut ReportPaginator) {
        if !pager.at_page_top() {
            pager.new_page();
        }
        let page = pager.current_page();
        let geometry = *pager.geometry();
        let x = geometry.margin;

        pager.rect(page, 0.0, 0.0, geometry.width, Self::HEIGHT, Some(Color::BRAND), None);
        pager.text(page, x, 25.0, &self.title, TextStyle::new(24.0).color(Color::WHITE).bold());
        if let Some(subtitle) = &self.subtitle {
            pager.text(page, x, 35.0, subtitle, TextStyle::new(12.0).color(Color::WHITE));
        }
        pager.advance_to(Self::HEIGHT + Self::GAP_AFTER);
    }
}

// ─── Heading ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingStyle {
    /// Large document title.
    Title,
    /// Plain section heading.
    Section,
    /// White text on a colored bar.
    Bar,
}

#[derive(Debug, Clone)]
pub struct Heading {
    pub text: String,
    pub style: HeadingStyle,
    pub color: Color,
    /// Space that must remain below the heading, so it is not stranded at
    /// the bottom of a page away from its content.
    pub keep_with_next: f32,
}

impl Heading {
    pub fn new(text: impl Into<String>, style: HeadingStyle) -> Self {
        Self {
            text: text.into(),
            style,
            color: Color::BLACK,
            keep_with_next: 0.0,
        }
    }

    pub fn title(text: impl Into<String>) -> Self {
        Self::new(text, HeadingStyle::Title)
    }

    pub fn section(text: impl Into<String>) -> Self {
        Self::new(text, HeadingStyle::Section)
    }

    pub fn bar(text: impl Into<String>) -> Self {
        Self::new(text, HeadingStyle::Bar)
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn keep_with_next(mut self, height: f32) -> Self {
        self.keep_with_next = height;
        self
    }

    fn size(&self) -> f32 {
        match self.style {
            HeadingStyle::Title => 22.0,
            HeadingStyle::Section => 16.0,
            HeadingStyle::Bar => 12.0,
        }
    }

    pub fn height(&self) -> f32 {
        match self.style {
            HeadingStyle::Title => 14.0,
            HeadingStyle::Section => 12.0,
            HeadingStyle::Bar => BAR_HEIGHT + 2.0,
        }
    }

    fn place(&self, pager: &mut ReportPaginator) {
        let height = self.height();
        pager.ensure_space(height + self.keep_with_next);
        let at = pager.place_block(height);
        let size = self.size();

        match self.style {
            HeadingStyle::Bar => draw_bar(pager, at.page, at.x, at.y, &self.text),
            HeadingStyle::Title | HeadingStyle::Section => {
                let style = TextStyle::new(size).color(self.color).bold();
                pager.text(at.page, at.x, at.y + baseline(size), &self.text, style);
            }
        }
    }
}

const BAR_HEIGHT: f32 = 8.0;

fn draw_bar(pager: &mut ReportPaginator, page: usize, x: f32, y: f32, title: &str) {
    let width = pager.geometry().content_width();
    pager.rect(page, x, y, width, BAR_HEIGHT, Some(Color::SECTION), None);
    let style = TextStyle::new(12.0).color(Color::WHITE).bold();
    pager.text(page, x + 5.0, y + 6.0, title, style);
}

// ─── Text block ─────────────────────────────────────────────────────────────

/// Paragraph word-wrapped to the content width; one block per line.
#[derive(Debug, Clone)]
pub struct TextBlock {
    pub text: String,
    pub style: TextStyle,
}

impl TextBlock {
    const GAP_AFTER: f32 = 4.0;

    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn line_height(&self) -> f32 {
        self.style.size * PT_TO_MM * 1.4
    }

    /// Greedy word wrap; a single word wider than the line keeps its own line.
    pub fn wrap(&self, max_width: f32) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current = String::new();
        for word in self.text.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if self.style.text_width(&candidate) > max_width && !current.is_empty() {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            } else {
                current = candidate;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }

    fn place(&self, pager: &mut ReportPaginator) {
        let lines = self.wrap(pager.geometry().content_width());
        let line_height = self.line_height();
        for line in lines {
            let at = pager.place_block(line_height);
            pager.text(at.page, at.x, at.y + baseline(self.style.size), line, self.style);
        }
        pager.place_block(Self::GAP_AFTER);
    }
}

// ─── Badges ─────────────────────────────────────────────────────────────────

/// Colored pill label, e.g. a report's type or status.
#[derive(Debug, Clone)]
pub struct Badge {
    pub label: String,
    pub background: Color,
    pub foreground: Color,
}

impl Badge {
    pub const HEIGHT: f32 = 7.0;
    const PADDING_X: f32 = 4.0;
    const SPACING: f32 = 8.0;
    const GAP_AFTER: f32 = 15.0;

    pub fn new(label: impl Into<String>, background: Color, foreground: Color) -> Self {
        Self {
            label: label.into(),
            background,
            foreground,
        }
    }
}

fn place_badges(badges: &[Badge], pager: &mut ReportPaginator) {
    if badges.is_empty() {
        return;
    }
    let at = pager.place_block(Badge::HEIGHT + Badge::GAP_AFTER);
    let mut x = at.x;
    for badge in badges {
        let style = TextStyle::new(10.0).color(badge.foreground);
        let width = style.text_width(&badge.label) + 2.0 * Badge::PADDING_X;
        pager.rect(at.page, x, at.y, width, Badge::HEIGHT, Some(badge.background), None);
        pager.text(at.page, x + Badge::PADDING_X, at.y + 5.2, &badge.label, style);
        x += width + Badge::SPACING;
    }
}

// ─── KPI grid ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct KpiCard {
    pub label: String,
    pub value: String,
    /// Value color; defaults to black.
    pub accent: Option<Color>,
    /// Card background; defaults to a light slate.
    pub background: Option<Color>,
}

impl KpiCard {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            accent: None,
            background: None,
        }
    }

    pub fn accent(mut self, accent: Color) -> Self {
        self.accent = Some(accent);
        self
    }

    pub fn background(mut self, background: Color) -> Self {
        self.background = Some(background);
        self
    }
}

/// Metric cards laid out `per_row` across; each row is one block.
#[derive(Debug, Clone)]
pub struct KpiGrid {
    pub cards: Vec<KpiCard>,
    pub per_row: usize,
}

impl KpiGrid {
    pub const CARD_HEIGHT: f32 = 20.0;
    pub const ROW_GAP: f32 = 8.0;
    const COLUMN_GAP: f32 = 10.0;

    pub fn new(cards: Vec<KpiCard>, per_row: usize) -> Self {
        Self {
            cards,
            per_row: per_row.max(1),
        }
    }

    pub fn row_count(&self) -> usize {
        self.cards.len().div_ceil(self.per_row.max(1))
    }

    fn place(&self, pager: &mut ReportPaginator) {
        let per_row = self.per_row.max(1);
        let content_width = pager.geometry().content_width();
        let card_width =
            (content_width - Self::COLUMN_GAP * (per_row - 1) as f32) / per_row as f32;

        for row in self.cards.chunks(per_row) {
            let at = pager.place_block(Self::CARD_HEIGHT + Self::ROW_GAP);
            for (col, card) in row.iter().enumerate() {
                let x = at.x + col as f32 * (card_width + Self::COLUMN_GAP);
                let background = card.background.unwrap_or(Color::CARD);
                pager.rect(
                    at.page,
                    x,
                    at.y,
                    card_width,
                    Self::CARD_HEIGHT,
                    Some(background),
                    Some(Color::CARD_BORDER),
                );
                let label = TextStyle::new(10.0).color(Color::MUTED);
                pager.text(at.page, x + 5.0, at.y + 8.0, &card.label, label);
                let value = TextStyle::new(14.0)
                    .color(card.accent.unwrap_or(Color::BLACK))
                    .bold();
                pager.text(at.page, x + 5.0, at.y + 16.0, &card.value, value);
            }
        }
    }
}

// ─── Table ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Column {
    pub title: String,
    /// Offset of the column's text from the table's left edge, in mm.
    pub offset: f32,
}

impl Column {
    pub fn new(title: impl Into<String>, offset: f32) -> Self {
        Self {
            title: title.into(),
            offset,
        }
    }
}

/// Header row plus body rows. Every row is checked against the page
/// boundary on its own, so a long table continues on the next page.
#[derive(Debug, Clone)]
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
    pub header_height: f32,
    pub row_height: f32,
    pub font_size: f32,
    /// Header band fill and text color; plain bold header text when unset.
    pub header_fill: Option<(Color, Color)>,
    pub zebra: bool,
    /// Per-row legend swatch drawn left of the first column.
    pub swatches: Vec<Color>,
}

impl Table {
    const GAP_AFTER: f32 = 8.0;

    pub fn new(columns: Vec<Column>, rows: Vec<Vec<String>>) -> Self {
        Self {
            columns,
            rows,
            header_height: 8.0,
            row_height: 7.0,
            font_size: 9.0,
            header_fill: None,
            zebra: false,
            swatches: Vec::new(),
        }
    }

    pub fn row_height(mut self, height: f32) -> Self {
        self.row_height = height;
        self
    }

    pub fn header_height(mut self, height: f32) -> Self {
        self.header_height = height;
        self
    }

    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn header_fill(mut self, fill: Color, text: Color) -> Self {
        self.header_fill = Some((fill, text));
        self
    }

    pub fn zebra(mut self) -> Self {
        self.zebra = true;
        self
    }

    pub fn swatches(mut self, colors: Vec<Color>) -> Self {
        self.swatches = colors;
        self
    }

    fn place(&self, pager: &mut ReportPaginator) {
        if self.rows.is_empty() {
            return;
        }
        let width = pager.geometry().content_width();
        let text_y = |top: f32, height: f32| top + height * 0.5 + self.font_size * PT_TO_MM * 0.35;

        let at = pager.place_block(self.header_height);
        let header_style = match self.header_fill {
            Some((fill, text)) => {
                pager.rect(at.page, at.x, at.y, width, self.header_height, Some(fill), None);
                TextStyle::new(self.font_size).color(text).bold()
            }
            None => TextStyle::new(self.font_size).bold(),
        };
        for column in &self.columns {
            let y = text_y(at.y, self.header_height);
            pager.text(at.page, at.x + column.offset, y, &column.title, header_style);
        }

        let cell_style = TextStyle::new(self.font_size).color(Color::gray(35));
        for (i, row) in self.rows.iter().enumerate() {
            let at = pager.place_block(self.row_height);
            if self.zebra && i % 2 == 0 {
                pager.rect(at.page, at.x, at.y, width, self.row_height, Some(Color::CARD), None);
            }
            if let Some(swatch) = self.swatches.get(i) {
                let side = self.row_height * 0.5;
                let y = at.y + (self.row_height - side) / 2.0;
                pager.rect(at.page, at.x, y, side, side, Some(*swatch), None);
            }
            for (column, cell) in self.columns.iter().zip(row) {
                let y = text_y(at.y, self.row_height);
                pager.text(at.page, at.x + column.offset, y, cell, cell_style);
            }
        }
        pager.place_block(Self::GAP_AFTER);
    }
}

// ─── Chart ──────────────────────────────────────────────────────────────────

/// Rasterized chart with a section bar. Height follows the bitmap's
/// aspect ratio at the target width.
#[derive(Debug, Clone)]
pub struct Chart {
    pub selector: String,
    pub title: String,
}

impl Chart {
    const GAP_AFTER: f32 = 10.0;

    pub fn new(selector: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            title: title.into(),
        }
    }

    /// Total block height for `image` drawn `target_width` wide.
    pub fn block_height(image: &RasterImage, target_width: f32) -> f32 {
        BAR_HEIGHT + 2.0 + image.scaled_height(target_width) + Self::GAP_AFTER
    }

    pub(crate) fn place(&self, pager: &mut ReportPaginator, image: &RasterImage, target_width: f32) {
        let at = pager.place_block(Self::block_height(image, target_width));
        draw_bar(pager, at.page, at.x, at.y, &self.title);
        let image_y = at.y + BAR_HEIGHT + 2.0;
        let height = image.scaled_height(target_width);
        pager.image(at.page, at.x, image_y, target_width, height, image.pixels());
    }
}
