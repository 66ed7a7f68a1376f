//! Paginated PDF report export: the section layout engine, the chart
//! rasterizer seam, the PDF writer and the four report layouts.

pub mod document;
pub mod export;
pub mod paginator;
pub mod raster;
pub mod section;
pub mod templates;
pub mod writer;

pub use document::{Color, PageGeometry, ReportDocument, TextStyle};
pub use export::{ExportError, ExportResult, ReportDefinition, ReportExporter};
pub use paginator::{Placement, ReportPaginator};
pub use raster::{ChartRasterizer, ChartSpec, RasterError, RasterImage, Rasterizer};
pub use section::Section;
pub use writer::{DocumentWriter, PdfWriter};
