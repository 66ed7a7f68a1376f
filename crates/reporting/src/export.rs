//! Export driver: walks a report's sections once, in order, awaiting the
//! rasterizer for each chart, then hands the finished document to a writer.
//! A file is only written after every section has been placed and rendered.

use crate::document::{PageGeometry, ReportDocument};
use crate::paginator::ReportPaginator;
use crate::raster::{RasterError, Rasterizer};
use crate::section::Section;
use crate::writer::{DocumentWriter, PdfWriter};
use campaign_core::config::ReportConfig;
use metrics::counter;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("rasterization failed: {0}")]
    Rasterize(#[from] RasterError),

    #[error("render failed: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;

/// Everything needed to produce one report file.
#[derive(Debug, Clone)]
pub struct ReportDefinition {
    pub title: String,
    pub filename: String,
    pub footer: Option<String>,
    pub sections: Vec<Section>,
}

impl ReportDefinition {
    pub fn new(title: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            filename: filename.into(),
            footer: None,
            sections: Vec::new(),
        }
    }

    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    pub fn sections(mut self, sections: impl IntoIterator<Item = Section>) -> Self {
        self.sections.extend(sections);
        self
    }
}

pub struct ReportExporter {
    geometry: PageGeometry,
    chart_width: f32,
    writer: Arc<dyn DocumentWriter>,
}

impl ReportExporter {
    pub fn new(geometry: PageGeometry, chart_width: f32, writer: Arc<dyn DocumentWriter>) -> Self {
        Self {
            geometry,
            chart_width,
            writer,
        }
    }

    pub fn from_config(config: &ReportConfig) -> Self {
        Self::new(
            PageGeometry::from(config),
            config.chart_width_mm,
            Arc::new(PdfWriter::new()),
        )
    }

    /// Charts are drawn at this width, clamped to the content width.
    pub fn chart_width(&self) -> f32 {
        self.chart_width.min(self.geometry.content_width())
    }

    /// Lay out every section. Strictly sequential: a chart's rasterization
    /// completes before anything after it is measured.
    pub async fn export_document(
        &self,
        report: &ReportDefinition,
        rasterizer: &dyn Rasterizer,
    ) -> ExportResult<ReportDocument> {
        let mut pager = ReportPaginator::new(self.geometry);
        let chart_width = self.chart_width();

        for section in &report.sections {
            match section {
                Section::Chart(chart) => match rasterizer.rasterize(&chart.selector).await? {
                    Some(image) => chart.place(&mut pager, &image, chart_width),
                    None => {
                        counter!("reporting.sections_skipped").increment(1);
                        debug!(selector = %chart.selector, "Chart not found, section skipped");
                    }
                },
                other => other.place(&mut pager),
            }
        }

        Ok(pager.finish(report.title.clone(), report.footer.clone()))
    }

    /// Render the report to bytes.
    pub async fn export(
        &self,
        report: &ReportDefinition,
        rasterizer: &dyn Rasterizer,
    ) -> ExportResult<Vec<u8>> {
        let document = self.export_document(report, rasterizer).await?;
        self.writer.write(&document)
    }

    /// Render and save to `dir/<filename>`. The bytes go to a temporary
    /// sibling first and are renamed into place, so either the complete
    /// file exists afterwards or nothing does.
    pub async fn export_to_file(
        &self,
        report: &ReportDefinition,
        rasterizer: &dyn Rasterizer,
        dir: &Path,
    ) -> ExportResult<PathBuf> {
        match self.write_file(report, rasterizer, dir).await {
            Ok(path) => {
                counter!("reporting.exports_completed").increment(1);
                info!(report = %report.title, path = %path.display(), "Report exported");
                Ok(path)
            }
            Err(e) => {
                counter!("reporting.exports_failed").increment(1);
                error!(report = %report.title, error = %e, "Report export failed");
                Err(e)
            }
        }
    }

    async fn write_file(
        &self,
        report: &ReportDefinition,
        rasterizer: &dyn Rasterizer,
        dir: &Path,
    ) -> ExportResult<PathBuf> {
        let bytes = self.export(report, rasterizer).await?;

        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(&report.filename);
        let partial = dir.join(format!(".{}.part", report.filename));

        if let Err(e) = tokio::fs::write(&partial, &bytes).await {
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(e.into());
        }
        if let Err(e) = tokio::fs::rename(&partial, &path).await {
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(e.into());
        }
        Ok(path)
    }
}
