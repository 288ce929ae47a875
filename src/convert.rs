//! Conversion entry points.
//!
//! [`convert`] runs the whole pipeline against pdfium. [`convert_document`]
//! runs the page loop and report assembly against any [`DocumentHandle`],
//! which is how the library is tested without a pdfium library present.

use crate::config::RunConfig;
use crate::error::Pdf2PngError;
use crate::output::{ConversionReport, PageFailure};
use crate::pipeline::load::{DocumentHandle, PdfiumEngine, PdfiumRasterizer, Rasterizer};
use crate::pipeline::{input, render};
use crate::progress::ConversionProgressCallback;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Convert every page of `config.source` into PNG files.
///
/// # Returns
/// `Ok(ConversionReport)` on success, even if some pages failed
/// (check `report.errors`).
///
/// # Errors
/// Returns `Err(Pdf2PngError)` only for fatal errors:
/// - source missing, unreadable or not a PDF
/// - destination cannot be created
/// - pdfium cannot be bound, or the document cannot be parsed
pub fn convert(
    config: &RunConfig,
    progress: &dyn ConversionProgressCallback,
) -> Result<ConversionReport, Pdf2PngError> {
    info!("Starting conversion: {}", config.source.display());

    // ── Step 1: Validate paths ───────────────────────────────────────────
    input::check_source_exists(&config.source)?;
    let destination = input::prepare_destination(&config.destination)?;

    // ── Step 2: Open and parse ───────────────────────────────────────────
    let file = input::open_source(&config.source)?;
    let engine = PdfiumEngine::bind()?;
    let document = engine.open(file, &config.source, config.password.as_deref())?;

    // ── Step 3: Render ───────────────────────────────────────────────────
    let rasterizer = PdfiumRasterizer::new(config.width);
    convert_document(&document, &rasterizer, config, &destination, progress)
}

/// Render an already-opened document into `destination` and build the report.
///
/// `destination` must exist; [`convert`] passes the absolute path produced by
/// [`input::prepare_destination`].
pub fn convert_document<D, R>(
    document: &D,
    rasterizer: &R,
    config: &RunConfig,
    destination: &Path,
    progress: &dyn ConversionProgressCallback,
) -> Result<ConversionReport, Pdf2PngError>
where
    D: DocumentHandle,
    R: Rasterizer<D::Page>,
{
    let start = Instant::now();
    let page_count = document.page_count()?;
    info!("PDF has {} pages", page_count);

    progress.on_conversion_start(destination, page_count);

    let errors = render::render_pages(
        document,
        rasterizer,
        config,
        destination,
        page_count,
        progress,
    );

    let report = ConversionReport {
        source: config.source.clone(),
        pages: page_count,
        author: document.author(),
        errors: errors.iter().map(PageFailure::from).collect(),
        destination: destination.to_path_buf(),
    };

    info!(
        "Conversion complete: {}/{} pages, {}ms total",
        report.succeeded(),
        page_count,
        start.elapsed().as_millis()
    );
    progress.on_conversion_complete(page_count, report.succeeded());

    Ok(report)
}
