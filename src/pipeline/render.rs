//! Page loop: fetch, rasterise and write every page in order.
//!
//! Each page is attempted exactly once. A failure on one page is recorded
//! as a [`PageError`] and the loop moves on; it never aborts the run.

use crate::config::RunConfig;
use crate::error::PageError;
use crate::pipeline::encode;
use crate::pipeline::load::{DocumentHandle, Rasterizer};
use crate::progress::ConversionProgressCallback;
use std::path::Path;
use tracing::{debug, warn};

/// Render pages `1..=page_count` of `document` into `destination`.
///
/// Returns the per-page failures in ascending page order.
pub fn render_pages<D, R>(
    document: &D,
    rasterizer: &R,
    config: &RunConfig,
    destination: &Path,
    page_count: usize,
    progress: &dyn ConversionProgressCallback,
) -> Vec<PageError>
where
    D: DocumentHandle,
    R: Rasterizer<D::Page>,
{
    let mut errors = Vec::new();

    for page_num in 1..=page_count {
        progress.on_page_start(page_num, page_count);
        let output = destination.join(config.page_file_name(page_num, page_count));

        match render_page(document, rasterizer, page_num, &output) {
            Ok(()) => progress.on_page_complete(page_num, page_count, &output),
            Err(e) => {
                warn!("{}", e);
                progress.on_page_error(page_num, page_count, &e);
                errors.push(e);
            }
        }
    }

    errors
}

/// Fetch → rasterise → write a single page.
fn render_page<D, R>(
    document: &D,
    rasterizer: &R,
    page_num: usize,
    output: &Path,
) -> Result<(), PageError>
where
    D: DocumentHandle,
    R: Rasterizer<D::Page>,
{
    let page = document
        .page(page_num)
        .map_err(|detail| PageError::FetchFailed {
            page: page_num,
            detail,
        })?;

    let image = rasterizer
        .rasterize(&page)
        .map_err(|detail| PageError::RenderFailed {
            page: page_num,
            detail,
        })?;
    debug!(
        "Rendered page {} → {}x{} px",
        page_num,
        image.width(),
        image.height()
    );

    encode::write_png(&image, output).map_err(|e| PageError::WriteFailed {
        page: page_num,
        path: output.to_path_buf(),
        detail: e.to_string(),
    })
}
