//! PNG encoding: write a rasterised page to its output path.
//!
//! The image is encoded into a temporary file inside the destination
//! directory and then renamed over the target, so a failed write never
//! leaves a truncated `page_<N>.png` behind and re-runs replace old images
//! in one step.

use image::{DynamicImage, ImageFormat};
use std::io;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Encode `img` as PNG and atomically place it at `path`.
pub fn write_png(img: &DynamicImage, path: &Path) -> io::Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = NamedTempFile::new_in(dir)?;
    img.write_to(tmp.as_file_mut(), ImageFormat::Png)
        .map_err(io::Error::other)?;
    tmp.persist(path).map_err(|e| e.error)?;

    debug!(
        "Wrote {}x{} PNG → {}",
        img.width(),
        img.height(),
        path.display()
    );
    Ok(())
}
