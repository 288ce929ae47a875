//! Progress-callback trait for per-page conversion events.
//!
//! Pass a `&dyn ConversionProgressCallback` to [`crate::convert()`] to receive
//! events as the page loop runs. Pages are processed sequentially on the
//! calling thread, so events arrive in page order and never concurrently.
//!
//! # Example
//!
//! ```rust
//! use pdf2png::{ConversionProgressCallback, PageError};
//! use std::cell::Cell;
//! use std::path::Path;
//!
//! struct FailureCounter {
//!     failed: Cell<usize>,
//! }
//!
//! impl ConversionProgressCallback for FailureCounter {
//!     fn on_page_error(&self, _page_num: usize, _total_pages: usize, error: &PageError) {
//!         self.failed.set(self.failed.get() + 1);
//!         eprintln!("{error}");
//!     }
//! }
//!
//! let counter = FailureCounter { failed: Cell::new(0) };
//! counter.on_conversion_start(Path::new("/tmp/out"), 3);
//! ```

use crate::error::PageError;
use std::path::Path;

/// Called by the page loop as it processes each page.
///
/// All methods have default no-op implementations so callers only override
/// what they care about.
pub trait ConversionProgressCallback {
    /// Called once, after the document is loaded and before any page is
    /// rendered.
    ///
    /// # Arguments
    /// * `destination` — absolute output directory
    /// * `total_pages` — number of pages that will be attempted
    fn on_conversion_start(&self, destination: &Path, total_pages: usize) {
        let _ = (destination, total_pages);
    }

    /// Called just before a page is fetched.
    fn on_page_start(&self, page_num: usize, total_pages: usize) {
        let _ = (page_num, total_pages);
    }

    /// Called when a page image has been written.
    ///
    /// # Arguments
    /// * `page_num`    — 1-indexed page number
    /// * `total_pages` — total pages
    /// * `output`      — path of the written PNG
    fn on_page_complete(&self, page_num: usize, total_pages: usize, output: &Path) {
        let _ = (page_num, total_pages, output);
    }

    /// Called when a page fails; the run continues with the next page.
    fn on_page_error(&self, page_num: usize, total_pages: usize, error: &PageError) {
        let _ = (page_num, total_pages, error);
    }

    /// Called once after all pages have been attempted.
    fn on_conversion_complete(&self, total_pages: usize, success_count: usize) {
        let _ = (total_pages, success_count);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}
