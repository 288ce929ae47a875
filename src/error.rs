//! Error types for the pdf2png library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`Pdf2PngError`] — **Fatal**: the run cannot proceed at all (bad
//!   arguments, missing or unreadable source, unparseable PDF, no PDFium
//!   library). Returned as `Err(Pdf2PngError)` from [`crate::convert()`].
//!
//! * [`PageError`] — **Non-fatal**: a single page could not be fetched,
//!   rasterised or written, but every other page is still attempted. Stored
//!   in [`crate::output::ConversionReport`] as a
//!   [`crate::output::PageFailure`].

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pdf2png library.
#[derive(Debug, Error)]
pub enum Pdf2PngError {
    // ── Argument errors ───────────────────────────────────────────────────
    /// A required argument was missing or empty.
    #[error("Both '--source' and '--destination' arguments are required.")]
    MissingArgument,

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Input errors ──────────────────────────────────────────────────────
    /// Source file was not found at the given path.
    #[error("File {} does not exist", .path.display())]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the source.
    #[error("Permission denied reading '{}'", .path.display())]
    PermissionDenied { path: PathBuf },

    /// Source could not be opened for another reason.
    #[error("Failed to open '{}': {source}", .path.display())]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{}'\nFirst bytes: {magic:?}", .path.display())]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    // ── Destination errors ────────────────────────────────────────────────
    /// The destination directory is missing and could not be created, or
    /// its absolute path could not be resolved.
    #[error("Destination '{}' is unavailable: {source}", .path.display())]
    DestinationUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The destination exists but is not a directory.
    #[error("Destination '{}' is not a directory", .path.display())]
    DestinationNotADirectory { path: PathBuf },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("Error opening PDF '{}': {detail}", .path.display())]
    CorruptPdf { path: PathBuf, detail: String },

    /// PDF requires a password but none was provided.
    #[error("PDF '{}' is encrypted and requires a password.\nProvide it with --password <PASSWORD>.", .path.display())]
    PasswordRequired { path: PathBuf },

    /// A password was provided but it is wrong.
    #[error("Wrong password for PDF '{}'", .path.display())]
    WrongPassword { path: PathBuf },

    // ── Pdfium binding errors ─────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
Place libpdfium next to the working directory, install it on the system\n\
library path, or set PDFIUM_LIB_PATH=/path/to/libpdfium.\n"
    )]
    PdfiumBindingFailed(String),
}

/// A non-fatal error for a single page.
///
/// The `Display` output is the `reason` recorded in the JSON report, so the
/// wording is part of the tool's output contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    /// The page object could not be obtained from the document.
    #[error("Error getting page {page}: {detail}")]
    FetchFailed { page: usize, detail: String },

    /// The page was fetched but rasterisation failed.
    #[error("Error creating image from page {page}: {detail}")]
    RenderFailed { page: usize, detail: String },

    /// The image was rendered but could not be written to disk.
    #[error("Error creating image from page {page}: failed to write '{}': {detail}", .path.display())]
    WriteFailed {
        page: usize,
        path: PathBuf,
        detail: String,
    },
}

impl PageError {
    /// 1-based page number the error belongs to.
    pub fn page(&self) -> usize {
        match self {
            PageError::FetchFailed { page, .. }
            | PageError::RenderFailed { page, .. }
            | PageError::WriteFailed { page, .. } => *page,
        }
    }
}
