//! # pdf2png
//!
//! Rasterise every page of a PDF document into a PNG image.
//!
//! Parsing and rendering are delegated to [PDFium] through `pdfium-render`;
//! this crate owns the orchestration around it: argument validation, opening
//! the source, a sequential page loop that records per-page failures instead
//! of aborting, and a serialisable run report.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Input   check source, create destination, open file
//!  ├─ 2. Load    bind pdfium, parse document, read page count
//!  ├─ 3. Render  page_1.png … page_N.png at the configured width
//!  └─ 4. Report  ConversionReport { source, pages, author, errors }
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2png::{convert, NoopProgressCallback, RunConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RunConfig::builder()
//!         .source("document.pdf")
//!         .destination("pages")
//!         .width(800)
//!         .build()?;
//!     let report = convert(&config, &NoopProgressCallback)?;
//!     println!("{}", serde_json::to_string_pretty(&report)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2png` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! [PDFium]: https://pdfium.googlesource.com/pdfium/

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{RunConfig, RunConfigBuilder, DEFAULT_WIDTH};
pub use convert::{convert, convert_document};
pub use error::{PageError, Pdf2PngError};
pub use output::{ConversionReport, PageFailure};
pub use pipeline::load::{DocumentHandle, PdfiumEngine, Rasterizer};
pub use progress::{ConversionProgressCallback, NoopProgressCallback};
