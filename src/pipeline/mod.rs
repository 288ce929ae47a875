//! Pipeline stages for PDF-to-PNG conversion.
//!
//! Each submodule implements exactly one step. Stages run sequentially on
//! the calling thread; pdfium document handles are not shared across threads.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ load ──▶ render ──▶ encode
//! (paths)  (pdfium)  (per page)  (PNG file)
//! ```
//!
//! 1. [`input`]  — check the source exists, prepare the destination, open
//!    the source and validate its magic bytes
//! 2. [`load`]   — bind pdfium and parse the document; defines the
//!    [`load::DocumentHandle`] and [`load::Rasterizer`] seams
//! 3. [`render`] — fetch and rasterise pages `1..=N`, collecting per-page
//!    failures
//! 4. [`encode`] — PNG-encode each bitmap and move it into place atomically

pub mod encode;
pub mod input;
pub mod load;
pub mod render;
