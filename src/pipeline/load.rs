//! Document loading: bind pdfium and open the source as a [`DocumentHandle`].
//!
//! The page loop only talks to the [`DocumentHandle`] and [`Rasterizer`]
//! traits. [`PdfiumDocument`] and [`PdfiumRasterizer`] are the production
//! implementations; tests drive the loop with in-memory fakes.
//!
//! ## Library binding
//!
//! [`PdfiumEngine::bind`] looks for the pdfium shared library in this order:
//!
//! 1. `PDFIUM_LIB_PATH` — explicit path to the library file
//! 2. the platform library name in the current directory
//! 3. the system library search path

use crate::error::Pdf2PngError;
use image::DynamicImage;
use pdfium_render::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// An opened, parsed document.
pub trait DocumentHandle {
    /// Page object handed to the [`Rasterizer`].
    type Page;

    /// Total number of pages in the document.
    fn page_count(&self) -> Result<usize, Pdf2PngError>;

    /// Author metadata, `None` when absent or empty.
    fn author(&self) -> Option<String> {
        None
    }

    /// Fetch a page by 1-based page number.
    fn page(&self, page_num: usize) -> Result<Self::Page, String>;
}

/// Turns a page into a bitmap at a width fixed when the rasteriser was built.
pub trait Rasterizer<P> {
    fn rasterize(&self, page: &P) -> Result<DynamicImage, String>;
}

/// A bound pdfium library. Documents borrow from it.
pub struct PdfiumEngine {
    pdfium: Pdfium,
}

impl PdfiumEngine {
    /// Bind to the pdfium shared library.
    pub fn bind() -> Result<Self, Pdf2PngError> {
        let bindings = match std::env::var_os("PDFIUM_LIB_PATH") {
            Some(path) => {
                let path = PathBuf::from(path);
                debug!("Binding pdfium from PDFIUM_LIB_PATH: {}", path.display());
                Pdfium::bind_to_library(&path)
            }
            None => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
                .or_else(|_| Pdfium::bind_to_system_library()),
        }
        .map_err(|e| Pdf2PngError::PdfiumBindingFailed(format!("{:?}", e)))?;

        Ok(Self {
            pdfium: Pdfium::new(bindings),
        })
    }

    /// Parse the document from an opened source file.
    ///
    /// The file is moved into the returned handle and closed when the handle
    /// is dropped.
    pub fn open<'a>(
        &'a self,
        file: File,
        path: &Path,
        password: Option<&'a str>,
    ) -> Result<PdfiumDocument<'a>, Pdf2PngError> {
        let document = self
            .pdfium
            .load_pdf_from_reader(file, password)
            .map_err(|e| {
                let err_str = format!("{:?}", e);
                if err_str.contains("Password") || err_str.contains("password") {
                    if password.is_some() {
                        Pdf2PngError::WrongPassword {
                            path: path.to_path_buf(),
                        }
                    } else {
                        Pdf2PngError::PasswordRequired {
                            path: path.to_path_buf(),
                        }
                    }
                } else {
                    Pdf2PngError::CorruptPdf {
                        path: path.to_path_buf(),
                        detail: err_str,
                    }
                }
            })?;

        info!("PDF loaded: {}", path.display());
        Ok(PdfiumDocument { document })
    }
}

/// A document parsed by pdfium.
pub struct PdfiumDocument<'a> {
    document: PdfDocument<'a>,
}

impl<'a> DocumentHandle for PdfiumDocument<'a> {
    type Page = PdfPage<'a>;

    fn page_count(&self) -> Result<usize, Pdf2PngError> {
        Ok(self.document.pages().len() as usize)
    }

    fn author(&self) -> Option<String> {
        self.document
            .metadata()
            .get(PdfDocumentMetadataTagType::Author)
            .map(|t| t.value().trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn page(&self, page_num: usize) -> Result<PdfPage<'a>, String> {
        let index = page_num
            .checked_sub(1)
            .and_then(|i| u16::try_from(i).ok())
            .ok_or_else(|| {
                format!("page number {page_num} is outside pdfium's page index range")
            })?;

        self.document
            .pages()
            .get(index)
            .map_err(|e| format!("{:?}", e))
    }
}

/// The single rendering device for a run, configured once with the output
/// width. Height follows each page's aspect ratio.
pub struct PdfiumRasterizer {
    config: PdfRenderConfig,
}

impl PdfiumRasterizer {
    /// `width` must fit in an `i32`; [`crate::RunConfig`] enforces this.
    pub fn new(width: u32) -> Self {
        Self {
            config: PdfRenderConfig::new().set_target_width(width as i32),
        }
    }
}

impl<'a> Rasterizer<PdfPage<'a>> for PdfiumRasterizer {
    fn rasterize(&self, page: &PdfPage<'a>) -> Result<DynamicImage, String> {
        let bitmap = page
            .render_with_config(&self.config)
            .map_err(|e| format!("{:?}", e))?;
        Ok(bitmap.as_image())
    }
}
