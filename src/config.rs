//! Run configuration for a PDF-to-PNG conversion.
//!
//! All run behaviour is controlled through [`RunConfig`], built via its
//! [`RunConfigBuilder`]. The config is immutable once built and is passed
//! explicitly to every pipeline stage; there is no process-wide state.

use crate::error::Pdf2PngError;
use std::fmt;
use std::path::{Path, PathBuf};

/// Default output image width in pixels.
pub const DEFAULT_WIDTH: u32 = 400;

/// Configuration for one conversion run.
///
/// # Example
/// ```rust
/// use pdf2png::RunConfig;
///
/// let config = RunConfig::builder()
///     .source("document.pdf")
///     .destination("out")
///     .width(800)
///     .build()
///     .unwrap();
/// assert_eq!(config.width, 800);
/// ```
#[derive(Clone)]
pub struct RunConfig {
    /// Path of the PDF to convert. Must be non-empty.
    pub source: PathBuf,

    /// Folder receiving `page_<N>.png` files. Default: `.`.
    ///
    /// Created (single level, not recursively) when it does not exist.
    pub destination: PathBuf,

    /// Output image width in pixels. Default: 400.
    ///
    /// Height follows the page's aspect ratio.
    pub width: u32,

    /// Print a JSON report to stdout after the run. Default: false.
    pub json_output: bool,

    /// PDF user password for encrypted documents.
    pub password: Option<String>,

    /// Zero-pad page numbers in output file names to the width of the page
    /// count, so that `page_02.png` sorts before `page_10.png`. Default: false.
    pub zero_pad: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            destination: PathBuf::from("."),
            width: DEFAULT_WIDTH,
            json_output: false,
            password: None,
            zero_pad: false,
        }
    }
}

impl fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunConfig")
            .field("source", &self.source)
            .field("destination", &self.destination)
            .field("width", &self.width)
            .field("json_output", &self.json_output)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("zero_pad", &self.zero_pad)
            .finish()
    }
}

impl RunConfig {
    /// Create a new builder for `RunConfig`.
    pub fn builder() -> RunConfigBuilder {
        RunConfigBuilder {
            config: Self::default(),
        }
    }

    /// File name for a 1-based page number, given the document's page count.
    pub fn page_file_name(&self, page_num: usize, page_count: usize) -> String {
        if self.zero_pad {
            let digits = page_count.max(1).to_string().len();
            format!("page_{page_num:0digits$}.png")
        } else {
            format!("page_{page_num}.png")
        }
    }
}

/// Builder for [`RunConfig`].
#[derive(Debug)]
pub struct RunConfigBuilder {
    config: RunConfig,
}

impl RunConfigBuilder {
    pub fn source(mut self, path: impl AsRef<Path>) -> Self {
        self.config.source = path.as_ref().to_path_buf();
        self
    }

    pub fn destination(mut self, path: impl AsRef<Path>) -> Self {
        self.config.destination = path.as_ref().to_path_buf();
        self
    }

    pub fn width(mut self, width: u32) -> Self {
        self.config.width = width;
        self
    }

    pub fn json_output(mut self, v: bool) -> Self {
        self.config.json_output = v;
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn zero_pad(mut self, v: bool) -> Self {
        self.config.zero_pad = v;
        self
    }

    /// Build the configuration, validating constraints.
    ///
    /// Only checks that need no filesystem access live here; existence of the
    /// source and creation of the destination happen in
    /// [`crate::pipeline::input`].
    pub fn build(self) -> Result<RunConfig, Pdf2PngError> {
        let c = &self.config;
        if c.source.as_os_str().is_empty() || c.destination.as_os_str().is_empty() {
            return Err(Pdf2PngError::MissingArgument);
        }
        // pdfium takes the target width as a signed 32-bit pixel count.
        if c.width == 0 || c.width > i32::MAX as u32 {
            return Err(Pdf2PngError::InvalidConfig(format!(
                "Width must be between 1 and {}, got {}",
                i32::MAX,
                c.width
            )));
        }
        Ok(self.config)
    }
}
