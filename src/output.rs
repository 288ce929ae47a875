//! Result types produced by a conversion run.

use crate::error::PageError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Summary of one run, serialised as the `--json` report.
///
/// `author` and `errors` are omitted from the JSON when empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionReport {
    /// Source path as given by the caller.
    pub source: PathBuf,

    /// Total pages in the document.
    pub pages: usize,

    /// Author metadata tag, if the document carries a non-empty one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Per-page failures in page order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<PageFailure>,

    /// Absolute destination directory. Printed as text, not part of the JSON.
    #[serde(skip)]
    pub destination: PathBuf,
}

impl ConversionReport {
    /// Number of pages written without error.
    pub fn succeeded(&self) -> usize {
        self.pages.saturating_sub(self.errors.len())
    }
}

/// A failed page as it appears in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageFailure {
    pub page_num: usize,
    pub reason: String,
}

impl From<&PageError> for PageFailure {
    fn from(e: &PageError) -> Self {
        Self {
            page_num: e.page(),
            reason: e.to_string(),
        }
    }
}
