//! Input resolution: validate the source PDF and prepare the destination.
//!
//! Existence of the source is checked before the destination is touched, so
//! a run with a missing source never creates a directory. The magic bytes
//! (`%PDF`) are validated before pdfium sees the file so callers get a
//! meaningful error rather than a generic parse failure.

use crate::error::Pdf2PngError;
use std::fs::File;
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

/// Fail with [`Pdf2PngError::FileNotFound`] unless `path` exists.
///
/// A `stat` failure other than "not found" (e.g. a parent directory without
/// search permission) is reported as such, not as a missing file.
pub fn check_source_exists(path: &Path) -> Result<(), Pdf2PngError> {
    let exists = path.try_exists().map_err(|e| match e.kind() {
        ErrorKind::PermissionDenied => Pdf2PngError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => Pdf2PngError::OpenFailed {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    if !exists {
        return Err(Pdf2PngError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Open the source PDF for reading, validating its magic bytes.
///
/// The returned handle is rewound to the start of the file.
pub fn open_source(path: &Path) -> Result<File, Pdf2PngError> {
    let mut file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Pdf2PngError::FileNotFound {
            path: path.to_path_buf(),
        },
        ErrorKind::PermissionDenied => Pdf2PngError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => Pdf2PngError::OpenFailed {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let io_err = |e: std::io::Error| Pdf2PngError::OpenFailed {
        path: path.to_path_buf(),
        source: e,
    };

    // A file shorter than the magic is not a PDF; missing bytes read as zero.
    let mut head = Vec::with_capacity(4);
    file.by_ref().take(4).read_to_end(&mut head).map_err(io_err)?;
    let mut magic = [0u8; 4];
    magic[..head.len()].copy_from_slice(&head);
    if &magic != b"%PDF" {
        return Err(Pdf2PngError::NotAPdf {
            path: path.to_path_buf(),
            magic,
        });
    }
    file.seek(SeekFrom::Start(0)).map_err(io_err)?;

    debug!("Opened source PDF: {}", path.display());
    Ok(file)
}

/// Ensure the destination directory exists and return its absolute path.
///
/// Creates at most one directory level; a missing parent is an error.
pub fn prepare_destination(path: &Path) -> Result<PathBuf, Pdf2PngError> {
    let unavailable = |e: std::io::Error| Pdf2PngError::DestinationUnavailable {
        path: path.to_path_buf(),
        source: e,
    };

    if !path.exists() {
        std::fs::create_dir(path).map_err(unavailable)?;
        info!("Created destination directory: {}", path.display());
    } else if !path.is_dir() {
        return Err(Pdf2PngError::DestinationNotADirectory {
            path: path.to_path_buf(),
        });
    }

    std::path::absolute(path)
        .map(|abs| clean(&abs))
        .map_err(unavailable)
}

/// Lexically normalise an absolute path: drop `.` components and trailing
/// separators, and resolve `..` against the preceding component. Symlinks
/// are not followed.
fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root.
                if out.parent().is_some() {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
