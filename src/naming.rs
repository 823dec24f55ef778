//! Names derived from a source image path.
//!
//! Every artifact the gallery writes for one image is named from the source
//! file's final path segment, so this is the single place that decides those
//! names. Nothing here touches the filesystem.
//!
//! ## Derived names
//!
//! For `photos/2019/beach.day.jpg`:
//!
//! | Field | Value |
//! |---|---|
//! | `directory` | `photos/2019` |
//! | `filename` | `beach.day.jpg` |
//! | `basename` | `beach.day` |
//! | `extension` | `.jpg` |
//! | `thumbnail_filename` | `beach.day_t.jpg` |
//! | `page_name` | `beach.day` |
//!
//! Only the last extension segment is stripped, and a file whose name is
//! nothing but a leading dot (`.hidden`) has no extension at all.

use std::path::{Path, PathBuf};

/// Inserted between basename and extension to name the thumbnail.
pub const THUMBNAIL_SUFFIX: &str = "_t";

/// Names derived from one source path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageName {
    /// Containing directory (empty for a bare file name).
    pub directory: PathBuf,
    /// Final path segment.
    pub filename: String,
    /// Filename without its final extension.
    pub basename: String,
    /// Final extension including the leading dot, or empty.
    pub extension: String,
    /// `{basename}_t{extension}`
    pub thumbnail_filename: String,
    /// Stem of the HTML page for this image.
    pub page_name: String,
}

/// Derive all names for a source image path.
pub fn derive_names(source: &Path) -> ImageName {
    let directory = source.parent().map(Path::to_path_buf).unwrap_or_default();
    let filename = file_name(source);
    let (basename, extension) = split_extension(&filename);

    ImageName {
        directory,
        thumbnail_filename: thumbnail_filename(basename, extension),
        page_name: basename.to_string(),
        basename: basename.to_string(),
        extension: extension.to_string(),
        filename,
    }
}

/// Final path segment as a string, empty if the path has none.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Split `name` into `(base, extension)` at the last dot.
///
/// - `"photo.jpg"` → `("photo", ".jpg")`
/// - `"archive.tar.gz"` → `("archive.tar", ".gz")`
/// - `"README"` → `("README", "")`
/// - `".hidden"` → `(".hidden", "")`
/// - `"trailing."` → `("trailing", ".")`
pub fn split_extension(name: &str) -> (&str, &str) {
    let leading_dots = name.len() - name.trim_start_matches('.').len();
    match name.rfind('.') {
        Some(pos) if pos >= leading_dots => name.split_at(pos),
        _ => (name, ""),
    }
}

pub fn thumbnail_filename(basename: &str, extension: &str) -> String {
    format!("{basename}{THUMBNAIL_SUFFIX}{extension}")
}
