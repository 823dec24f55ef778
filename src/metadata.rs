//! Image captions from sidecar text files.
//!
//! A caption for `photos/beach.jpg` lives in `photos/beach.jpg.txt` (the
//! full filename plus `.txt`). Only the first line is used, trimmed.
//!
//! Caption files are optional. A missing file is normal and silent; a file
//! that exists but cannot be read or is not valid UTF-8 is logged as a
//! warning. Either way the image simply has no caption and the run goes on.

use crate::gallery::Image;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const CAPTION_EXTENSION: &str = ".txt";

/// Path of the caption file belonging to an image.
pub fn caption_path(image: &Image) -> PathBuf {
    image
        .directory()
        .join(format!("{}{CAPTION_EXTENSION}", image.filename()))
}

/// Load the caption for an image, or `None`.
pub fn load_caption(image: &Image) -> Option<String> {
    read_first_line(&caption_path(image))
}

/// Read the first line of a UTF-8 text file, trimmed.
///
/// Returns `None` if the file is missing, unreadable, not UTF-8, or its
/// first line is blank.
pub fn read_first_line(path: &Path) -> Option<String> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::debug!("No caption file \"{}\"", path.display());
            return None;
        }
        Err(e) => {
            log::warn!("Ignoring caption file \"{}\": {}", path.display(), e);
            return None;
        }
    };

    text.lines()
        .next()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
}
