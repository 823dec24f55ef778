//! Run configuration.
//!
//! Everything is set from the command line; there is no config file. The
//! gallery-wide values (title, destination, sizes, resize flag) live in
//! [`GalleryOptions`](crate::gallery::GalleryOptions); the switches that
//! only steer which pipeline stages run live here.

use crate::types::Dimension;
use std::path::PathBuf;

/// Default bounding box for full-size images.
pub const DEFAULT_MAX_IMAGE_SIZE: Dimension = Dimension::new(1024, 1024);
/// Default bounding box for thumbnails.
pub const DEFAULT_MAX_THUMBNAIL_SIZE: Dimension = Dimension::new(120, 120);

/// Which stages run and how.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Only (re-)generate HTML; skip images and static files.
    pub html_only: bool,
    /// Strip metadata from every written image.
    pub optimize_images: bool,
    /// Extra directory of static files copied next to the pages.
    pub static_dir: Option<PathBuf>,
}
