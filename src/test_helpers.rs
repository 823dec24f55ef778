//! Shared test utilities: gallery options, source files and fixture
//! galleries rooted in a temp directory.

use crate::config::{DEFAULT_MAX_IMAGE_SIZE, DEFAULT_MAX_THUMBNAIL_SIZE};
use crate::gallery::{Gallery, GalleryOptions};
use std::path::{Path, PathBuf};

/// Options with default sizes, resizing on, destination `out`.
pub fn test_options() -> GalleryOptions {
    GalleryOptions {
        title: Some("Test Gallery".to_string()),
        destination: PathBuf::from("out"),
        max_image_size: DEFAULT_MAX_IMAGE_SIZE,
        max_thumbnail_size: DEFAULT_MAX_THUMBNAIL_SIZE,
        resize: true,
    }
}

/// Write placeholder source files under `root/src` and return their paths
/// in the given order.
pub fn write_sources(root: &Path, names: &[&str]) -> Vec<PathBuf> {
    let src = root.join("src");
    std::fs::create_dir_all(&src).unwrap();
    names
        .iter()
        .map(|name| {
            let path = src.join(name);
            std::fs::write(&path, format!("source bytes of {name}")).unwrap();
            path
        })
        .collect()
}

/// Build a gallery whose destination `root/out` already exists.
pub fn gallery_in(root: &Path, sources: &[PathBuf], resize: bool) -> Gallery {
    let destination = root.join("out");
    std::fs::create_dir_all(&destination).unwrap();
    let options = GalleryOptions {
        destination,
        resize,
        ..test_options()
    };
    Gallery::new(options, sources)
}
