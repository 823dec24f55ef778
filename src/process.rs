//! Media pipeline: full-size images and thumbnails.
//!
//! For each image, in gallery order:
//!
//! 1. **Full image** → `{destination}/{filename}`: resized to fit
//!    `max_image_size`, or copied byte-for-byte when resizing is off.
//! 2. **Thumbnail** → `{destination}/{thumbnail_filename}`: always resized to
//!    fit `max_thumbnail_size`.
//!
//! With `optimize` set, every file written is then optimized in place.
//!
//! Processing is sequential and stops at the first failure. Files already
//! written stay where they are; existing destination files are always
//! overwritten, except that a source is never written over itself. A source
//! that already sits at its copy target is left alone (and not optimized);
//! resizing onto a source is an error.

use crate::gallery::{Gallery, Image};
use crate::imaging::{BackendError, ImageBackend};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Failed to copy {source_path} to {output}: {error}")]
    Copy {
        source_path: PathBuf,
        output: PathBuf,
        #[source]
        error: std::io::Error,
    },
    #[error("Failed to create {output}: {error}")]
    Imaging {
        output: PathBuf,
        #[source]
        error: BackendError,
    },
    #[error("Refusing to overwrite source image {0}")]
    OverwritesSource(PathBuf),
    #[error("Failed to optimize {path}: {error}")]
    Optimize {
        path: PathBuf,
        #[source]
        error: BackendError,
    },
}

/// Counts of what the pipeline wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessSummary {
    pub resized: usize,
    pub copied: usize,
    pub thumbnails: usize,
    pub optimized: usize,
}

/// Generate full images and thumbnails for every image in the gallery.
pub fn process_images<B: ImageBackend + ?Sized>(
    gallery: &Gallery,
    backend: &B,
    optimize: bool,
) -> Result<ProcessSummary, ProcessError> {
    let mut summary = ProcessSummary::default();

    for image in gallery.images() {
        let full = generate_image(image, gallery, backend, &mut summary)?;
        if let Some(full) = full.filter(|_| optimize) {
            optimize_file(backend, &full, &mut summary)?;
        }

        let thumbnail = generate_thumbnail(image, gallery, backend)?;
        summary.thumbnails += 1;
        if optimize {
            optimize_file(backend, &thumbnail, &mut summary)?;
        }
    }

    Ok(summary)
}

/// Create the (optionally resized) copy of an image. Returns the path
/// written, or `None` when the source already was the copy.
fn generate_image<B: ImageBackend + ?Sized>(
    image: &Image,
    gallery: &Gallery,
    backend: &B,
    summary: &mut ProcessSummary,
) -> Result<Option<PathBuf>, ProcessError> {
    let output = gallery.destination().join(image.filename());
    let options = gallery.options();
    let in_place = same_file(image.source(), &output);

    if options.resize {
        if in_place {
            return Err(ProcessError::OverwritesSource(output));
        }
        log::info!("Resizing image \"{}\" ...", image.source().display());
        backend
            .resize(image.source(), &output, options.max_image_size)
            .map_err(|error| ProcessError::Imaging {
                output: output.clone(),
                error,
            })?;
        summary.resized += 1;
    } else if in_place {
        log::info!("Image \"{}\" is already in place.", image.source().display());
        summary.copied += 1;
        return Ok(None);
    } else {
        log::info!("Copying image \"{}\" ...", image.source().display());
        std::fs::copy(image.source(), &output).map_err(|error| ProcessError::Copy {
            source_path: image.source().to_path_buf(),
            output: output.clone(),
            error,
        })?;
        summary.copied += 1;
    }

    Ok(Some(output))
}

/// Create the thumbnail for an image. Returns its path.
fn generate_thumbnail<B: ImageBackend + ?Sized>(
    image: &Image,
    gallery: &Gallery,
    backend: &B,
) -> Result<PathBuf, ProcessError> {
    log::info!("Creating thumbnail \"{}\" ...", image.thumbnail_filename());
    let output = gallery.destination().join(image.thumbnail_filename());
    backend
        .resize(image.source(), &output, gallery.options().max_thumbnail_size)
        .map_err(|error| ProcessError::Imaging {
            output: output.clone(),
            error,
        })?;
    Ok(output)
}

/// Whether both paths name the same existing file.
fn same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn optimize_file<B: ImageBackend + ?Sized>(
    backend: &B,
    path: &Path,
    summary: &mut ProcessSummary,
) -> Result<(), ProcessError> {
    log::debug!("Optimizing \"{}\" ...", path.display());
    backend
        .optimize(path)
        .map_err(|error| ProcessError::Optimize {
            path: path.to_path_buf(),
            error,
        })?;
    summary.optimized += 1;
    Ok(())
}
