//! The in-memory gallery: ordered, linked image records.
//!
//! A [`Gallery`] is assembled once per run from the (already de-duplicated)
//! source paths:
//!
//! 1. Sort the paths by their string form, ascending and case-sensitive.
//! 2. Derive names for each path ([`crate::naming`]).
//! 3. Link neighbors with [`link`]: each record learns the index of the
//!    record before and after it.
//!
//! Neighbor links are indices into [`Gallery::images`], not references, so
//! the gallery is the sole owner of every record and there are no cycles.
//! Records are values: attaching a caption or links builds a new record
//! instead of editing one in place, and the order never changes after
//! linking.

use crate::naming::{ImageName, derive_names};
use crate::types::Dimension;
use std::path::{Path, PathBuf};

/// One source photo and everything derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    source: PathBuf,
    names: ImageName,
    caption: Option<String>,
    previous: Option<usize>,
    next: Option<usize>,
}

impl Image {
    /// Create an unlinked, uncaptioned record for a source path.
    pub fn new(source: impl Into<PathBuf>) -> Self {
        let source = source.into();
        let names = derive_names(&source);
        Self {
            source,
            names,
            caption: None,
            previous: None,
            next: None,
        }
    }

    /// Same record, with the given caption.
    pub fn with_caption(self, caption: Option<String>) -> Self {
        Self { caption, ..self }
    }

    /// Same record, with the given neighbor indices.
    pub fn with_neighbors(self, previous: Option<usize>, next: Option<usize>) -> Self {
        Self {
            previous,
            next,
            ..self
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn directory(&self) -> &Path {
        &self.names.directory
    }

    pub fn filename(&self) -> &str {
        &self.names.filename
    }

    pub fn basename(&self) -> &str {
        &self.names.basename
    }

    pub fn extension(&self) -> &str {
        &self.names.extension
    }

    pub fn thumbnail_filename(&self) -> &str {
        &self.names.thumbnail_filename
    }

    pub fn page_name(&self) -> &str {
        &self.names.page_name
    }

    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    /// Index of the previous image in the gallery, if any.
    pub fn previous(&self) -> Option<usize> {
        self.previous
    }

    /// Index of the next image in the gallery, if any.
    pub fn next(&self) -> Option<usize> {
        self.next
    }
}

/// Assign previous/next links from array adjacency.
///
/// Record `i` gets `previous = i - 1` (none for the first) and
/// `next = i + 1` (none for the last). Empty input yields empty output.
pub fn link(images: Vec<Image>) -> Vec<Image> {
    let last = images.len().saturating_sub(1);
    images
        .into_iter()
        .enumerate()
        .map(|(i, image)| {
            let previous = i.checked_sub(1);
            let next = (i < last).then_some(i + 1);
            image.with_neighbors(previous, next)
        })
        .collect()
}

/// Gallery-wide settings, fixed before any image is added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryOptions {
    pub title: Option<String>,
    pub destination: PathBuf,
    pub max_image_size: Dimension,
    pub max_thumbnail_size: Dimension,
    /// Resize full images; when false they are copied unmodified.
    pub resize: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gallery {
    options: GalleryOptions,
    images: Vec<Image>,
}

impl Gallery {
    /// Sort `sources`, build a record for each and link them.
    pub fn new<P: AsRef<Path>>(options: GalleryOptions, sources: &[P]) -> Self {
        let mut sorted: Vec<&Path> = sources.iter().map(AsRef::as_ref).collect();
        sorted.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));

        let images = link(sorted.into_iter().map(Image::new).collect());
        Self { options, images }
    }

    /// Attach a caption to every image, keeping order and links.
    pub fn with_captions(self, mut caption_for: impl FnMut(&Image) -> Option<String>) -> Self {
        let images = self
            .images
            .into_iter()
            .map(|image| {
                let caption = caption_for(&image);
                image.with_caption(caption)
            })
            .collect();
        Self { images, ..self }
    }

    pub fn options(&self) -> &GalleryOptions {
        &self.options
    }

    pub fn title(&self) -> Option<&str> {
        self.options.title.as_deref()
    }

    pub fn destination(&self) -> &Path {
        &self.options.destination
    }

    pub fn images(&self) -> &[Image] {
        &self.images
    }

    pub fn previous_of(&self, image: &Image) -> Option<&Image> {
        image.previous.and_then(|i| self.images.get(i))
    }

    pub fn next_of(&self, image: &Image) -> Option<&Image> {
        image.next.and_then(|i| self.images.get(i))
    }

    /// Every image with its neighbors: `(previous, image, next)`.
    pub fn windows(&self) -> impl Iterator<Item = (Option<&Image>, &Image, Option<&Image>)> {
        self.images
            .iter()
            .map(|image| (self.previous_of(image), image, self.next_of(image)))
    }
}
