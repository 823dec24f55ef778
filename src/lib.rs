//! # Gallerize
//!
//! Turn a list of image files into a static HTML gallery: one page per image
//! with previous/next links, an index page of thumbnails, and a stylesheet,
//! all written flat into one destination directory.
//!
//! # Pipeline
//!
//! A run is a single pass, driven by [`pipeline`]:
//!
//! ```text
//! 1. Check       sources         →  abort on clashing file names
//! 2. Assemble    sources         →  Gallery (sorted, named, linked, captioned)
//! 3. Process     Gallery         →  dest/{name}.{ext}, dest/{name}_t.{ext}
//! 4. Render      Gallery         →  dest/{name}.html, dest/index.html
//! 5. Static      bundled assets  →  dest/style.css (+ optional extra files)
//! ```
//!
//! `--html-only` skips steps 3 and 5.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | `Dimension` (`WxH`) parsing |
//! | [`naming`] | Derived names per source: basename, extension, thumbnail file, page name |
//! | [`duplicates`] | Guard against two sources sharing a destination file name |
//! | [`gallery`] | `Image` records, sorting and previous/next linking |
//! | [`metadata`] | Caption sidecar files (`photo.jpg.txt`) |
//! | [`imaging`] | `ImageBackend` trait, pure-Rust and ImageMagick backends, JPEG stripping |
//! | [`process`] | Full-size images and thumbnails |
//! | [`generate`] | HTML pages through a `TemplateEngine`, bundled Maud templates, static files |
//! | [`config`] | Run switches and default sizes |
//! | [`pipeline`] | One generate pass, start to finish |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Index-Based Neighbors
//!
//! Each [`gallery::Image`] stores the positions of its neighbors, not the
//! neighbors themselves. The [`gallery::Gallery`] owns every image and
//! resolves positions on demand, so there are no reference cycles and images
//! stay plain immutable values.
//!
//! ## Pluggable Backends and Templates
//!
//! Image work goes through [`imaging::ImageBackend`] and page rendering
//! through [`generate::TemplateEngine`]. Both are passed in explicitly. The
//! default backend is pure Rust (`image` + `oxipng`); `--backend imagemagick`
//! shells out to `convert`, `jpegoptim` and `optipng` instead.
//!
//! ## Maud Templates
//!
//! The built-in templates are [Maud](https://maud.lambda.xyz/) macros:
//! checked at compile time and auto-escaped, with no template files to ship.
//! The stylesheet is embedded the same way.
//!
//! ## Fail Fast
//!
//! The first error ends the run. Output already written is left in place and
//! every file is overwritten on the next run.

pub mod config;
pub mod duplicates;
pub mod gallery;
pub mod generate;
pub mod imaging;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod process;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
