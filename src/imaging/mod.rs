//! Image resizing and optimization backends.
//!
//! | Operation | [`RustBackend`] | [`MagickBackend`] |
//! |---|---|---|
//! | **Resize** | `image` crate, Lanczos3, EXIF orientation applied | `convert -resize WxH` |
//! | **Optimize JPEG** | strip APPn/COM segments ([`jpeg`]) | `jpegoptim --strip-all` |
//! | **Optimize PNG** | `oxipng`, safe chunk stripping | `optipng -strip all` |
//!
//! The module is split into:
//! - **Calculations**: pure dimension math (unit testable)
//! - **Backend**: the [`ImageBackend`] capability trait
//! - **Implementations**: [`RustBackend`] (default) and [`MagickBackend`]

pub mod backend;
mod calculations;
pub mod jpeg;
pub mod magick_backend;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend};
pub use calculations::fit_within;
pub use magick_backend::MagickBackend;
pub use rust_backend::RustBackend;
