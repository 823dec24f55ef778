//! Backend that shells out to ImageMagick and the usual optimizers.
//!
//! | Operation | Command |
//! |---|---|
//! | Resize | `convert -resize WxH <source> <output>` |
//! | Optimize JPEG | `jpegoptim --strip-all --quiet <path>` |
//! | Optimize PNG | `optipng -quiet -strip all <path>` |
//!
//! Each command runs to completion with no timeout. A non-zero exit status
//! is reported as [`BackendError::ToolFailed`].

use super::backend::{BackendError, ImageBackend};
use crate::types::Dimension;
use std::ffi::OsStr;
use std::path::Path;
use std::process::Command;

/// Program names, overridable for unusual installs (e.g. `magick`).
#[derive(Debug, Clone)]
pub struct MagickBackend {
    pub convert: String,
    pub jpegoptim: String,
    pub optipng: String,
}

impl MagickBackend {
    pub fn new() -> Self {
        Self {
            convert: "convert".to_string(),
            jpegoptim: "jpegoptim".to_string(),
            optipng: "optipng".to_string(),
        }
    }
}

impl Default for MagickBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Run `tool` with `args`, blocking until it exits.
fn run<I, S>(tool: &str, args: I) -> Result<(), BackendError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let status = Command::new(tool)
        .args(args)
        .status()
        .map_err(|source| BackendError::Spawn {
            tool: tool.to_string(),
            source,
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(BackendError::ToolFailed {
            tool: tool.to_string(),
            status,
        })
    }
}

impl ImageBackend for MagickBackend {
    fn resize(&self, source: &Path, output: &Path, max: Dimension) -> Result<(), BackendError> {
        let geometry = max.to_string();
        run(
            &self.convert,
            [
                OsStr::new("-resize"),
                OsStr::new(&geometry),
                source.as_os_str(),
                output.as_os_str(),
            ],
        )
    }

    fn optimize(&self, path: &Path) -> Result<(), BackendError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "jpg" | "jpeg" => run(
                &self.jpegoptim,
                [
                    OsStr::new("--strip-all"),
                    OsStr::new("--quiet"),
                    path.as_os_str(),
                ],
            ),
            "png" => run(
                &self.optipng,
                [
                    OsStr::new("-quiet"),
                    OsStr::new("-strip"),
                    OsStr::new("all"),
                    path.as_os_str(),
                ],
            ),
            _ => {
                log::debug!("No optimizer for \"{}\", leaving as-is", path.display());
                Ok(())
            }
        }
    }
}
