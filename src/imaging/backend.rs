//! Image backend trait and shared error type.
//!
//! The [`ImageBackend`] trait is the narrow capability the media pipeline
//! needs: resize a file into a bounding box, and optimize a file in place.
//! Every call either fully succeeds or returns an error; callers treat any
//! error as fatal for the run.
//!
//! Production implementations are
//! [`RustBackend`](super::rust_backend::RustBackend) and
//! [`MagickBackend`](super::magick_backend::MagickBackend).

use crate::types::Dimension;
use std::path::Path;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
    #[error("Could not run `{tool}`: {source}")]
    Spawn {
        tool: String,
        source: std::io::Error,
    },
    #[error("`{tool}` exited with {status}")]
    ToolFailed { tool: String, status: ExitStatus },
}

/// Trait for image processing backends.
pub trait ImageBackend {
    /// Write a copy of `source` to `output`, scaled to fit inside `max`
    /// with its aspect ratio kept. Overwrites `output`.
    fn resize(&self, source: &Path, output: &Path, max: Dimension) -> Result<(), BackendError>;

    /// Losslessly strip metadata from (and shrink) `path` in place.
    fn optimize(&self, path: &Path) -> Result<(), BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mock backend that records operations instead of decoding images.
    ///
    /// Resizes write a small marker file so callers can check what landed
    /// on disk. A source path containing `fail_on` makes resize fail.
    #[derive(Default)]
    pub struct MockBackend {
        pub operations: Mutex<Vec<RecordedOp>>,
        pub fail_on: Option<String>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Resize {
            source: String,
            output: String,
            width: u32,
            height: u32,
        },
        Optimize(String),
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn failing_on(pattern: &str) -> Self {
            Self {
                fail_on: Some(pattern.to_string()),
                ..Self::default()
            }
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }
    }

    impl ImageBackend for MockBackend {
        fn resize(&self, source: &Path, output: &Path, max: Dimension) -> Result<(), BackendError> {
            let source_str = source.to_string_lossy().to_string();
            self.operations.lock().unwrap().push(RecordedOp::Resize {
                source: source_str.clone(),
                output: output.to_string_lossy().to_string(),
                width: max.width,
                height: max.height,
            });

            let should_fail = self
                .fail_on
                .as_deref()
                .is_some_and(|pattern| source_str.contains(pattern));
            if should_fail {
                return Err(BackendError::ProcessingFailed(format!(
                    "mock failure for {source_str}"
                )));
            }

            std::fs::write(output, format!("resized to {max}"))?;
            Ok(())
        }

        fn optimize(&self, path: &Path) -> Result<(), BackendError> {
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::Optimize(path.to_string_lossy().to_string()));
            Ok(())
        }
    }

    #[test]
    fn mock_records_resize() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("out.jpg");
        let backend = MockBackend::new();

        backend
            .resize(Path::new("/source.jpg"), &out, Dimension::new(800, 600))
            .unwrap();

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(
            &ops[0],
            RecordedOp::Resize {
                width: 800,
                height: 600,
                ..
            }
        ));
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "resized to 800x600");
    }

    #[test]
    fn mock_fails_on_pattern() {
        let dir = tempfile::TempDir::new().unwrap();
        let backend = MockBackend::failing_on("bad");
        let result = backend.resize(
            Path::new("/bad.jpg"),
            &dir.path().join("bad.jpg"),
            Dimension::new(10, 10),
        );
        assert!(matches!(result, Err(BackendError::ProcessingFailed(_))));
    }

    #[test]
    fn mock_records_optimize() {
        let backend = MockBackend::new();
        backend.optimize(Path::new("/out/a.jpg")).unwrap();
        assert_eq!(
            backend.get_operations(),
            vec![RecordedOp::Optimize("/out/a.jpg".to_string())]
        );
    }
}
