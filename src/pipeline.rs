//! One generate pass, start to finish.
//!
//! ```text
//! duplicate + clash checks → gallery (sort + names + links) → captions
//!     → destination dir → images + thumbnails → HTML pages → static files
//! ```
//!
//! The duplicate and output clash checks run before anything touches the
//! filesystem. Every
//! later failure aborts the run as-is; files written up to that point are
//! left behind.

use crate::config::Config;
use crate::duplicates::{
    DuplicateFilenames, OutputClashes, check_duplicate_filenames, check_output_clashes,
};
use crate::gallery::{Gallery, GalleryOptions};
use crate::generate::{
    BUNDLED_STATIC_FILES, GenerateError, INDEX_PAGE_NAME, Renderer, TemplateEngine,
    copy_static_dir, page_filename, write_bundled_files,
};
use crate::imaging::ImageBackend;
use crate::metadata::load_caption;
use crate::process::{ProcessError, ProcessSummary, process_images};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Duplicates(#[from] DuplicateFilenames),
    #[error(transparent)]
    OutputClashes(#[from] OutputClashes),
    #[error("Failed to create destination {path}: {error}")]
    CreateDestination {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },
    #[error(transparent)]
    Process(#[from] ProcessError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
}

/// What a generate pass wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// `None` when media processing was skipped (`--html-only`).
    pub processed: Option<ProcessSummary>,
    pub pages: Vec<PathBuf>,
    pub static_files: Vec<PathBuf>,
}

/// Validate the source list and assemble the captioned, linked gallery.
///
/// Fails before any I/O with [`BuildError::Duplicates`] if two sources share
/// a file name, or with [`BuildError::OutputClashes`] if any two outputs
/// (images, thumbnails, pages, gallery files) would land on the same path.
pub fn create_gallery<P: AsRef<Path>>(
    options: GalleryOptions,
    sources: &[P],
) -> Result<Gallery, BuildError> {
    check_duplicate_filenames(sources)?;
    check_output_clashes(sources, &gallery_files())?;
    Ok(Gallery::new(options, sources).with_captions(load_caption))
}

/// Write everything for a gallery into its destination directory.
pub fn generate_gallery<B, T>(
    gallery: &Gallery,
    config: &Config,
    backend: &B,
    templates: T,
) -> Result<BuildReport, BuildError>
where
    B: ImageBackend + ?Sized,
    T: TemplateEngine,
{
    ensure_destination(gallery.destination())?;

    let processed = if config.html_only {
        log::info!("Skipping image processing (HTML only).");
        None
    } else {
        Some(process_images(gallery, backend, config.optimize_images)?)
    };

    let pages = Renderer::new(templates).render_pages(gallery)?;

    let mut static_files = Vec::new();
    if !config.html_only {
        static_files.extend(write_bundled_files(gallery.destination())?);
        if let Some(dir) = &config.static_dir {
            static_files.extend(copy_static_dir(dir, gallery.destination())?);
        }
    }

    log::info!("Done.");
    Ok(BuildReport {
        processed,
        pages,
        static_files,
    })
}

/// Files every run writes regardless of the sources.
fn gallery_files() -> Vec<String> {
    std::iter::once(page_filename(INDEX_PAGE_NAME))
        .chain(BUNDLED_STATIC_FILES.iter().map(|(name, _)| name.to_string()))
        .collect()
}

fn ensure_destination(path: &Path) -> Result<(), BuildError> {
    if path.is_dir() {
        return Ok(());
    }
    log::info!(
        "Destination path \"{}\" does not exist, creating it.",
        path.display()
    );
    std::fs::create_dir_all(path).map_err(|error| BuildError::CreateDestination {
        path: path.to_path_buf(),
        error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::MaudTemplates;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use crate::test_helpers::{test_options, write_sources};
    use std::fs;
    use tempfile::TempDir;

    fn options_for(dest: &Path) -> GalleryOptions {
        GalleryOptions {
            destination: dest.to_path_buf(),
            ..test_options()
        }
    }

    fn listing(dir: &Path) -> Vec<String> {
        let mut names: Vec<_> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn duplicates_abort_before_touching_disk() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("out");
        let sources = [tmp.path().join("a/IMG.jpg"), tmp.path().join("b/img.JPG")];

        let err = create_gallery(options_for(&dest), &sources).unwrap_err();

        match err {
            BuildError::Duplicates(DuplicateFilenames(groups)) => {
                assert_eq!(groups.len(), 1);
                assert_eq!(groups[0].filename, "img.jpg");
            }
            other => panic!("expected duplicates, got {other:?}"),
        }
        assert!(!dest.exists());
    }

    #[test]
    fn derived_name_clashes_abort_before_touching_disk() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("out");

        for sources in [["a.jpg", "a.png"], ["a.jpg", "a_t.jpg"], ["index.gif", "b.gif"]] {
            let err = create_gallery(options_for(&dest), &sources).unwrap_err();
            assert!(matches!(err, BuildError::OutputClashes(_)), "{sources:?}");
        }
        assert!(!dest.exists());
    }

    #[test]
    fn filename_duplicates_reported_before_clashes() {
        let err = create_gallery(options_for(Path::new("out")), &["x/a.jpg", "y/a.jpg"]).unwrap_err();
        assert!(matches!(err, BuildError::Duplicates(_)));
    }

    #[test]
    fn gallery_files_cover_index_and_stylesheet() {
        assert_eq!(gallery_files(), vec!["index.html", "style.css"]);
    }

    #[test]
    fn create_gallery_loads_captions() {
        let tmp = TempDir::new().unwrap();
        let sources = write_sources(tmp.path(), &["a.jpg", "b.jpg"]);
        fs::write(tmp.path().join("src/b.jpg.txt"), "Bee\nignored").unwrap();

        let gallery = create_gallery(options_for(&tmp.path().join("out")), &sources).unwrap();

        let captions: Vec<_> = gallery.images().iter().map(|i| i.caption()).collect();
        assert_eq!(captions, vec![None, Some("Bee")]);
    }

    #[test]
    fn full_run_writes_flat_destination() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("nested/out");
        let sources = write_sources(tmp.path(), &["c.jpg", "a.jpg", "b.jpg"]);
        let gallery = create_gallery(options_for(&dest), &sources).unwrap();

        let report =
            generate_gallery(&gallery, &Config::default(), &MockBackend::new(), MaudTemplates)
                .unwrap();

        assert_eq!(
            listing(&dest),
            vec![
                "a.html", "a.jpg", "a_t.jpg", "b.html", "b.jpg", "b_t.jpg", "c.html", "c.jpg",
                "c_t.jpg", "index.html", "style.css",
            ]
        );
        assert_eq!(report.pages.len(), 4);
        assert_eq!(report.static_files, vec![dest.join("style.css")]);
        assert_eq!(report.processed.unwrap().thumbnails, 3);
    }

    #[test]
    fn html_only_skips_media_and_static_files() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("out");
        let sources = write_sources(tmp.path(), &["a.jpg"]);
        let gallery = create_gallery(options_for(&dest), &sources).unwrap();
        let backend = MockBackend::new();
        let config = Config {
            html_only: true,
            ..Config::default()
        };

        let report = generate_gallery(&gallery, &config, &backend, MaudTemplates).unwrap();

        assert!(backend.get_operations().is_empty());
        assert_eq!(report.processed, None);
        assert!(report.static_files.is_empty());
        assert_eq!(listing(&dest), vec!["a.html", "index.html"]);
    }

    #[test]
    fn optimize_flag_reaches_backend() {
        let tmp = TempDir::new().unwrap();
        let sources = write_sources(tmp.path(), &["a.jpg"]);
        let gallery = create_gallery(options_for(&tmp.path().join("out")), &sources).unwrap();
        let backend = MockBackend::new();
        let config = Config {
            optimize_images: true,
            ..Config::default()
        };

        generate_gallery(&gallery, &config, &backend, MaudTemplates).unwrap();

        let optimized = backend
            .get_operations()
            .into_iter()
            .filter(|op| matches!(op, RecordedOp::Optimize(_)))
            .count();
        assert_eq!(optimized, 2);
    }

    #[test]
    fn extra_static_dir_is_copied() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("out");
        let assets = tmp.path().join("assets");
        fs::create_dir_all(&assets).unwrap();
        fs::write(assets.join("favicon.ico"), "icon").unwrap();
        let sources = write_sources(tmp.path(), &["a.jpg"]);
        let gallery = create_gallery(options_for(&dest), &sources).unwrap();
        let config = Config {
            static_dir: Some(assets),
            ..Config::default()
        };

        let report =
            generate_gallery(&gallery, &config, &MockBackend::new(), MaudTemplates).unwrap();

        assert_eq!(
            report.static_files,
            vec![dest.join("style.css"), dest.join("favicon.ico")]
        );
    }

    #[test]
    fn backend_failure_aborts_before_rendering() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("out");
        let sources = write_sources(tmp.path(), &["a.jpg", "b.jpg"]);
        let gallery = create_gallery(options_for(&dest), &sources).unwrap();

        let err = generate_gallery(
            &gallery,
            &Config::default(),
            &MockBackend::failing_on("b.jpg"),
            MaudTemplates,
        )
        .unwrap_err();

        assert!(matches!(err, BuildError::Process(_)));
        assert!(!dest.join("index.html").exists());
        assert!(dest.join("a_t.jpg").exists());
    }

    #[test]
    fn destination_blocked_by_file() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("out");
        fs::write(&dest, "not a directory").unwrap();
        let gallery = create_gallery(options_for(&dest), &[] as &[PathBuf]).unwrap();

        let err = generate_gallery(&gallery, &Config::default(), &MockBackend::new(), MaudTemplates)
            .unwrap_err();
        assert!(matches!(err, BuildError::CreateDestination { .. }));
    }
}
