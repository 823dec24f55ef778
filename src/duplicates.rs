//! Pre-flight check for source images that would overwrite each other.
//!
//! All output lands in one flat destination directory, named after each
//! source file's final path segment. Two sources with the same file name
//! (compared case-insensitively, since the destination may live on a
//! case-insensitive filesystem) would silently clobber one another, so the
//! run refuses to start.
//!
//! Distinct file names can still collide once the derived names are added:
//! `a.jpg` and `a.png` both want `a.html`, and the full image of `a_t.jpg`
//! lands on the thumbnail of `a.jpg`. [`check_output_clashes`] checks every
//! file the run will write, including the gallery's own files.

use crate::generate::page_filename;
use crate::naming::{derive_names, file_name};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// One file name shared by two or more source paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    /// Case-folded file name.
    pub filename: String,
    /// Colliding source paths in input order.
    pub paths: Vec<PathBuf>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Clashing target filenames, aborting.")]
pub struct DuplicateFilenames(pub Vec<DuplicateGroup>);

/// Group paths by case-folded file name, keeping only groups of two or more.
///
/// Groups come back in the order their file name was first seen; paths
/// within a group keep their input order.
pub fn find_duplicate_filenames<P: AsRef<Path>>(paths: &[P]) -> Vec<DuplicateGroup> {
    let mut groups: Vec<DuplicateGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for path in paths {
        let path = path.as_ref();
        let key = file_name(path).to_lowercase();
        match index.get(&key) {
            Some(&i) => groups[i].paths.push(path.to_path_buf()),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(DuplicateGroup {
                    filename: key,
                    paths: vec![path.to_path_buf()],
                });
            }
        }
    }

    groups.retain(|g| g.paths.len() > 1);
    groups
}

/// Fail if any two paths share a destination file name.
pub fn check_duplicate_filenames<P: AsRef<Path>>(paths: &[P]) -> Result<(), DuplicateFilenames> {
    let duplicates = find_duplicate_filenames(paths);
    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(DuplicateFilenames(duplicates))
    }
}

/// Something that writes one file into the destination directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Writer {
    Image(PathBuf),
    Thumbnail(PathBuf),
    Page(PathBuf),
    /// A file the gallery writes on its own (index page, stylesheet).
    Generated,
}

/// One destination file with more than one writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputClash {
    /// Case-folded destination file name.
    pub target: String,
    pub writers: Vec<Writer>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Clashing output files, aborting.")]
pub struct OutputClashes(pub Vec<OutputClash>);

/// Collect every destination file name with two or more writers.
///
/// `generated` names the files written regardless of the sources. Clashes
/// come back in the order their target was first seen, generated files
/// first.
pub fn find_output_clashes<P: AsRef<Path>>(paths: &[P], generated: &[String]) -> Vec<OutputClash> {
    let mut clashes: Vec<OutputClash> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    let mut claim = |target: &str, writer: Writer| {
        let key = target.to_lowercase();
        match index.get(&key) {
            Some(&i) => clashes[i].writers.push(writer),
            None => {
                index.insert(key.clone(), clashes.len());
                clashes.push(OutputClash {
                    target: key,
                    writers: vec![writer],
                });
            }
        }
    };

    for name in generated {
        claim(name, Writer::Generated);
    }
    for path in paths {
        let path = path.as_ref();
        let names = derive_names(path);
        claim(&names.filename, Writer::Image(path.to_path_buf()));
        claim(&names.thumbnail_filename, Writer::Thumbnail(path.to_path_buf()));
        claim(&page_filename(&names.page_name), Writer::Page(path.to_path_buf()));
    }

    clashes.retain(|c| c.writers.len() > 1);
    clashes
}

/// Fail if any two writers target the same destination file.
pub fn check_output_clashes<P: AsRef<Path>>(
    paths: &[P],
    generated: &[String],
) -> Result<(), OutputClashes> {
    let clashes = find_output_clashes(paths, generated);
    if clashes.is_empty() {
        Ok(())
    } else {
        Err(OutputClashes(clashes))
    }
}
