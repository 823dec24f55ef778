//! CLI output formatting.
//!
//! Each report has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes it out. Format functions
//! do no I/O.
//!
//! # Build summary
//!
//! ```text
//! Holiday (3 photos) → out/
//! 001 a.jpg → a.html
//!     Caption: Arrival
//!     Next: b.html
//! 002 b.jpg → b.html
//!     Previous: a.html
//!     Next: c.html
//! 003 c.jpg → c.html
//!     Previous: b.html
//!
//! Images: 3 resized, 3 thumbnails
//! Static files: style.css
//! Generated 3 image pages and index.html
//! ```
//!
//! # Duplicate filenames
//!
//! ```text
//! Found duplicate filenames:
//!   + "foo.txt" appears in the following paths:
//!     - dir1/foo.txt
//!     - foo.txt
//! ```
//!
//! # Output clashes
//!
//! ```text
//! Found clashing output files:
//!   + "a.html" would be written by:
//!     - the page for a.jpg
//!     - the page for a.png
//! ```

use crate::duplicates::{DuplicateGroup, OutputClash, Writer};
use crate::gallery::Gallery;
use crate::generate::{INDEX_PAGE_NAME, page_filename};
use crate::pipeline::BuildReport;
use crate::process::ProcessSummary;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

// ============================================================================
// Duplicate filenames
// ============================================================================

pub fn format_duplicates(groups: &[DuplicateGroup]) -> Vec<String> {
    let mut lines = vec!["Found duplicate filenames:".to_string()];
    for group in groups {
        lines.push(format!(
            "  + \"{}\" appears in the following paths:",
            group.filename
        ));
        for path in &group.paths {
            lines.push(format!("    - {}", path.display()));
        }
    }
    lines
}

pub fn print_duplicates(groups: &[DuplicateGroup]) {
    for line in format_duplicates(groups) {
        eprintln!("{}", line);
    }
}

// ============================================================================
// Output clashes
// ============================================================================

fn describe_writer(writer: &Writer) -> String {
    match writer {
        Writer::Image(path) => format!("the image {}", path.display()),
        Writer::Thumbnail(path) => format!("the thumbnail for {}", path.display()),
        Writer::Page(path) => format!("the page for {}", path.display()),
        Writer::Generated => "the gallery itself".to_string(),
    }
}

pub fn format_output_clashes(clashes: &[OutputClash]) -> Vec<String> {
    let mut lines = vec!["Found clashing output files:".to_string()];
    for clash in clashes {
        lines.push(format!("  + \"{}\" would be written by:", clash.target));
        for writer in &clash.writers {
            lines.push(format!("    - {}", describe_writer(writer)));
        }
    }
    lines
}

pub fn print_output_clashes(clashes: &[OutputClash]) {
    for line in format_output_clashes(clashes) {
        eprintln!("{}", line);
    }
}

// ============================================================================
// Build summary
// ============================================================================

fn format_process_summary(summary: &ProcessSummary) -> String {
    let mut parts = Vec::new();
    if summary.resized > 0 {
        parts.push(format!("{} resized", summary.resized));
    }
    if summary.copied > 0 {
        parts.push(format!("{} copied", summary.copied));
    }
    parts.push(plural(summary.thumbnails, "thumbnail", "thumbnails"));
    if summary.optimized > 0 {
        parts.push(format!("{} optimized", summary.optimized));
    }
    format!("Images: {}", parts.join(", "))
}

/// Format the result of a generate pass.
pub fn format_build_output(gallery: &Gallery, report: &BuildReport) -> Vec<String> {
    let mut lines = Vec::new();
    let count = plural(gallery.images().len(), "photo", "photos");
    let header = match gallery.title() {
        Some(title) => format!("{title} ({count})"),
        None => format!("Gallery ({count})"),
    };
    lines.push(format!("{} → {}/", header, gallery.destination().display()));

    for (pos, (previous, image, next)) in gallery.windows().enumerate() {
        lines.push(format!(
            "{} {} → {}",
            format_index(pos + 1),
            image.filename(),
            page_filename(image.page_name())
        ));
        if let Some(caption) = image.caption() {
            lines.push(format!("{}Caption: {}", indent(1), caption));
        }
        if let Some(prev) = previous {
            lines.push(format!("{}Previous: {}", indent(1), page_filename(prev.page_name())));
        }
        if let Some(next) = next {
            lines.push(format!("{}Next: {}", indent(1), page_filename(next.page_name())));
        }
    }

    lines.push(String::new());
    match &report.processed {
        Some(summary) => lines.push(format_process_summary(summary)),
        None => lines.push("Images: skipped (HTML only)".to_string()),
    }
    if !report.static_files.is_empty() {
        let names: Vec<String> = report
            .static_files
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();
        lines.push(format!("Static files: {}", names.join(", ")));
    }

    let image_pages = report.pages.len().saturating_sub(1);
    lines.push(format!(
        "Generated {} and {}",
        plural(image_pages, "image page", "image pages"),
        page_filename(INDEX_PAGE_NAME)
    ));
    lines
}

pub fn print_build_output(gallery: &Gallery, report: &BuildReport) {
    for line in format_build_output(gallery, report) {
        println!("{}", line);
    }
}
