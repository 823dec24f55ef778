//! HTML page generation and static files.
//!
//! ## Generated Pages
//!
//! - **View pages** (`/{page_name}.html`): one per image, rendered with the
//!   `view` template. Shows the full image, its caption, and links to the
//!   previous image, the index and the next image.
//! - **Index page** (`/index.html`): rendered once with the `index`
//!   template. A grid of thumbnails linking to the view pages.
//!
//! Every page is rewritten on every run.
//!
//! ## Templates
//!
//! Rendering goes through the [`TemplateEngine`] trait: a template name plus
//! a [`RenderContext`] in, HTML text out. The engine is handed to the
//! [`Renderer`] when it is built, so there is no global template state and
//! tests can swap in an engine that records what it was asked to render.
//!
//! The built-in engine, [`MaudTemplates`], uses
//! [maud](https://maud.lambda.xyz/) for compile-time HTML templating with
//! automatic escaping.
//!
//! ## Static Files
//!
//! `static/style.css` is embedded at compile time and written next to the
//! pages. An optional extra directory can be copied in as well.

use crate::gallery::{Gallery, Image};
use maud::{DOCTYPE, Markup, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),
    #[error("Template \"{0}\" needs an image to render")]
    MissingImage(String),
    #[error("Failed to write {path}: {error}")]
    Io {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },
}

pub const VIEW_TEMPLATE: &str = "view";
pub const INDEX_TEMPLATE: &str = "index";
pub const INDEX_PAGE_NAME: &str = "index";
pub const OUTPUT_HTML_EXTENSION: &str = ".html";

const STYLE_CSS: &str = include_str!("../static/style.css");

/// Files bundled into the binary, sorted by name.
pub const BUNDLED_STATIC_FILES: &[(&str, &str)] = &[("style.css", STYLE_CSS)];

/// File name of the HTML page for a page name.
pub fn page_filename(page_name: &str) -> String {
    format!("{page_name}{OUTPUT_HTML_EXTENSION}")
}

/// Relative URL of the HTML page for a page name.
pub fn url_for_page(page_name: &str) -> String {
    url_for_file(&page_filename(page_name))
}

/// Relative URL of a file in the destination directory.
///
/// Pages and images all sit side by side, so the URL is the percent-encoded
/// file name (`shot#2.jpg` → `shot%232.jpg`).
pub fn url_for_file(filename: &str) -> String {
    urlencoding::encode(filename).into_owned()
}

/// Everything a template can see.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub gallery: &'a Gallery,
    /// The image being viewed; `None` for the index page.
    pub image: Option<&'a Image>,
    pub url_for_page: fn(&str) -> String,
}

impl<'a> RenderContext<'a> {
    pub fn index(gallery: &'a Gallery) -> Self {
        Self {
            gallery,
            image: None,
            url_for_page,
        }
    }

    pub fn view(gallery: &'a Gallery, image: &'a Image) -> Self {
        Self {
            gallery,
            image: Some(image),
            url_for_page,
        }
    }
}

/// A template engine: template name + context → document text.
pub trait TemplateEngine {
    fn render(&self, template: &str, context: &RenderContext<'_>) -> Result<String, GenerateError>;
}

/// Writes every page of a gallery through a template engine.
pub struct Renderer<T: TemplateEngine> {
    templates: T,
}

impl<T: TemplateEngine> Renderer<T> {
    pub fn new(templates: T) -> Self {
        Self { templates }
    }

    /// Render one view page per image, then the index. Returns the paths
    /// written, in that order.
    pub fn render_pages(&self, gallery: &Gallery) -> Result<Vec<PathBuf>, GenerateError> {
        let mut written = Vec::with_capacity(gallery.images().len() + 1);

        for image in gallery.images() {
            let context = RenderContext::view(gallery, image);
            written.push(self.render_to_file(VIEW_TEMPLATE, &context, image.page_name())?);
        }

        let context = RenderContext::index(gallery);
        written.push(self.render_to_file(INDEX_TEMPLATE, &context, INDEX_PAGE_NAME)?);

        Ok(written)
    }

    fn render_to_file(
        &self,
        template: &str,
        context: &RenderContext<'_>,
        page_name: &str,
    ) -> Result<PathBuf, GenerateError> {
        let html = self.templates.render(template, context)?;
        let path = context.gallery.destination().join(page_filename(page_name));
        write_file(&path, &html)?;
        Ok(path)
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), GenerateError> {
    log::debug!("Writing \"{}\" ...", path.display());
    fs::write(path, content).map_err(|error| GenerateError::Io {
        path: path.to_path_buf(),
        error,
    })
}

// ============================================================================
// Static files
// ============================================================================

/// Write the bundled static files into `destination`.
pub fn write_bundled_files(destination: &Path) -> Result<Vec<PathBuf>, GenerateError> {
    BUNDLED_STATIC_FILES
        .iter()
        .map(|(name, content)| {
            log::info!("Copying static file \"{}\" ...", name);
            let path = destination.join(name);
            write_file(&path, content)?;
            Ok(path)
        })
        .collect()
}

/// Copy every file directly inside `source_dir` into `destination`, in
/// name order. A missing directory copies nothing.
pub fn copy_static_dir(
    source_dir: &Path,
    destination: &Path,
) -> Result<Vec<PathBuf>, GenerateError> {
    if !source_dir.is_dir() {
        log::debug!(
            "Path \"{}\" does not exist; not copying any static files.",
            source_dir.display()
        );
        return Ok(Vec::new());
    }

    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |error| GenerateError::Io { path, error }
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(source_dir).map_err(io_err(source_dir))? {
        let entry = entry.map_err(io_err(source_dir))?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    if files.is_empty() {
        log::debug!("No static files to copy.");
    }

    let mut copied = Vec::with_capacity(files.len());
    for src in files {
        let Some(name) = src.file_name() else {
            continue;
        };
        log::info!("Copying static file \"{}\" ...", name.to_string_lossy());
        let dst = destination.join(name);
        fs::copy(&src, &dst).map_err(io_err(&dst))?;
        copied.push(dst);
    }
    Ok(copied)
}

// ============================================================================
// Built-in templates
// ============================================================================

/// Compile-time Maud templates for `view` and `index`.
#[derive(Debug, Default, Clone, Copy)]
pub struct MaudTemplates;

impl TemplateEngine for MaudTemplates {
    fn render(&self, template: &str, context: &RenderContext<'_>) -> Result<String, GenerateError> {
        let markup = match template {
            VIEW_TEMPLATE => {
                let image = context
                    .image
                    .ok_or_else(|| GenerateError::MissingImage(template.to_string()))?;
                render_view(context, image)
            }
            INDEX_TEMPLATE => render_index(context),
            other => return Err(GenerateError::UnknownTemplate(other.to_string())),
        };
        Ok(markup.into_string())
    }
}

const DEFAULT_TITLE: &str = "Gallery";

/// Renders the base HTML document structure
fn base_document(title: &str, body_class: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="stylesheet" href="style.css";
            }
            body class=(body_class) {
                (content)
            }
        }
    }
}

/// Gallery title linking back to the index
fn site_header(context: &RenderContext<'_>) -> Markup {
    let title = context.gallery.title().unwrap_or(DEFAULT_TITLE);
    html! {
        header.site-header {
            h1 {
                a href=((context.url_for_page)(INDEX_PAGE_NAME)) { (title) }
            }
        }
    }
}

fn alt_text(image: &Image) -> &str {
    image.caption().unwrap_or(image.basename())
}

fn render_index(context: &RenderContext<'_>) -> Markup {
    let gallery = context.gallery;
    let content = html! {
        (site_header(context))
        main.index-page {
            ul.thumbnails {
                @for image in gallery.images() {
                    li {
                        a href=((context.url_for_page)(image.page_name())) {
                            img src=(url_for_file(image.thumbnail_filename()))
                                alt=(alt_text(image))
                                title=[image.caption()]
                                loading="lazy";
                        }
                    }
                }
            }
        }
    };

    base_document(gallery.title().unwrap_or(DEFAULT_TITLE), "index", content)
}

fn render_view(context: &RenderContext<'_>, image: &Image) -> Markup {
    let gallery = context.gallery;
    let url = context.url_for_page;
    let previous = gallery.previous_of(image);
    let next = gallery.next_of(image);

    let page_title = match gallery.title() {
        Some(title) => format!("{} · {}", alt_text(image), title),
        None => alt_text(image).to_string(),
    };

    let content = html! {
        (site_header(context))
        main.view-page {
            figure {
                img src=(url_for_file(image.filename())) alt=(alt_text(image));
                @if let Some(caption) = image.caption() {
                    figcaption { (caption) }
                }
            }
            nav.pager {
                @if let Some(prev) = previous {
                    a.previous href=(url(prev.page_name())) rel="prev" { "« previous" }
                } @else {
                    span.previous.disabled { "« previous" }
                }
                a.up href=(url(INDEX_PAGE_NAME)) { "index" }
                @if let Some(next) = next {
                    a.next href=(url(next.page_name())) rel="next" { "next »" }
                } @else {
                    span.next.disabled { "next »" }
                }
            }
        }
    };

    base_document(&page_title, "view", content)
}

// ============================================================================
// Tests
// ============================================================================
