use clap::{Parser, ValueEnum};
use gallerize::config::{Config, DEFAULT_MAX_IMAGE_SIZE, DEFAULT_MAX_THUMBNAIL_SIZE};
use gallerize::gallery::GalleryOptions;
use gallerize::generate::MaudTemplates;
use gallerize::imaging::{ImageBackend, MagickBackend, RustBackend};
use gallerize::output;
use gallerize::pipeline::{BuildError, create_gallery, generate_gallery};
use gallerize::types::Dimension;
use std::path::PathBuf;
use std::process::ExitCode;

fn version_string() -> &'static str {
    let on_tag = env!("GALLERIZE_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GALLERIZE_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Backend {
    /// Pure Rust: `image` (Lanczos3) and `oxipng`
    Rust,
    /// External tools: `convert`, `jpegoptim`, `optipng`
    Imagemagick,
}

impl Backend {
    fn build(self) -> Box<dyn ImageBackend> {
        match self {
            Backend::Rust => Box::new(RustBackend::new()),
            Backend::Imagemagick => Box::new(MagickBackend::new()),
        }
    }
}

#[derive(Parser)]
#[command(name = "gallerize")]
#[command(about = "Create a static HTML/CSS image gallery from a bunch of images")]
#[command(long_about = "\
Create a static HTML/CSS image gallery from a bunch of images

Every image gets a page of its own with links to the previous and next image,
and a thumbnail on the index page. Everything is written flat into the target
directory:

  out/
  ├── index.html        # Thumbnails of all images
  ├── beach.html        # One page per image
  ├── beach.jpg         # Resized copy
  ├── beach_t.jpg       # Thumbnail
  └── style.css

Images are ordered by path. A caption is read from the first line of a text
file named after the image plus \".txt\" (beach.jpg → beach.jpg.txt).")]
#[command(version = version_string())]
#[command(override_usage = "gallerize [OPTIONS] <DESTINATION> <IMAGE>...")]
struct Cli {
    /// Target directory for the gallery
    destination: PathBuf,

    /// Images to include
    #[arg(required = true, num_args = 1..)]
    images: Vec<PathBuf>,

    /// Set gallery title on the website
    #[arg(long)]
    title: Option<String>,

    /// Set maximum image size
    #[arg(short = 's', long = "size", value_name = "WxH", default_value_t = DEFAULT_MAX_IMAGE_SIZE)]
    max_image_size: Dimension,

    /// Set maximum thumbnail size
    #[arg(short = 't', long = "thumbnail-size", value_name = "WxH", default_value_t = DEFAULT_MAX_THUMBNAIL_SIZE)]
    max_thumbnail_size: Dimension,

    /// Do not resize images, just copy them
    #[arg(long)]
    no_resize: bool,

    /// Only (re-)generate HTML, do not process images
    #[arg(long)]
    html_only: bool,

    /// Optimize images to reduce size and remove metadata
    #[arg(long)]
    optimize_images: bool,

    /// Read image captions from text files ("<IMAGE_NAME>.txt"); always on
    #[arg(short = 'c', long)]
    captions: bool,

    /// Image processing backend
    #[arg(long, value_enum, default_value_t = Backend::Rust)]
    backend: Backend,

    /// Extra directory of static files to copy into the gallery
    #[arg(long, value_name = "DIR")]
    assets: Option<PathBuf>,

    /// Show debug output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = ctrlc::set_handler(|| {
        eprintln!("Ctrl-C pressed, aborting.");
        std::process::exit(130);
    }) {
        log::warn!("Could not install Ctrl-C handler: {err}");
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match &err {
                BuildError::Duplicates(duplicates) => output::print_duplicates(&duplicates.0),
                BuildError::OutputClashes(clashes) => output::print_output_clashes(&clashes.0),
                _ => {}
            }
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), BuildError> {
    if cli.captions {
        log::debug!("Captions are always read; --captions has no effect.");
    }

    let options = GalleryOptions {
        title: cli.title,
        destination: cli.destination,
        max_image_size: cli.max_image_size,
        max_thumbnail_size: cli.max_thumbnail_size,
        resize: !cli.no_resize,
    };
    let config = Config {
        html_only: cli.html_only,
        optimize_images: cli.optimize_images,
        static_dir: cli.assets,
    };

    let gallery = create_gallery(options, &cli.images)?;
    let backend = cli.backend.build();
    let report = generate_gallery(&gallery, &config, backend.as_ref(), MaudTemplates)?;
    output::print_build_output(&gallery, &report);
    Ok(())
}

/// `info` by default, `debug` with `--verbose`; `RUST_LOG` wins over both.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .format_target(false)
        .init();
}
