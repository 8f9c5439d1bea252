use chart_gallery::backend::CommandBackend;
use chart_gallery::config::{self, GalleryConfig};
use chart_gallery::{collect, images, output, pages};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Shared flags for commands that render images.
#[derive(clap::Args, Clone)]
struct CacheArgs {
    /// Disable the render cache and re-render all previews
    #[arg(long)]
    no_cache: bool,
}

fn version_string() -> &'static str {
    let hash = env!("GIT_HASH");
    if hash.is_empty() {
        env!("CARGO_PKG_VERSION")
    } else {
        // Leaked once at startup
        Box::leak(format!("{}+{hash}", env!("CARGO_PKG_VERSION")).into_boxed_str())
    }
}

#[derive(Parser)]
#[command(name = "chart-gallery")]
#[command(about = "Example gallery builder for charting-library docs")]
#[command(long_about = "\
Example gallery builder for charting-library docs

Each example script produces one chart. The build collects the scripts,
renders preview images through an external renderer (cached by code hash),
and emits reStructuredText pages for the documentation site.

Example layout:

  examples/
  ├── area-chart.py            # \"\"\"docstring\"\"\" + # category: + code
  ├── bar-chart.py
  ├── bar-chart.toml           # Optional thumbnail crop overrides
  └── scatter-matrix.py

  gallery/                     # Generated: index.rst + one .rst per example
  _images/                     # Generated: previews, thumbnails, hash cache

Run 'chart-gallery gen-config' for a documented gallery.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Config file
    #[arg(long, default_value = "gallery.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List collected examples without building anything
    Collect,
    /// Render preview images and thumbnails
    Images(CacheArgs),
    /// Write the gallery index and per-example pages
    Pages,
    /// Run the full build: index → images → example pages
    Build(CacheArgs),
    /// Validate example scripts without writing output
    Check,
    /// Print a stock gallery.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Collect => {
            let config = GalleryConfig::load(&cli.config)?;
            let examples = collect_examples(&config)?;
            output::print_collect_output(&examples);
        }
        Command::Images(cache_args) => {
            let config = GalleryConfig::load(&cli.config)?;
            let examples = collect_examples(&config)?;
            let backend = renderer(&config);
            let stats = images::save_example_images(
                &backend,
                &examples,
                Path::new(&config.image_dir),
                &config,
                !cache_args.no_cache,
            )?;
            output::print_images_summary(&stats);
        }
        Command::Pages => {
            let config = GalleryConfig::load(&cli.config)?;
            let mut examples = collect_examples(&config)?;
            let gallery_dir = PathBuf::from(&config.gallery_dir);
            pages::write_index(&examples, &config, &gallery_dir)?;
            pages::write_example_pages(&mut examples, &config, &gallery_dir)?;
            output::print_pages_output(&examples, &config.gallery_dir);
        }
        Command::Build(cache_args) => {
            let config = GalleryConfig::load(&cli.config)?;

            println!("==> Collecting {}", config.examples_dir);
            let mut examples = collect_examples(&config)?;
            output::print_collect_output(&examples);

            // Index first, then images, then example pages: the order the
            // documentation build consumes them in.
            let gallery_dir = PathBuf::from(&config.gallery_dir);
            pages::write_index(&examples, &config, &gallery_dir)?;

            println!("==> Rendering previews → {}", config.image_dir);
            let backend = renderer(&config);
            let stats = images::save_example_images(
                &backend,
                &examples,
                Path::new(&config.image_dir),
                &config,
                !cache_args.no_cache,
            )?;
            output::print_images_summary(&stats);

            println!("==> Writing pages → {}", config.gallery_dir);
            pages::write_example_pages(&mut examples, &config, &gallery_dir)?;
            output::print_pages_output(&examples, &config.gallery_dir);

            println!("==> Gallery complete: {}", config.gallery_dir);
        }
        Command::Check => {
            let config = GalleryConfig::load(&cli.config)?;
            println!("==> Checking {}", config.examples_dir);
            let examples = collect_examples(&config)?;
            output::print_collect_output(&examples);
            println!("==> Examples are valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn collect_examples(
    config: &GalleryConfig,
) -> Result<Vec<collect::Example>, collect::CollectError> {
    collect::collect(Path::new(&config.examples_dir), &config.script_ext)
}

fn renderer(config: &GalleryConfig) -> CommandBackend {
    CommandBackend::new(&config.renderer.command, config.renderer.args.clone())
}
