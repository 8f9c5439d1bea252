//! Preview image generation with hash-cache skipping.
//!
//! Stage 2 of the gallery build. For every collected example:
//!
//! 1. Digest the example's code text.
//! 2. If the cache holds the same digest for the output filename and the
//!    image file exists, skip the render.
//! 3. Otherwise pipe the code through the chart backend, record the new
//!    digest, and persist the cache file immediately so an interrupted
//!    build keeps its finished renders.
//! 4. When thumbnails are enabled, (re)create `<name>-thumb.png`
//!    unconditionally, honoring per-example sidecar crop params.
//!
//! Rendering is sequential; the renderer subprocess is the bottleneck and
//! the cache, not parallelism, is what makes rebuilds fast.

use crate::backend::{BackendError, ChartBackend};
use crate::cache::{self, HashCache};
use crate::collect::Example;
use crate::config::GalleryConfig;
use crate::thumbs::{self, ThumbError, ThumbWindow};
use std::fmt;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("render failed for {name}: {source}")]
    Render {
        name: String,
        #[source]
        source: BackendError,
    },
    #[error("thumbnail failed for {name}: {source}")]
    Thumbnail {
        name: String,
        #[source]
        source: ThumbError,
    },
}

/// Summary of cache performance for an image-stage run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub cached: u32,
    pub rendered: u32,
    pub thumbnails: u32,
}

impl CacheStats {
    pub fn total(&self) -> u32 {
        self.cached + self.rendered
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cached > 0 {
            write!(
                f,
                "{} cached, {} rendered ({} total)",
                self.cached,
                self.rendered,
                self.total()
            )
        } else {
            write!(f, "{} rendered", self.rendered)
        }
    }
}

/// Render preview images (and thumbnails) for all examples.
///
/// `use_cache = false` starts from an empty cache, forcing a full re-render;
/// the resulting digests are still persisted for the next run.
pub fn save_example_images(
    backend: &impl ChartBackend,
    examples: &[Example],
    image_dir: &Path,
    config: &GalleryConfig,
    use_cache: bool,
) -> Result<CacheStats, ImageError> {
    std::fs::create_dir_all(image_dir)?;

    let mut hashes = if use_cache {
        HashCache::load(image_dir)
    } else {
        HashCache::empty()
    };

    let mut stats = CacheStats::default();
    let thumb_defaults = (config.thumbnails.width, config.thumbnails.height);

    for example in examples {
        let filename = format!("{}.png", example.name);
        let image_file = image_dir.join(&filename);
        let digest = cache::hash_code(&example.code);

        if hashes.is_valid(&filename, &digest, image_dir) {
            println!("-> using cached {}", image_file.display());
            stats.cached += 1;
        } else {
            // Code changed or the image is missing. Render it.
            println!("-> saving {}", image_file.display());
            backend
                .render(&example.code, &image_file)
                .map_err(|source| ImageError::Render {
                    name: example.name.clone(),
                    source,
                })?;
            hashes.insert(filename, digest);
            hashes.save(image_dir)?;
            stats.rendered += 1;
        }

        if config.thumbnails.enabled {
            let thumb_file = image_dir.join(format!("{}-thumb.png", example.name));
            let window = ThumbWindow::resolve(thumb_defaults, example.params.as_ref());
            thumbs::create_thumbnail(&image_file, &thumb_file, window).map_err(|source| {
                ImageError::Thumbnail {
                    name: example.name.clone(),
                    source,
                }
            })?;
            stats.thumbnails += 1;
        }
    }

    hashes.save(image_dir)?;
    Ok(stats)
}
