//! # chart-gallery
//!
//! Example gallery builder for charting-library documentation. Your example
//! scripts are the data source: each script produces one chart, and the
//! build turns the set into a browsable gallery of reStructuredText pages
//! with cached preview images.
//!
//! # Architecture: Three-Stage Pipeline
//!
//! ```text
//! 1. Collect   examples/   →  sorted Example records  (scripts → structured data)
//! 2. Images    examples    →  _images/                (previews + thumbnails, hash-cached)
//! 3. Pages     examples    →  gallery/                (index.rst + one page per example)
//! ```
//!
//! The stages are independent on purpose:
//!
//! - **Incremental builds**: the image stage skips every render whose code
//!   hash matches the persisted cache, which is where all the build time
//!   goes.
//! - **Testability**: collection and page rendering are pure functions over
//!   `Example` records; the chart renderer sits behind a trait and tests use
//!   a recording mock.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`collect`] | Stage 1: enumerates and sorts example scripts, builds `Example` records |
//! | [`images`] | Stage 2: renders previews through the backend, skipping cache hits |
//! | [`pages`] | Stage 3: renders `index.rst` and per-example pages with prev/next refs |
//! | [`extract`] | Docstring / category / code parsing for one script |
//! | [`cache`] | Persisted filename → code-digest map behind the skip logic |
//! | [`backend`] | `ChartBackend` trait + subprocess renderer implementation |
//! | [`thumbs`] | Thumbnail crops of rendered previews |
//! | [`config`] | `gallery.toml` loading, defaults, validation |
//! | [`output`] | CLI output formatting for pipeline results |
//!
//! # Design Decisions
//!
//! ## Rendering Is Someone Else's Job
//!
//! The gallery never interprets example code. The renderer is an external
//! command that reads a script on stdin and writes a PNG; swapping chart
//! libraries means changing one config line, and tests never need a real
//! renderer.
//!
//! ## Content-Hash Cache, Not Mtimes
//!
//! Renders are skipped based on a SHA-256 digest of the example's code
//! stored in `_image_hashes.json` next to the images. Content hashes survive
//! `git checkout` (which resets mtimes) and CI cache restores. Thumbnails
//! are never cached: they are cheap, and crop-parameter edits should show up
//! without poking the cache.
//!
//! ## String Builders Over Template Engines
//!
//! Pages are reStructuredText built by plain Rust functions. The output
//! format is small and fixed; a template engine would add a runtime file
//! dependency and stringly-typed lookups for two page shapes.

pub mod backend;
pub mod cache;
pub mod collect;
pub mod config;
pub mod extract;
pub mod images;
pub mod output;
pub mod pages;
pub mod thumbs;
