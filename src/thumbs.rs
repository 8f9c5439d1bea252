//! Thumbnail creation for gallery index pages.
//!
//! A thumbnail is a fixed-size crop of the rendered preview image: the
//! preview is scaled until it covers the crop window (preserving aspect),
//! then a window is cut at a configurable offset. Charts put their
//! interesting content at the top-left more often than photographs do, so
//! the default offset is (0, 0) rather than a center crop.
//!
//! Thumbnails are cheap relative to chart rendering and are regenerated on
//! every image-stage run, cache hit or not, so crop parameter changes take
//! effect without touching the render cache.

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThumbError {
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Per-example crop overrides from a sidecar TOML file. All fields optional;
/// unset fields fall back to the gallery-wide config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThumbParams {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub xoffset: Option<u32>,
    pub yoffset: Option<u32>,
}

/// Effective crop window after merging sidecar overrides with defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbWindow {
    pub width: u32,
    pub height: u32,
    pub xoffset: u32,
    pub yoffset: u32,
}

impl ThumbWindow {
    /// Merge optional per-example params over gallery defaults.
    pub fn resolve(defaults: (u32, u32), params: Option<&ThumbParams>) -> Self {
        let p = params.cloned().unwrap_or_default();
        Self {
            width: p.width.unwrap_or(defaults.0),
            height: p.height.unwrap_or(defaults.1),
            xoffset: p.xoffset.unwrap_or(0),
            yoffset: p.yoffset.unwrap_or(0),
        }
    }
}

/// Create a thumbnail from a rendered preview image.
///
/// Scales the preview so it covers the crop window (preserving aspect), then
/// cuts a `width`×`height` window at the given offsets. Offsets are clamped
/// so the window stays inside the scaled image; the result is always exactly
/// window-sized.
pub fn create_thumbnail(source: &Path, output: &Path, window: ThumbWindow) -> Result<(), ThumbError> {
    let img = image::open(source)?;

    let (iw, ih) = (img.width().max(1), img.height().max(1));
    let scale = f64::max(
        window.width as f64 / iw as f64,
        window.height as f64 / ih as f64,
    );
    let sw = ((iw as f64 * scale).round() as u32).max(window.width);
    let sh = ((ih as f64 * scale).round() as u32).max(window.height);
    let scaled = img.resize_exact(sw, sh, FilterType::Lanczos3);

    let xoffset = window.xoffset.min(sw - window.width);
    let yoffset = window.yoffset.min(sh - window.height);

    let cropped = scaled.crop_imm(xoffset, yoffset, window.width, window.height);
    cropped.save(output)?;
    Ok(())
}
