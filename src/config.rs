//! Gallery configuration.
//!
//! Loading and validating `gallery.toml`. All options have stock defaults;
//! a config file is sparse and overrides only what it names. Unknown keys
//! are rejected to catch typos early.
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! examples_dir = "examples"        # Where the example scripts live
//! script_ext = "py"                # Extension of example scripts
//! gallery_dir = "gallery"          # Output directory for generated pages
//! image_dir = "_images"            # Output directory for previews + thumbs
//! image_root = "/_images"          # URL prefix for images in pages
//!
//! gallery_ref = "example-gallery"  # Ref label of the index page
//! title = "Example Gallery"        # Index page title
//! # intro = "One optional paragraph under the title."
//! plot_directive = "chart-plot"    # Directive wrapping each example's code
//! code_below = true                # Render code below the chart
//!
//! [renderer]
//! command = "chart-render"         # Reads code on stdin, writes the image
//! args = ["--output", "{output}"]  # {output} becomes the image path
//!
//! [thumbnails]
//! enabled = true
//! width = 280                      # Crop window in pixels
//! height = 160
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Gallery configuration loaded from `gallery.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Directory containing the example scripts.
    pub examples_dir: String,
    /// Extension of example scripts (without the dot).
    pub script_ext: String,
    /// Output directory for generated pages.
    pub gallery_dir: String,
    /// Output directory for preview images and thumbnails.
    pub image_dir: String,
    /// URL prefix under which the image directory is served.
    pub image_root: String,
    /// Ref label the index page is registered under.
    pub gallery_ref: String,
    /// Index page title.
    pub title: String,
    /// Optional paragraph rendered under the index title.
    pub intro: Option<String>,
    /// Name of the directive wrapping each example's code block.
    pub plot_directive: String,
    /// Render the code below the chart on example pages.
    pub code_below: bool,
    /// Chart renderer subprocess settings.
    pub renderer: RendererConfig,
    /// Thumbnail generation settings.
    pub thumbnails: ThumbnailsConfig,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            examples_dir: "examples".into(),
            script_ext: "py".into(),
            gallery_dir: "gallery".into(),
            image_dir: "_images".into(),
            image_root: "/_images".into(),
            gallery_ref: "example-gallery".into(),
            title: "Example Gallery".into(),
            intro: None,
            plot_directive: "chart-plot".into(),
            code_below: true,
            renderer: RendererConfig::default(),
            thumbnails: ThumbnailsConfig::default(),
        }
    }
}

impl GalleryConfig {
    /// Load from a config file path. A missing file means stock defaults;
    /// a present but malformed file is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.renderer.command.trim().is_empty() {
            return Err(ConfigError::Validation(
                "renderer.command must not be empty".into(),
            ));
        }
        if self.thumbnails.width == 0 || self.thumbnails.height == 0 {
            return Err(ConfigError::Validation(
                "thumbnails.width and thumbnails.height must be non-zero".into(),
            ));
        }
        if self.gallery_ref.trim().is_empty() {
            return Err(ConfigError::Validation(
                "gallery_ref must not be empty".into(),
            ));
        }
        if self.script_ext.starts_with('.') {
            return Err(ConfigError::Validation(
                "script_ext must not include the leading dot".into(),
            ));
        }
        Ok(())
    }
}

/// Chart renderer subprocess settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RendererConfig {
    /// Command that reads example code on stdin and writes the image.
    pub command: String,
    /// Arguments; `{output}` is replaced with the image path.
    pub args: Vec<String>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            command: "chart-render".into(),
            args: vec!["--output".into(), "{output}".into()],
        }
    }
}

/// Thumbnail generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThumbnailsConfig {
    /// Generate thumbnails at all.
    pub enabled: bool,
    /// Crop window width in pixels.
    pub width: u32,
    /// Crop window height in pixels.
    pub height: u32,
}

impl Default for ThumbnailsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            width: 280,
            height: 160,
        }
    }
}

/// A documented stock `gallery.toml`, printed by `gen-config`.
pub fn stock_config_toml() -> String {
    let stock = r#"# chart-gallery configuration
# All options are optional - defaults shown below.

# Where the example scripts live, and their extension.
examples_dir = "examples"
script_ext = "py"

# Output locations. Pages go to gallery_dir; preview images and thumbnails
# go to image_dir and are referenced from pages via image_root.
gallery_dir = "gallery"
image_dir = "_images"
image_root = "/_images"

# Index page identity.
gallery_ref = "example-gallery"
title = "Example Gallery"
# intro = "One optional paragraph rendered under the title."

# Directive wrapping each example's code block on its page.
plot_directive = "chart-plot"
code_below = true

[renderer]
# Command that reads example code on stdin and writes the preview image.
# {output} is replaced with the image path.
command = "chart-render"
args = ["--output", "{output}"]

[thumbnails]
enabled = true
width = 280
height = 160
"#;
    stock.to_string()
}
