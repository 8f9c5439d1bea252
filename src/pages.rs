//! reStructuredText page generation.
//!
//! Stage 3 of the gallery build. Produces the files the documentation-site
//! builder picks up:
//!
//! - `index.rst`: the gallery front page. Examples grouped by category
//!   (first-seen order over the sorted sequence), one thumbnail figure per
//!   example linking to its page, and a hidden toctree per category.
//! - `<name>.rst`: one page per example. The docstring, a prev/next
//!   navigation line, and the example's code wrapped in the configured plot
//!   directive for the site builder to execute.
//!
//! Rendering is two-pass: prev/next refs are assigned across the sorted
//! example list first, then each page is rendered. The renderers are pure
//! string builders, so tests can assert on output without touching the
//! filesystem.

use crate::collect::Example;
use crate::config::GalleryConfig;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PagesError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const HEADER_COMMENT: &str =
    ".. This document is auto-generated by chart-gallery. Do not modify directly.";

/// Fill `prev_ref`/`next_ref` from neighbors in the (already sorted) list.
/// The first example gets no prev, the last no next.
pub fn assign_nav_refs(examples: &mut [Example]) {
    let names: Vec<String> = examples.iter().map(|e| e.name.clone()).collect();
    for (idx, example) in examples.iter_mut().enumerate() {
        example.prev_ref = idx
            .checked_sub(1)
            .map(|i| format!("gallery_{}", names[i]));
        example.next_ref = names.get(idx + 1).map(|n| format!("gallery_{n}"));
    }
}

/// Group examples by category, preserving first-seen category order.
/// Examples keep their relative (sorted) order within each group.
pub fn group_by_category(examples: &[Example]) -> Vec<(String, Vec<&Example>)> {
    let mut groups: Vec<(String, Vec<&Example>)> = Vec::new();
    for example in examples {
        match groups.iter_mut().find(|(cat, _)| *cat == example.category) {
            Some((_, members)) => members.push(example),
            None => groups.push((example.category.clone(), vec![example])),
        }
    }
    groups
}

/// Slug for category ref labels: lowercased, whitespace collapsed to dashes.
/// RST labels with spaces don't resolve reliably, so "Simple Charts" becomes
/// `gallery-category-simple-charts`.
pub fn category_slug(category: &str) -> String {
    category
        .split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// Render the gallery index page.
pub fn render_index(examples: &[Example], config: &GalleryConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{HEADER_COMMENT}");
    let _ = writeln!(out);
    let _ = writeln!(out, ".. _{}:", config.gallery_ref);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", config.title);
    let _ = writeln!(out, "{}", "-".repeat(config.title.chars().count()));
    let _ = writeln!(out);

    if let Some(intro) = &config.intro {
        let _ = writeln!(out, "{}", intro.trim());
        let _ = writeln!(out);
    }

    let groups = group_by_category(examples);

    for (category, _) in &groups {
        let _ = writeln!(out, "* :ref:`gallery-category-{}`", category_slug(category));
    }

    for (category, members) in &groups {
        let _ = writeln!(out);
        let _ = writeln!(out, ".. _gallery-category-{}:", category_slug(category));
        let _ = writeln!(out);
        let _ = writeln!(out, "{category}");
        let _ = writeln!(out, "{}", "~".repeat(category.chars().count()));
        let _ = writeln!(out);

        for example in members {
            let _ = writeln!(
                out,
                ".. figure:: {}/{}-thumb.png",
                config.image_root, example.name
            );
            let _ = writeln!(out, "    :target: {}.html", example.name);
            let _ = writeln!(out, "    :align: center");
            let _ = writeln!(out);
            let _ = writeln!(out, "    :ref:`gallery_{}`", example.name);
            let _ = writeln!(out);
        }

        let _ = writeln!(out, ".. raw:: html");
        let _ = writeln!(out);
        let _ = writeln!(out, "   <div style='clear:both;'></div>");
        let _ = writeln!(out);
        let _ = writeln!(out, ".. toctree::");
        let _ = writeln!(out, "  :hidden:");
        let _ = writeln!(out);
        for example in members {
            let _ = writeln!(out, "  {}", example.name);
        }
    }

    out
}

/// Render one example's page.
pub fn render_example_page(example: &Example, config: &GalleryConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{HEADER_COMMENT}");
    let _ = writeln!(out);
    let _ = writeln!(out, ".. _gallery_{}:", example.name);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", example.docstring);
    let _ = writeln!(out);

    let nav: Vec<String> = [
        example.prev_ref.as_ref().map(|r| format!("Previous: :ref:`{r}`")),
        example.next_ref.as_ref().map(|r| format!("Next: :ref:`{r}`")),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !nav.is_empty() {
        let _ = writeln!(out, "{}", nav.join(" | "));
        let _ = writeln!(out);
    }

    let _ = writeln!(out, ".. {}::", config.plot_directive);
    if config.code_below {
        let _ = writeln!(out, "    :code-below:");
    }
    let _ = writeln!(out);
    for line in example.code.lines() {
        if line.is_empty() {
            let _ = writeln!(out);
        } else {
            let _ = writeln!(out, "    {line}");
        }
    }
    let _ = writeln!(out);
    let _ = writeln!(out, ".. toctree::");
    let _ = writeln!(out, "   :hidden:");

    out
}

/// Write `index.rst` into the gallery directory.
pub fn write_index(
    examples: &[Example],
    config: &GalleryConfig,
    gallery_dir: &Path,
) -> Result<(), PagesError> {
    fs::create_dir_all(gallery_dir)?;
    fs::write(gallery_dir.join("index.rst"), render_index(examples, config))?;
    Ok(())
}

/// Assign prev/next refs and write one `<name>.rst` per example.
pub fn write_example_pages(
    examples: &mut [Example],
    config: &GalleryConfig,
    gallery_dir: &Path,
) -> Result<(), PagesError> {
    fs::create_dir_all(gallery_dir)?;
    assign_nav_refs(examples);
    for example in examples.iter() {
        let page = render_example_page(example, config);
        fs::write(gallery_dir.join(format!("{}.rst", example.name)), page)?;
    }
    Ok(())
}
