//! CLI output formatting for the gallery pipeline.
//!
//! Each stage has a `format_*` function returning lines (pure, testable) and
//! a `print_*` wrapper that writes them to stdout. The display is
//! information-first: the header line for an entity is its positional index
//! plus name and category, with the source file as indented context.
//!
//! ```text
//! Examples
//! 001 area-chart [Simple Charts]
//!     Source: area-chart.py
//! 002 bar-chart [Simple Charts]
//!     Source: bar-chart.py
//!
//! 2 examples in 1 category
//! ```

use crate::collect::Example;
use crate::images::CacheStats;
use crate::pages::group_by_category;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Format the collect listing: one header + source line per example, plus a
/// trailing count summary.
pub fn format_collect_output(examples: &[Example]) -> Vec<String> {
    let mut lines = vec!["Examples".to_string()];
    for (idx, example) in examples.iter().enumerate() {
        lines.push(format!(
            "{} {} [{}]",
            format_index(idx + 1),
            example.name,
            example.category
        ));
        lines.push(format!("    Source: {}", example.filename));
    }
    lines.push(String::new());

    let categories = group_by_category(examples).len();
    lines.push(format!(
        "{} {} in {} {}",
        examples.len(),
        plural(examples.len(), "example", "examples"),
        categories,
        plural(categories, "category", "categories"),
    ));
    lines
}

/// Format the pages summary: target file per example plus index.
pub fn format_pages_output(examples: &[Example], gallery_dir: &str) -> Vec<String> {
    let mut lines = vec![format!("Index → {gallery_dir}/index.rst")];
    for (idx, example) in examples.iter().enumerate() {
        lines.push(format!(
            "{} {} → {}/{}.rst",
            format_index(idx + 1),
            example.name,
            gallery_dir,
            example.name
        ));
    }
    lines.push(String::new());
    lines.push(format!(
        "Generated {} example {} + index",
        examples.len(),
        plural(examples.len(), "page", "pages"),
    ));
    lines
}

/// Format the image-stage cache summary line.
pub fn format_images_summary(stats: &CacheStats) -> String {
    if stats.thumbnails > 0 {
        format!("Images: {} / {} thumbnails", stats, stats.thumbnails)
    } else {
        format!("Images: {}", stats)
    }
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 { one } else { many }
}

pub fn print_collect_output(examples: &[Example]) {
    for line in format_collect_output(examples) {
        println!("{line}");
    }
}

pub fn print_pages_output(examples: &[Example], gallery_dir: &str) {
    for line in format_pages_output(examples, gallery_dir) {
        println!("{line}");
    }
}

pub fn print_images_summary(stats: &CacheStats) {
    println!("{}", format_images_summary(stats));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example(name: &str, category: &str) -> Example {
        Example {
            name: name.to_string(),
            filename: format!("{name}.py"),
            docstring: "Doc".to_string(),
            category: category.to_string(),
            code: "chart = x()\n".to_string(),
            lineno: 3,
            params: None,
            prev_ref: None,
            next_ref: None,
        }
    }

    #[test]
    fn collect_output_lists_examples_with_sources() {
        let examples = vec![example("area", "General"), example("bar", "Maps")];
        let lines = format_collect_output(&examples);

        assert_eq!(lines[0], "Examples");
        assert_eq!(lines[1], "001 area [General]");
        assert_eq!(lines[2], "    Source: area.py");
        assert_eq!(lines[3], "002 bar [Maps]");
        assert_eq!(*lines.last().unwrap(), "2 examples in 2 categories");
    }

    #[test]
    fn collect_output_singular_forms() {
        let lines = format_collect_output(&[example("bar", "General")]);
        assert_eq!(*lines.last().unwrap(), "1 example in 1 category");
    }

    #[test]
    fn pages_output_maps_names_to_files() {
        let examples = vec![example("bar", "General")];
        let lines = format_pages_output(&examples, "gallery");

        assert_eq!(lines[0], "Index → gallery/index.rst");
        assert_eq!(lines[1], "001 bar → gallery/bar.rst");
        assert_eq!(*lines.last().unwrap(), "Generated 1 example page + index");
    }

    #[test]
    fn images_summary_includes_thumbnails_when_present() {
        let stats = CacheStats {
            cached: 2,
            rendered: 1,
            thumbnails: 3,
        };
        assert_eq!(
            format_images_summary(&stats),
            "Images: 2 cached, 1 rendered (3 total) / 3 thumbnails"
        );
    }

    #[test]
    fn images_summary_without_thumbnails() {
        let stats = CacheStats {
            cached: 0,
            rendered: 4,
            thumbnails: 0,
        };
        assert_eq!(format_images_summary(&stats), "Images: 4 rendered");
    }
}
