//! Example collection: enumerate, sort, and parse gallery scripts.
//!
//! Stage 1 of the gallery build. Walks the examples directory (flat, no
//! recursion; the example set is a curated single directory), sorts entries
//! by name so every downstream stage sees the same deterministic order, and
//! parses each script into an [`Example`] record via [`crate::extract`].
//!
//! ## Sidecar parameters
//!
//! An example may carry a TOML sidecar with the same stem
//! (`scatter-matrix.py` + `scatter-matrix.toml`) holding thumbnail crop
//! overrides. Sidecars are optional; a malformed sidecar fails the build.
//!
//! ## Categories
//!
//! The category comes from a `# category:` marker inside the script. Absent
//! markers default to `general`, and the resolved value is title-cased, so
//! `simple charts` and an absent marker group as "Simple Charts" and
//! "General" on the index page.

use crate::extract::{self, ExtractError};
use crate::thumbs::ThumbParams;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CollectError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ExtractError,
    },
    #[error("failed to parse sidecar {path}: {source}")]
    Sidecar {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// One gallery entry: a runnable script producing one chart.
#[derive(Debug, Clone, Serialize)]
pub struct Example {
    /// File stem; unique within the gallery and the sort key.
    pub name: String,
    /// Source file name (stem + extension).
    pub filename: String,
    /// Docstring from the script header; becomes the page body.
    pub docstring: String,
    /// Resolved category, title-cased ("General" when unspecified).
    pub category: String,
    /// Code body with docstring and category marker stripped.
    pub code: String,
    /// 1-based line where the code body starts in the source file.
    pub lineno: usize,
    /// Thumbnail crop overrides from the sidecar file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<ThumbParams>,
    /// Ref label of the previous example in sort order. Filled during page
    /// rendering; the first example has none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_ref: Option<String>,
    /// Ref label of the next example in sort order; the last has none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_ref: Option<String>,
}

const DEFAULT_CATEGORY: &str = "general";

/// Collect all examples with the given extension, sorted by name.
pub fn collect(examples_dir: &Path, script_ext: &str) -> Result<Vec<Example>, CollectError> {
    let mut script_paths: Vec<PathBuf> = fs::read_dir(examples_dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && !p
                    .file_name()
                    .map(|n| n.to_string_lossy().starts_with('.'))
                    .unwrap_or(true)
                && p.extension()
                    .map(|e| e.eq_ignore_ascii_case(script_ext))
                    .unwrap_or(false)
        })
        .collect();

    // Sort by file stem: the gallery's one canonical ordering.
    script_paths.sort_by_key(|p| {
        p.file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    });

    script_paths
        .iter()
        .map(|path| load_example(path))
        .collect()
}

fn load_example(path: &Path) -> Result<Example, CollectError> {
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let filename = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    let source = fs::read_to_string(path)?;
    let parsed = extract::parse_script(&source).map_err(|source| CollectError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let sidecar_path = path.with_extension("toml");
    let params = if sidecar_path.exists() {
        let content = fs::read_to_string(&sidecar_path)?;
        Some(
            toml::from_str(&content).map_err(|source| CollectError::Sidecar {
                path: sidecar_path,
                source,
            })?,
        )
    } else {
        None
    };

    let category = title_case(
        parsed
            .category
            .as_deref()
            .unwrap_or(DEFAULT_CATEGORY),
    );

    Ok(Example {
        name,
        filename,
        docstring: parsed.docstring,
        category,
        code: parsed.code,
        lineno: parsed.lineno,
        params,
        prev_ref: None,
        next_ref: None,
    })
}

/// Title-case a category: first letter of each word uppercased, rest lowered.
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_example(dir: &Path, name: &str, category: Option<&str>) {
        let marker = category
            .map(|c| format!("# category: {c}\n"))
            .unwrap_or_default();
        let body = format!("\"\"\"\n{name}\n\"\"\"\n{marker}chart = make_chart()\n");
        fs::write(dir.join(format!("{name}.py")), body).unwrap();
    }

    #[test]
    fn collects_sorted_by_name() {
        let tmp = TempDir::new().unwrap();
        write_example(tmp.path(), "scatter", None);
        write_example(tmp.path(), "area", None);
        write_example(tmp.path(), "bar", None);

        let examples = collect(tmp.path(), "py").unwrap();
        let names: Vec<&str> = examples.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["area", "bar", "scatter"]);
    }

    #[test]
    fn sort_is_deterministic() {
        let tmp = TempDir::new().unwrap();
        for name in ["c", "a", "b", "aa"] {
            write_example(tmp.path(), name, None);
        }
        let first = collect(tmp.path(), "py").unwrap();
        let second = collect(tmp.path(), "py").unwrap();
        let names = |v: &[Example]| v.iter().map(|e| e.name.clone()).collect::<Vec<_>>();
        assert_eq!(names(&first), names(&second));
        assert_eq!(names(&first), vec!["a", "aa", "b", "c"]);
    }

    #[test]
    fn category_defaults_to_general_title_cased() {
        let tmp = TempDir::new().unwrap();
        write_example(tmp.path(), "plain", None);

        let examples = collect(tmp.path(), "py").unwrap();
        assert_eq!(examples[0].category, "General");
    }

    #[test]
    fn category_marker_is_title_cased() {
        let tmp = TempDir::new().unwrap();
        write_example(tmp.path(), "bars", Some("simple charts"));

        let examples = collect(tmp.path(), "py").unwrap();
        assert_eq!(examples[0].category, "Simple Charts");
    }

    #[test]
    fn non_script_files_ignored() {
        let tmp = TempDir::new().unwrap();
        write_example(tmp.path(), "bar", None);
        fs::write(tmp.path().join("README.md"), "notes").unwrap();
        fs::write(tmp.path().join(".hidden.py"), "junk").unwrap();

        let examples = collect(tmp.path(), "py").unwrap();
        assert_eq!(examples.len(), 1);
        assert_eq!(examples[0].name, "bar");
    }

    #[test]
    fn sidecar_params_loaded() {
        let tmp = TempDir::new().unwrap();
        write_example(tmp.path(), "wide", None);
        fs::write(tmp.path().join("wide.toml"), "width = 400\nyoffset = 20\n").unwrap();

        let examples = collect(tmp.path(), "py").unwrap();
        let params = examples[0].params.as_ref().unwrap();
        assert_eq!(params.width, Some(400));
        assert_eq!(params.yoffset, Some(20));
        assert_eq!(params.height, None);
    }

    #[test]
    fn malformed_sidecar_is_error() {
        let tmp = TempDir::new().unwrap();
        write_example(tmp.path(), "bad", None);
        fs::write(tmp.path().join("bad.toml"), "width = \"wat").unwrap();

        assert!(matches!(
            collect(tmp.path(), "py"),
            Err(CollectError::Sidecar { .. })
        ));
    }

    #[test]
    fn missing_docstring_fails_collection() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("broken.py"), "chart = 1\n").unwrap();

        assert!(matches!(
            collect(tmp.path(), "py"),
            Err(CollectError::Parse { .. })
        ));
    }

    #[test]
    fn filename_and_lineno_recorded() {
        let tmp = TempDir::new().unwrap();
        write_example(tmp.path(), "bar", Some("x"));

        let examples = collect(tmp.path(), "py").unwrap();
        assert_eq!(examples[0].filename, "bar.py");
        assert_eq!(examples[0].lineno, 4);
    }

    #[test]
    fn title_case_basics() {
        assert_eq!(title_case("general"), "General");
        assert_eq!(title_case("simple charts"), "Simple Charts");
        assert_eq!(title_case("ALREADY UPPER"), "Already Upper");
        assert_eq!(title_case(""), "");
    }
}
