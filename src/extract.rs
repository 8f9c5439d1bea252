//! Example script parsing: docstring, category, and code extraction.
//!
//! Every gallery example is a plain script with a fixed shape:
//!
//! ```text
//! # optional leading comment lines (shebang, license, encoding)
//! """
//! Scatter Plot
//! ------------
//! A basic scatter plot with tooltips.
//! """
//! # category: simple charts
//! chart = Chart(data).mark_point()
//! ```
//!
//! The docstring is mandatory (it becomes the body of the generated page);
//! a missing or unterminated docstring fails the build. The category
//! marker is optional and is consumed (removed from the code body) when
//! present. The reported line number is where the code body starts in the
//! original file, so downstream tooling can point at real source lines.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("script has no leading docstring")]
    MissingDocstring,
    #[error("docstring opened on line {0} is never closed")]
    UnterminatedDocstring(usize),
}

/// The pieces of one example script.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedScript {
    /// Docstring text with the delimiters stripped and surrounding blank
    /// lines trimmed.
    pub docstring: String,
    /// Raw category marker value, if the script carries one. Not normalized;
    /// the collector owns defaulting and title-casing.
    pub category: Option<String>,
    /// Code body after the docstring, category marker removed.
    pub code: String,
    /// 1-based line number where the code body starts.
    pub lineno: usize,
}

const DELIMITERS: [&str; 2] = ["\"\"\"", "'''"];

/// Split a script into docstring, category, and code.
pub fn parse_script(source: &str) -> Result<ParsedScript, ExtractError> {
    let lines: Vec<&str> = source.lines().collect();

    // Skip leading blank lines and comment lines before the docstring.
    let mut idx = 0;
    while idx < lines.len() {
        let trimmed = lines[idx].trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            idx += 1;
        } else {
            break;
        }
    }

    let open_line = idx;
    let delim = lines
        .get(idx)
        .map(|l| l.trim())
        .and_then(|l| DELIMITERS.iter().find(|d| l.starts_with(**d)))
        .ok_or(ExtractError::MissingDocstring)?;

    let mut doc_lines: Vec<String> = Vec::new();
    let after_open = lines[idx].trim().strip_prefix(delim).unwrap_or("");
    if let Some(rest) = after_open.strip_suffix(delim).filter(|_| !after_open.is_empty()) {
        // One-line docstring: """text"""
        doc_lines.push(rest.to_string());
        idx += 1;
    } else {
        if !after_open.is_empty() {
            doc_lines.push(after_open.to_string());
        }
        idx += 1;
        loop {
            let line = lines
                .get(idx)
                .ok_or(ExtractError::UnterminatedDocstring(open_line + 1))?;
            if let Some(before_close) = line.trim_end().strip_suffix(delim) {
                if !before_close.trim().is_empty() {
                    doc_lines.push(before_close.to_string());
                }
                idx += 1;
                break;
            }
            doc_lines.push(line.to_string());
            idx += 1;
        }
    }

    // Trim blank lines at both ends of the docstring.
    while doc_lines.first().is_some_and(|l| l.trim().is_empty()) {
        doc_lines.remove(0);
    }
    while doc_lines.last().is_some_and(|l| l.trim().is_empty()) {
        doc_lines.pop();
    }

    // Skip blank lines between docstring and code; the first kept line is
    // where the code body starts.
    while idx < lines.len() && lines[idx].trim().is_empty() {
        idx += 1;
    }
    let lineno = idx + 1;

    let mut category = None;
    let mut code_lines: Vec<&str> = Vec::new();
    for line in &lines[idx..] {
        match (category.is_none(), parse_category_marker(line)) {
            (true, Some(value)) => category = Some(value),
            _ => code_lines.push(line),
        }
    }
    while code_lines.first().is_some_and(|l| l.trim().is_empty()) {
        code_lines.remove(0);
    }
    let mut code = code_lines.join("\n");
    if !code.is_empty() {
        code.push('\n');
    }

    Ok(ParsedScript {
        docstring: doc_lines.join("\n"),
        category,
        code,
        lineno,
    })
}

/// Parse a `# category: <text>` marker line. Returns the trimmed value.
fn parse_category_marker(line: &str) -> Option<String> {
    let rest = line.trim().strip_prefix('#')?.trim_start();
    let value = rest.strip_prefix("category:")?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
