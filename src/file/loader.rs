//! Loading templates and candidate data from files or stdin.
//!
//! Files may be YAML (one or more `---` separated documents), JSON, or JSON
//! Lines (`.jsonl` / `.ndjson`). Any of them may be gzip compressed (`.gz`).
//! Every document becomes one template or one candidate.

use crate::document::node::DataNode;
use crate::document::parser::{data_from_json, parse_data_documents, parse_templates};
use crate::document::template::TemplateNode;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Loads every template document in a file.
///
/// The file is read as a YAML stream, so one file may hold several
/// `---` separated templates. JSON files are valid YAML and load the same
/// way.
///
/// # Arguments
///
/// * `path` - The template file, optionally gzip compressed (`.gz`)
/// * `wildcard` - Template string that becomes [`TemplateNode::Wildcard`]
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(Vec<TemplateNode>)` with one template per document, in file order
/// - `Err(anyhow::Error)` if the file cannot be read or parsed
///
/// # Examples
///
/// ```no_run
/// use dpath_validator::file::loader::load_template_file;
///
/// let templates = load_template_file("service.template.yaml", "*").unwrap();
/// println!("{} templates", templates.len());
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - The file path does not exist or cannot be read
/// - A `.gz` file is not valid gzip
/// - Any document is not valid YAML/JSON
pub fn load_template_file<P: AsRef<Path>>(path: P, wildcard: &str) -> Result<Vec<TemplateNode>> {
    let path_ref = path.as_ref();

    // Read content (decompress if needed)
    let content = read_file(path_ref)?;
    let templates = parse_templates(&content, wildcard)
        .with_context(|| format!("Failed to parse template {}", path_ref.display()))?;
    debug!(path = %path_ref.display(), count = templates.len(), "loaded templates");
    Ok(templates)
}

/// Loads every candidate in a data file.
///
/// `.jsonl` and `.ndjson` files (optionally followed by `.gz`) yield one
/// candidate per non-blank line. Anything else is read as a YAML stream
/// with one candidate per document.
///
/// # Arguments
///
/// * `path` - The data file to load
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(Vec<DataNode>)` with the candidates in file order
/// - `Err(anyhow::Error)` if the file cannot be read or parsed
///
/// # Examples
///
/// ```no_run
/// use dpath_validator::file::loader::load_data_file;
///
/// let candidates = load_data_file("events.jsonl.gz").unwrap();
/// println!("{} candidates", candidates.len());
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - The file path does not exist or cannot be read
/// - A `.gz` file is not valid gzip
/// - The file is empty
/// - A document or JSON line is malformed
pub fn load_data_file<P: AsRef<Path>>(path: P) -> Result<Vec<DataNode>> {
    let path_ref = path.as_ref();

    // Read content (decompress if needed)
    let content = read_file(path_ref)?;

    // Determine format from filename (before .gz)
    let candidates = if determine_jsonl_format(path_ref) {
        parse_jsonl_content(&content)
    } else {
        parse_data_documents(&content)
    }
    .with_context(|| format!("Failed to parse data {}", path_ref.display()))?;

    debug!(path = %path_ref.display(), count = candidates.len(), "loaded candidates");
    Ok(candidates)
}

/// Loads candidates from standard input.
///
/// Gzip input is detected by its magic bytes. The content is tried as YAML
/// documents first and as JSON Lines second.
///
/// # Errors
///
/// This function will return an error if:
/// - stdin cannot be read or is not UTF-8 after decompression
/// - The content is neither a YAML stream nor JSON Lines
pub fn load_data_from_stdin() -> Result<Vec<DataNode>> {
    use std::io::{self, Read};

    let mut buffer = Vec::new();
    io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;

    // Check for gzip magic bytes
    let content = if buffer.starts_with(&[0x1f, 0x8b]) {
        decompress_gzip_bytes(&buffer)?
    } else {
        String::from_utf8(buffer).context("Invalid UTF-8 in stdin")?
    };

    // JSON Lines is not valid YAML, so a YAML failure falls through to it
    if let Ok(candidates) = parse_data_documents(&content) {
        return Ok(candidates);
    }

    parse_jsonl_content(&content)
        .context("Failed to parse stdin: input is neither YAML/JSON nor JSON Lines")
}

/// Parses JSON Lines content; each non-blank line is one candidate.
///
/// # Errors
///
/// Returns an error naming the first malformed line, or if no line holds
/// any JSON.
pub fn parse_jsonl_content(content: &str) -> Result<Vec<DataNode>> {
    let mut candidates = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let value: serde_json::Value = serde_json::from_str(line)
            .with_context(|| format!("Invalid JSON on line {}", line_num + 1))?;
        candidates.push(data_from_json(&value));
    }

    if candidates.is_empty() {
        anyhow::bail!("No valid JSON found in JSONL content");
    }

    Ok(candidates)
}

fn read_file(path: &Path) -> Result<String> {
    let is_gzipped = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    if is_gzipped {
        read_gzipped_file(path)
    } else {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }
}

/// Checks for a .jsonl or .ndjson extension, ignoring a trailing .gz.
fn determine_jsonl_format<P: AsRef<Path>>(path: P) -> bool {
    let path_str = path.as_ref().to_string_lossy();

    let base = if let Some(stripped) = path_str.strip_suffix(".gz") {
        stripped
    } else {
        &path_str
    };

    base.ends_with(".jsonl") || base.ends_with(".ndjson")
}

fn read_gzipped_file<P: AsRef<Path>>(path: P) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let file = fs::File::open(path).context("Failed to open gzipped file")?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped file - file may be corrupted")?;
    Ok(content)
}

fn decompress_gzip_bytes(bytes: &[u8]) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let mut decoder = GzDecoder::new(bytes);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped stdin")?;
    Ok(content)
}
