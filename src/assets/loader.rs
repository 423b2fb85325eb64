//! Turns a discovered file into a loaded asset.
//!
//! Reads the file as UTF-8 text, derives the asset name and an optional
//! locale from the filename, and extracts simple frontmatter metadata. A file
//! that cannot be read is logged and skipped; it never aborts the batch or
//! produces a partial record.

use std::path::Path;

use super::discovery::name_suffix;
use super::{Asset, AssetMetadata, Category, DiscoveredFile, ASSET_ENCODING};

/// Load one asset. Returns `None` (with a logged diagnostic) when the file
/// cannot be read or decoded. Side-effect-free: loads for a discovery pass
/// may run in any order.
pub fn load(file: &DiscoveredFile) -> Option<Asset> {
    let content = match std::fs::read_to_string(&file.abs_path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(path = %file.rel_path, error = %e, "cannot read asset file, skipping");
            return None;
        }
    };

    let (name, locale) = derive_name(&file.abs_path, file.category);
    let metadata = parse_frontmatter(&content);

    Some(Asset {
        id: format!("{}:{}", file.category, file.rel_path),
        category: file.category,
        name,
        path: file.rel_path.clone(),
        locale,
        content,
        encoding: ASSET_ENCODING,
        metadata,
    })
}

/// Derive (name, locale) from the file path.
///
/// Flat categories strip the category suffix from the filename; a remaining
/// two-letter dot segment directly before the suffix becomes the locale
/// (`foo.it.prompt.md` → name `foo`, locale `it`). Skills ignore the filename
/// and use the parent directory name: the single `SKILL.md` acts as that
/// directory's manifest.
fn derive_name(abs_path: &Path, category: Category) -> (String, Option<String>) {
    let suffix = match name_suffix(category) {
        Some(s) => s,
        None => {
            let name = abs_path
                .parent()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            return (name, None);
        }
    };

    let file_name = abs_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let base = file_name.strip_suffix(suffix).unwrap_or(&file_name);

    if let Some((stem, tag)) = base.rsplit_once('.') {
        if tag.len() == 2 && tag.chars().all(|c| c.is_ascii_alphabetic()) && !stem.is_empty() {
            return (stem.to_string(), Some(tag.to_string()));
        }
    }
    (base.to_string(), None)
}

/// Best-effort line-oriented frontmatter extraction.
///
/// Recognizes a leading `---` line, a block of `key: value` lines, and a
/// closing `---` line. Values may be unquoted, single-quoted, or
/// double-quoted; `tags` takes a comma-separated list with optional
/// surrounding brackets. Lines that do not match are ignored. A file without
/// a well-formed delimiter pair yields no metadata. This is intentionally not
/// a structured-document parser: consumers only see the three flat fields.
pub fn parse_frontmatter(content: &str) -> Option<AssetMetadata> {
    let mut lines = content.lines();
    if lines.next().map(str::trim_end) != Some("---") {
        return None;
    }

    let mut meta = AssetMetadata::default();
    let mut closed = false;

    for line in lines {
        if line.trim_end() == "---" {
            closed = true;
            break;
        }
        let Some((key, raw)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let value = unquote(raw.trim());
        match key {
            "title" => meta.title = Some(value.to_string()),
            "description" => meta.description = Some(value.to_string()),
            "tags" => meta.tags = parse_tags(value),
            _ => {}
        }
    }

    if !closed {
        return None;
    }
    Some(meta)
}

/// Strip one matching pair of single or double quotes.
fn unquote(s: &str) -> &str {
    let bytes = s.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return &s[1..s.len() - 1];
        }
    }
    s
}

fn parse_tags(value: &str) -> Vec<String> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .unwrap_or(value);
    inner
        .split(',')
        .map(|t| unquote(t.trim()).to_string())
        .filter(|t| !t.is_empty())
        .collect()
}
