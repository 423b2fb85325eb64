//! Filesystem discovery of candidate asset files.
//!
//! Each category maps to one subdirectory under the repository root and one
//! filename rule. Most categories are flat directories; skills are one
//! `SKILL.md` per subdirectory, walked recursively. The walk never leaves the
//! category's own subtree.

use std::path::Path;

use walkdir::WalkDir;

use super::{Category, DiscoveredFile};

/// Filename match rule for one category.
enum FileRule {
    /// Filename must end with the given suffix.
    Suffix(&'static str),
    /// Filename must equal the given name exactly.
    Exact(&'static str),
}

/// Compiled-in discovery table. Exhaustive over the closed category set so a
/// new variant cannot be forgotten here.
fn category_spec(cat: Category) -> (&'static str, FileRule, bool) {
    match cat {
        Category::Prompt => (".cfg/prompts", FileRule::Suffix(".prompt.md"), false),
        Category::Agent => (".cfg/agents", FileRule::Suffix(".agent.md"), false),
        Category::Instruction => (
            ".cfg/instructions",
            FileRule::Suffix(".instructions.md"),
            false,
        ),
        Category::Skill => (".cfg/skills", FileRule::Exact("SKILL.md"), true),
    }
}

/// Filename suffix stripped when deriving an asset's name. Skills derive
/// their name from the parent directory instead, so the rule name is unused.
pub fn name_suffix(cat: Category) -> Option<&'static str> {
    match category_spec(cat).1 {
        FileRule::Suffix(s) => Some(s),
        FileRule::Exact(_) => None,
    }
}

/// Enumerate every candidate asset file under `repo_root`, across all
/// categories. Missing subdirectories contribute nothing; other filesystem
/// errors are logged and skip only the affected subtree. Output order is
/// unspecified.
pub fn discover(repo_root: &Path) -> Vec<DiscoveredFile> {
    let mut found = Vec::new();
    for cat in Category::ALL {
        discover_category(repo_root, cat, &mut found);
    }
    found
}

fn discover_category(repo_root: &Path, cat: Category, out: &mut Vec<DiscoveredFile>) {
    let (subdir, rule, recursive) = category_spec(cat);
    let dir = repo_root.join(subdir);

    if !dir.is_dir() {
        tracing::debug!(category = %cat, dir = %dir.display(), "asset directory absent, skipping");
        return;
    }

    if recursive {
        for entry in WalkDir::new(&dir).follow_links(false) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!(category = %cat, error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            if matches_rule(entry.file_name().to_string_lossy().as_ref(), &rule) {
                push_discovered(repo_root, entry.path(), cat, out);
            }
        }
    } else {
        let entries = match std::fs::read_dir(&dir) {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(category = %cat, dir = %dir.display(), error = %e, "cannot read asset directory");
                return;
            }
        };
        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!(category = %cat, error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
            if !is_file {
                continue;
            }
            if matches_rule(entry.file_name().to_string_lossy().as_ref(), &rule) {
                push_discovered(repo_root, &entry.path(), cat, out);
            }
        }
    }
}

fn matches_rule(file_name: &str, rule: &FileRule) -> bool {
    match rule {
        FileRule::Suffix(suffix) => file_name.ends_with(suffix),
        FileRule::Exact(name) => file_name == *name,
    }
}

fn push_discovered(repo_root: &Path, abs: &Path, cat: Category, out: &mut Vec<DiscoveredFile>) {
    let rel = match abs.strip_prefix(repo_root) {
        Ok(r) => r,
        Err(_) => {
            // Cannot happen for paths produced by walking under the root.
            tracing::warn!(path = %abs.display(), "discovered file outside repo root, skipping");
            return;
        }
    };
    let rel_path = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");

    out.push(DiscoveredFile {
        abs_path: abs.to_path_buf(),
        rel_path,
        category: cat,
    });
}
