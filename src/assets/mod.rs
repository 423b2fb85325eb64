//! Asset model: categories, loaded assets, and their summaries.

pub mod discovery;
pub mod loader;
pub mod registry;

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Text encoding tag recorded on every asset. Binary assets are unsupported.
pub const ASSET_ENCODING: &str = "utf-8";

/// Closed classification of an asset, determined by its source subdirectory
/// and filename convention. Adding a category means extending this enum; the
/// discovery table is an exhaustive match so the compiler flags every site
/// that needs updating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Prompt,
    Agent,
    Instruction,
    Skill,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Prompt,
        Category::Agent,
        Category::Instruction,
        Category::Skill,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Prompt => "prompt",
            Category::Agent => "agent",
            Category::Instruction => "instruction",
            Category::Skill => "skill",
        }
    }

    /// Parse a category tag as supplied by a tool caller.
    pub fn parse(s: &str) -> Option<Category> {
        match s {
            "prompt" => Some(Category::Prompt),
            "agent" => Some(Category::Agent),
            "instruction" => Some(Category::Instruction),
            "skill" => Some(Category::Skill),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A candidate file produced by discovery and consumed immediately by the
/// loader. Not retained after initialization.
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    pub abs_path: PathBuf,
    /// Repo-relative path, normalized to forward slashes on every platform.
    pub rel_path: String,
    pub category: Category,
}

/// Metadata extracted from an optional leading frontmatter block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssetMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub tags: Vec<String>,
}

/// One loaded asset. Immutable after registry initialization.
#[derive(Debug, Clone, Serialize)]
pub struct Asset {
    /// Stable lookup key: `{category}:{rel_path}`.
    pub id: String,
    pub category: Category,
    /// Human-readable name derived from the filename (category suffix
    /// stripped), or the parent directory name for skills.
    pub name: String,
    /// Repo-relative path, kept for display and debugging.
    pub path: String,
    /// Two-letter locale tag when the filename embeds one
    /// (`name.xx.category.ext`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Verbatim file content. Frontmatter is not stripped.
    pub content: String,
    pub encoding: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<AssetMetadata>,
}

impl Asset {
    pub fn summary(&self) -> AssetSummary {
        AssetSummary {
            id: self.id.clone(),
            category: self.category,
            name: self.name.clone(),
            path: self.path.clone(),
            locale: self.locale.clone(),
            description: self
                .metadata
                .as_ref()
                .and_then(|m| m.description.clone()),
        }
    }
}

/// Lightweight row returned by the list and search tools. Content is only
/// available through `get_asset`.
#[derive(Debug, Clone, Serialize)]
pub struct AssetSummary {
    pub id: String,
    pub category: Category,
    pub name: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
