//! In-memory asset registry.
//!
//! Owns the immutable post-initialization asset set and answers list, get,
//! and search queries. The registry must be fully populated before it is
//! queried: queries in any state other than Ready fail fast with
//! [`RegistryError::NotInitialized`] so callers cannot mistake "not yet
//! loaded" for "legitimately empty".

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use super::{discovery, loader, Asset, AssetSummary, Category};

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("asset registry is not initialized")]
    NotInitialized,
}

enum State {
    Uninitialized,
    Initializing,
    Ready(BTreeMap<String, Asset>),
}

/// Optional filters applied by [`AssetRegistry::list`].
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub category: Option<Category>,
    pub locale: Option<String>,
}

pub struct AssetRegistry {
    repo_root: PathBuf,
    state: RwLock<State>,
}

impl AssetRegistry {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
            state: RwLock::new(State::Uninitialized),
        }
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    /// Run discovery and loading across all categories, then transition to
    /// Ready. Returns the number of assets loaded. Idempotent: calling again
    /// after Ready is a no-op reporting the existing count.
    ///
    /// Files that fail to load are skipped with a logged diagnostic; the
    /// batch continues. A BTreeMap keyed by id keeps iteration order stable
    /// within a process run.
    pub fn initialize(&self) -> usize {
        {
            let mut state = self.state.write().expect("registry lock poisoned");
            match &*state {
                State::Ready(assets) => return assets.len(),
                State::Initializing => return 0,
                State::Uninitialized => *state = State::Initializing,
            }
        }

        let discovered = discovery::discover(&self.repo_root);
        tracing::debug!(candidates = discovered.len(), "discovery complete");

        let mut assets = BTreeMap::new();
        for file in &discovered {
            if let Some(asset) = loader::load(file) {
                assets.insert(asset.id.clone(), asset);
            }
        }

        let count = assets.len();
        tracing::info!(count, root = %self.repo_root.display(), "asset registry initialized");
        let mut state = self.state.write().expect("registry lock poisoned");
        *state = State::Ready(assets);
        count
    }

    /// Every asset matching the optional filters, as lightweight summaries.
    /// No filter returns the complete set. Ordering is stable for the
    /// lifetime of the process.
    pub fn list(&self, filter: &ListFilter) -> Result<Vec<AssetSummary>, RegistryError> {
        self.with_ready(|assets| {
            assets
                .values()
                .filter(|a| filter.category.map_or(true, |c| a.category == c))
                .filter(|a| {
                    filter
                        .locale
                        .as_ref()
                        .map_or(true, |l| a.locale.as_deref() == Some(l.as_str()))
                })
                .map(Asset::summary)
                .collect()
        })
    }

    /// Exact-match lookup by full id. A missing id is `Ok(None)`, never an
    /// error.
    pub fn get(&self, id: &str) -> Result<Option<Asset>, RegistryError> {
        self.with_ready(|assets| assets.get(id).cloned())
    }

    /// Keyword search. The keyword string is split on whitespace into
    /// lowercase tokens; an asset matches only if every token occurs as a
    /// substring of its name, path, title, or description (AND semantics,
    /// case-insensitive). An empty or whitespace-only keyword string yields
    /// zero results rather than the full set.
    pub fn search(
        &self,
        keywords: &str,
        category: Option<Category>,
    ) -> Result<Vec<AssetSummary>, RegistryError> {
        let tokens: Vec<String> = keywords
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();
        if tokens.is_empty() {
            return self.with_ready(|_| Vec::new());
        }

        self.with_ready(|assets| {
            assets
                .values()
                .filter(|a| category.map_or(true, |c| a.category == c))
                .filter(|a| {
                    let haystack = search_haystack(a);
                    tokens.iter().all(|t| haystack.contains(t.as_str()))
                })
                .map(Asset::summary)
                .collect()
        })
    }

    fn with_ready<T>(&self, f: impl FnOnce(&BTreeMap<String, Asset>) -> T) -> Result<T, RegistryError> {
        let state = self.state.read().expect("registry lock poisoned");
        match &*state {
            State::Ready(assets) => Ok(f(assets)),
            State::Uninitialized | State::Initializing => Err(RegistryError::NotInitialized),
        }
    }
}

fn search_haystack(asset: &Asset) -> String {
    let mut hay = String::with_capacity(asset.name.len() + asset.path.len() + 64);
    hay.push_str(&asset.name);
    hay.push(' ');
    hay.push_str(&asset.path);
    if let Some(meta) = &asset.metadata {
        if let Some(title) = &meta.title {
            hay.push(' ');
            hay.push_str(title);
        }
        if let Some(desc) = &meta.description {
            hay.push(' ');
            hay.push_str(desc);
        }
    }
    hay.to_lowercase()
}
