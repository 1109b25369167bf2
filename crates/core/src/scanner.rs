use std::collections::HashMap;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Ordered mapping from asset path identifiers to resolved references.
///
/// Identifiers are `./`-prefixed, `/`-separated paths relative to the asset root
/// (`./stories/alps/summit.jpg`). Enumeration order is insertion order and is the
/// order items are built in.
#[derive(Debug, Clone, Default)]
pub struct AssetIndex {
    entries: Vec<(String, String)>,
    lookup: HashMap<String, usize>,
}

impl AssetIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an asset. Re-inserting an existing id replaces its reference in place.
    pub fn insert(&mut self, id: impl Into<String>, reference: impl Into<String>) {
        let id = id.into();
        let reference = reference.into();
        match self.lookup.get(&id) {
            Some(&pos) => self.entries[pos].1 = reference,
            None => {
                self.lookup.insert(id.clone(), self.entries.len());
                self.entries.push((id, reference));
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.lookup.get(id).map(|&pos| self.entries[pos].1.as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lookup.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(id, r)| (id.as_str(), r.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<I, R> FromIterator<(I, R)> for AssetIndex
where
    I: Into<String>,
    R: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (I, R)>>(iter: T) -> Self {
        let mut index = AssetIndex::new();
        for (id, reference) in iter {
            index.insert(id, reference);
        }
        index
    }
}

/// Check if a path has one of the given extensions (case-insensitive).
fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| extensions.iter().any(|x| x.eq_ignore_ascii_case(e)))
}

/// Recursively scan an asset root for image files.
/// Entries are visited sorted by file name so the resulting order is stable across runs.
pub fn scan_assets(root: &Path, extensions: &[String]) -> Result<AssetIndex> {
    if !root.exists() {
        return Err(Error::AssetRootNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(Error::AssetRootNotDirectory(root.to_path_buf()));
    }

    let mut index = AssetIndex::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() || !has_extension(entry.path(), extensions) {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let id = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .fold(String::from("."), |mut acc, part| {
                acc.push('/');
                acc.push_str(&part);
                acc
            });
        index.insert(id, entry.path().to_string_lossy().to_string());
    }

    tracing::debug!(root = %root.display(), assets = index.len(), "scanned asset root");
    Ok(index)
}
