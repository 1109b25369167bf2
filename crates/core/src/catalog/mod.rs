pub mod naming;

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::{GalleryItem, ItemId};
use crate::scanner::AssetIndex;

pub use naming::ThumbConvention;

/// Category assigned to images that sit directly under the asset root.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// The full, immutable list of gallery items. Built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Arc<[GalleryItem]>,
}

impl Catalog {
    /// Derive gallery items from an asset index.
    ///
    /// Thumbnails are skipped as primary items. Ids are 1-based positions over the
    /// remaining items in index order. A slug that collides with an earlier one gets
    /// `-<id>` appended so slugs stay unique.
    pub fn build(index: &AssetIndex, thumbs: &ThumbConvention) -> Self {
        let mut items: Vec<GalleryItem> = Vec::with_capacity(index.len());
        let mut seen_slugs: HashSet<String> = HashSet::new();

        for (path, reference) in index.iter() {
            if thumbs.is_thumbnail(path) {
                continue;
            }
            let id = ItemId(items.len() as u32 + 1);
            let name = naming::file_name(path);

            let thumbnail = index
                .get(&thumbs.thumbnail_path(path))
                .unwrap_or(reference)
                .to_string();

            let mut slug = naming::slug_from_filename(name);
            if !seen_slugs.insert(slug.clone()) {
                let renamed = format!("{slug}-{id}");
                tracing::debug!(path, %slug, %renamed, "slug collision, disambiguating");
                slug = renamed;
                seen_slugs.insert(slug.clone());
            }

            items.push(GalleryItem {
                id,
                path: path.to_string(),
                source: reference.to_string(),
                thumbnail,
                category: naming::parent_dir(path).unwrap_or(UNCATEGORIZED).to_string(),
                title: naming::title_from_filename(name),
                slug,
            });
        }

        tracing::info!(assets = index.len(), items = items.len(), "catalog built");
        Self {
            items: items.into(),
        }
    }

    pub fn items(&self) -> &Arc<[GalleryItem]> {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&GalleryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Split the catalog into named sub-catalogs, one per rule, in rule order.
    ///
    /// Each item goes to every rule whose predicate accepts its path. Rules are expected
    /// to be mutually exclusive; overlapping rules put the same item (same id) in several
    /// sub-catalogs, and that is left to the caller.
    pub fn partition<N, P, I>(&self, rules: I) -> Vec<SubCatalog>
    where
        I: IntoIterator<Item = (N, P)>,
        N: Into<String>,
        P: Fn(&str) -> bool,
    {
        rules
            .into_iter()
            .map(|(name, accepts)| {
                let items: Vec<GalleryItem> = self
                    .items
                    .iter()
                    .filter(|item| accepts(item.path.as_str()))
                    .cloned()
                    .collect();
                SubCatalog {
                    name: name.into(),
                    items: items.into(),
                }
            })
            .collect()
    }
}

/// A named, predicate-selected slice of the catalog (e.g. "stories").
#[derive(Debug, Clone)]
pub struct SubCatalog {
    name: String,
    items: Arc<[GalleryItem]>,
}

impl SubCatalog {
    pub fn new(name: impl Into<String>, items: Vec<GalleryItem>) -> Self {
        Self {
            name: name.into(),
            items: items.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shared item list. Clones of the `Arc` compare pointer-equal, which is what the
    /// category memo keys on.
    pub fn items(&self) -> &Arc<[GalleryItem]> {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
