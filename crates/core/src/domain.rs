use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of an item within one catalog instance.
/// 1-based position in catalog build order; never persisted across rebuilds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One image in the portfolio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub id: ItemId,
    /// Asset path identifier the item was built from, e.g. `./stories/alps/summit.jpg`.
    pub path: String,
    /// Full-resolution reference.
    pub source: String,
    /// Thumbnail reference; equals `source` when no thumbnail asset exists.
    pub thumbnail: String,
    /// Name of the immediate parent directory.
    pub category: String,
    /// Display title. Catalog-derived, replaced by the enricher when the image carries a caption.
    pub title: String,
    /// URL-safe deep-link key, unique within one catalog.
    pub slug: String,
}

/// What the viewer is handed for each visible item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    pub source_ref: String,
    pub display_title: String,
    pub category_label: String,
    pub slug: String,
}

impl From<&GalleryItem> for Slide {
    fn from(item: &GalleryItem) -> Self {
        Self {
            source_ref: item.source.clone(),
            display_title: item.title.clone(),
            category_label: item.category.clone(),
            slug: item.slug.clone(),
        }
    }
}
