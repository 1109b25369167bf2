use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::GalleryItem;

/// `[all_label, ...distinct categories ascending]`.
pub fn categories_of(items: &[GalleryItem], all_label: &str) -> Vec<String> {
    let distinct: BTreeSet<&str> = items
        .iter()
        .map(|item| item.category.as_str())
        .filter(|category| *category != all_label)
        .collect();
    std::iter::once(all_label)
        .chain(distinct)
        .map(str::to_string)
        .collect()
}

/// Items whose category equals `active`, or every item when `active` is the all label.
/// Order is preserved.
pub fn apply_filter<'a>(
    items: &'a [GalleryItem],
    active: &str,
    all_label: &str,
) -> Vec<&'a GalleryItem> {
    if active == all_label {
        return items.iter().collect();
    }
    items.iter().filter(|item| item.category == active).collect()
}

/// Caches `categories_of` against the identity of the item list.
///
/// Recomputes only when handed a different `Arc` (pointer inequality) or label.
#[derive(Debug, Default)]
pub struct CategoryMemo {
    source: Option<Arc<[GalleryItem]>>,
    label: String,
    categories: Vec<String>,
    computations: usize,
}

impl CategoryMemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, items: &Arc<[GalleryItem]>, all_label: &str) -> &[String] {
        let fresh = self
            .source
            .as_ref()
            .is_some_and(|cached| Arc::ptr_eq(cached, items) && self.label == all_label);
        if !fresh {
            self.categories = categories_of(items, all_label);
            self.source = Some(Arc::clone(items));
            self.label = all_label.to_string();
            self.computations += 1;
        }
        &self.categories
    }

    /// How many times the category list has been computed.
    pub fn computations(&self) -> usize {
        self.computations
    }
}

/// Caches filtered positions for a versioned item list.
///
/// The gallery bumps its revision whenever it replaces a title, so the key
/// `(revision, filter)` changes exactly when the filtered view can.
#[derive(Debug, Default)]
pub struct FilterMemo {
    key: Option<(u64, String)>,
    positions: Vec<usize>,
}

impl FilterMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Positions into `items` of the entries that pass the filter.
    pub fn get(
        &mut self,
        items: &[GalleryItem],
        revision: u64,
        active: &str,
        all_label: &str,
    ) -> &[usize] {
        let fresh = self
            .key
            .as_ref()
            .is_some_and(|(rev, filter)| *rev == revision && filter == active);
        if !fresh {
            self.positions = items
                .iter()
                .enumerate()
                .filter(|(_, item)| active == all_label || item.category == active)
                .map(|(pos, _)| pos)
                .collect();
            self.key = Some((revision, active.to_string()));
        }
        &self.positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemId;

    fn make_item(id: u32, category: &str) -> GalleryItem {
        GalleryItem {
            id: ItemId(id),
            path: format!("./{category}/{id}.jpg"),
            source: format!("/a/{id}.jpg"),
            thumbnail: format!("/a/{id}.jpg"),
            category: category.to_string(),
            title: format!("Item {id}"),
            slug: format!("item-{id}"),
        }
    }

    fn sample() -> Vec<GalleryItem> {
        vec![
            make_item(1, "Mountains"),
            make_item(2, "City"),
            make_item(3, "Mountains"),
            make_item(4, "Coast"),
            make_item(5, "City"),
        ]
    }

    #[test]
    fn test_categories_all_first_then_sorted_distinct() {
        let cats = categories_of(&sample(), "All");
        assert_eq!(cats, vec!["All", "City", "Coast", "Mountains"]);
    }

    #[test]
    fn test_categories_custom_label() {
        let cats = categories_of(&sample(), "Everything");
        assert_eq!(cats[0], "Everything");
        assert_eq!(cats.len(), 4);
    }

    #[test]
    fn test_categories_empty_list() {
        assert_eq!(categories_of(&[], "All"), vec!["All"]);
    }

    #[test]
    fn test_categories_never_repeat_all_label() {
        let items = vec![make_item(1, "All"), make_item(2, "City")];
        assert_eq!(categories_of(&items, "All"), vec!["All", "City"]);
    }

    #[test]
    fn test_apply_filter_all_is_identity() {
        let items = sample();
        let filtered = apply_filter(&items, "All", "All");
        let ids: Vec<ItemId> = filtered.iter().map(|i| i.id).collect();
        let expected: Vec<ItemId> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_apply_filter_keeps_order() {
        let items = sample();
        let filtered = apply_filter(&items, "City", "All");
        let ids: Vec<u32> = filtered.iter().map(|i| i.id.0).collect();
        assert_eq!(ids, vec![2, 5]);
    }

    #[test]
    fn test_apply_filter_unknown_category_is_empty() {
        let items = sample();
        assert!(apply_filter(&items, "Desert", "All").is_empty());
    }

    #[test]
    fn test_category_memo_recomputes_only_on_new_list() {
        let items: Arc<[GalleryItem]> = sample().into();
        let mut memo = CategoryMemo::new();

        memo.get(&items, "All");
        memo.get(&items, "All");
        memo.get(&Arc::clone(&items), "All");
        assert_eq!(memo.computations(), 1);

        // Same contents, different allocation
        let rebuilt: Arc<[GalleryItem]> = sample().into();
        memo.get(&rebuilt, "All");
        assert_eq!(memo.computations(), 2);
    }

    #[test]
    fn test_filter_memo_tracks_revision_and_filter() {
        let items = sample();
        let mut memo = FilterMemo::new();

        assert_eq!(memo.get(&items, 0, "City", "All"), &[1, 4]);
        assert_eq!(memo.get(&items, 0, "All", "All"), &[0, 1, 2, 3, 4]);

        let mut changed = items.clone();
        changed[0].category = "City".to_string();
        // Stale revision returns the cached answer
        assert_eq!(memo.get(&changed, 0, "All", "All").len(), 5);
        assert_eq!(memo.get(&changed, 1, "City", "All"), &[0, 1, 4]);
    }
}
