use std::sync::Arc;

use crate::catalog::SubCatalog;
use crate::deeplink::{self, DeepLink};
use crate::domain::{GalleryItem, ItemId, Slide};
use crate::enrich::{self, Caption, CaptionSource, Enricher};
use crate::filter::{CategoryMemo, FilterMemo};
use crate::pagination::{Pagination, Sentinel, BASE_PAGE_SIZE, DEEP_LINK_BUFFER};
use crate::viewer::{Viewer, ViewerEvent};

/// Label of the synthetic category that matches every item.
pub const ALL_LABEL: &str = "All";

/// Per-gallery tunables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryOptions {
    pub page_size: usize,
    pub deep_link_buffer: usize,
    pub all_label: String,
}

impl Default for GalleryOptions {
    fn default() -> Self {
        Self {
            page_size: BASE_PAGE_SIZE,
            deep_link_buffer: DEEP_LINK_BUFFER,
            all_label: ALL_LABEL.to_string(),
        }
    }
}

/// What the grid renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridView {
    pub categories: Vec<String>,
    pub active_filter: String,
    pub items: Vec<GalleryItem>,
    /// Number of items passing the filter, rendered or not.
    pub filtered_len: usize,
    /// Whether the load-more sentinel is mounted after the last item.
    pub has_more: bool,
}

/// One gallery instance: filter strip, paginated grid, lightbox hand-off and
/// caption enrichment over a shared sub-catalog.
///
/// All state changes happen on the owner's thread. Enrichment results are merged by
/// item id when the owner polls, so they stay correct across any number of filter or
/// pagination changes made while extraction was running.
pub struct Gallery<V: Viewer> {
    id: String,
    catalog: SubCatalog,
    options: GalleryOptions,
    items: Vec<GalleryItem>,
    revision: u64,
    active_filter: String,
    pagination: Pagination,
    sentinel: Sentinel,
    categories: CategoryMemo,
    filtered: FilterMemo,
    enricher: Enricher,
    viewer: Option<V>,
    mounted: bool,
    pending_open: Option<(usize, String)>,
}

impl<V: Viewer> Gallery<V> {
    pub fn new(
        id: impl Into<String>,
        catalog: SubCatalog,
        options: GalleryOptions,
        captions: Arc<dyn CaptionSource>,
    ) -> Self {
        let items = catalog.items().to_vec();
        Self {
            id: id.into(),
            pagination: Pagination::new(options.page_size, options.deep_link_buffer),
            active_filter: options.all_label.clone(),
            catalog,
            options,
            items,
            revision: 0,
            sentinel: Sentinel::new(),
            categories: CategoryMemo::new(),
            filtered: FilterMemo::new(),
            enricher: Enricher::new(captions),
            viewer: None,
            mounted: false,
            pending_open: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn active_filter(&self) -> &str {
        &self.active_filter
    }

    pub fn visible_count(&self) -> usize {
        self.pagination.visible_count()
    }

    /// The working copy of the sub-catalog, enriched titles included.
    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    pub fn viewer(&self) -> Option<&V> {
        self.viewer.as_ref()
    }

    pub fn viewer_mut(&mut self) -> Option<&mut V> {
        self.viewer.as_mut()
    }

    /// Resolve the location fragment once.
    ///
    /// A link naming a slide of this gallery widens the first page to include it and asks
    /// the viewer to open it (now, or when the viewer is attached). Returns the slide's
    /// position in the filtered list, or `None` for no link, a miss, a slide hidden by
    /// the active filter, or a repeated mount.
    pub fn mount(&mut self, fragment: Option<&str>) -> Option<usize> {
        if self.mounted {
            return None;
        }
        self.mounted = true;

        let link = fragment.map(DeepLink::parse).unwrap_or_default();
        let position = deeplink::resolve(&link, &self.id, &self.items)?;
        let slug = self.items[position].slug.clone();
        let Some(index) = self
            .filtered_positions()
            .iter()
            .position(|&pos| pos == position)
        else {
            tracing::debug!(
                gallery = %self.id,
                %slug,
                filter = %self.active_filter,
                "deep-linked slide hidden by the active filter, ignoring"
            );
            return None;
        };

        self.pagination.seed_for_slide(index);
        if self.viewer.is_some() {
            self.sync_viewer();
            if let Some(viewer) = self.viewer.as_mut() {
                viewer.open(index, &slug);
            }
        } else {
            self.pending_open = Some((index, slug));
        }
        Some(index)
    }

    /// Keep the viewer handle, give it the current slides and open any pending deep link.
    pub fn attach_viewer(&mut self, viewer: V) {
        self.viewer = Some(viewer);
        self.sync_viewer();
        if let Some((index, slug)) = self.pending_open.take() {
            if let Some(viewer) = self.viewer.as_mut() {
                viewer.open(index, &slug);
            }
        }
    }

    /// Filter strip entries. Computed once per sub-catalog.
    pub fn categories(&mut self) -> &[String] {
        self.categories
            .get(self.catalog.items(), &self.options.all_label)
    }

    pub fn filtered_len(&mut self) -> usize {
        self.filtered_positions().len()
    }

    fn filtered_positions(&mut self) -> &[usize] {
        self.filtered.get(
            &self.items,
            self.revision,
            &self.active_filter,
            &self.options.all_label,
        )
    }

    /// The rendered prefix of the filtered list.
    pub fn visible_items(&mut self) -> Vec<GalleryItem> {
        let positions = self.filtered.get(
            &self.items,
            self.revision,
            &self.active_filter,
            &self.options.all_label,
        );
        let window = self.pagination.window(positions.len());
        positions[..window]
            .iter()
            .map(|&pos| self.items[pos].clone())
            .collect()
    }

    pub fn visible_slides(&mut self) -> Vec<Slide> {
        self.visible_items().iter().map(Slide::from).collect()
    }

    pub fn render(&mut self) -> GridView {
        let categories = self.categories().to_vec();
        let items = self.visible_items();
        let filtered_len = self.filtered_len();
        GridView {
            categories,
            active_filter: self.active_filter.clone(),
            has_more: self.pagination.has_more(filtered_len),
            filtered_len,
            items,
        }
    }

    /// Switch category. Pagination always restarts at the first page.
    /// Returns false when `label` is already active.
    pub fn set_filter(&mut self, label: &str) -> bool {
        if self.active_filter == label {
            return false;
        }
        tracing::debug!(gallery = %self.id, filter = label, "filter changed");
        self.active_filter = label.to_string();
        self.pagination.reset();
        self.sentinel.reset();
        self.sync_viewer();
        true
    }

    /// Reveal the next page of the filtered list. Returns whether anything new became visible.
    pub fn load_more(&mut self) -> bool {
        let filtered_len = self.filtered_len();
        if self.pagination.load_more(filtered_len) {
            self.sync_viewer();
            true
        } else {
            false
        }
    }

    /// Visibility report for the sentinel after the last item. Loads a page on each
    /// hidden-to-visible crossing while there is anything left to show.
    pub fn sentinel_visibility(&mut self, visible: bool) -> bool {
        let filtered_len = self.filtered_len();
        let mounted = self.pagination.has_more(filtered_len);
        if self.sentinel.observe(mounted, visible) {
            self.load_more()
        } else {
            false
        }
    }

    /// The image for `id` finished its first decode: try to enrich its title.
    /// Returns false for unknown ids and items already attempted.
    pub fn image_decoded(&mut self, id: ItemId) -> bool {
        match self.items.iter().find(|item| item.id == id) {
            Some(item) => self.enricher.request(item),
            None => false,
        }
    }

    /// Merge captions that have arrived. Returns how many titles changed.
    pub fn poll_enrichment(&mut self) -> usize {
        let captions = self.enricher.drain();
        self.apply_captions(&captions)
    }

    /// Wait for every in-flight extraction, then merge. Returns how many titles changed.
    pub fn settle_enrichment(&mut self) -> usize {
        let captions = self.enricher.settle();
        self.apply_captions(&captions)
    }

    pub fn enrichment_in_flight(&self) -> usize {
        self.enricher.in_flight()
    }

    /// Merge captions by id into the working copy. Unknown ids are skipped.
    pub fn apply_captions(&mut self, captions: &[Caption]) -> usize {
        let changed = captions
            .iter()
            .filter(|caption| enrich::merge_caption(&mut self.items, caption))
            .count();
        if changed > 0 {
            self.revision += 1;
            self.sync_viewer();
        }
        changed
    }

    /// Fragment the host should write for a viewer navigation. The gallery does not
    /// re-read it: after mount the viewer owns the location hash.
    pub fn viewer_event(&mut self, event: ViewerEvent) -> Option<String> {
        match event {
            ViewerEvent::SlideChanged { index } => {
                let slides = self.visible_slides();
                slides
                    .get(index)
                    .map(|slide| deeplink::fragment_for(&self.id, &slide.slug))
            }
            ViewerEvent::Closed => None,
        }
    }

    /// Stop acting on enrichment results. Dropping the gallery does the same.
    pub fn unmount(&mut self) {
        self.enricher.shutdown();
    }

    fn sync_viewer(&mut self) {
        if self.viewer.is_none() {
            return;
        }
        let slides = self.visible_slides();
        if let Some(viewer) = self.viewer.as_mut() {
            viewer.refresh(&slides);
        }
    }
}
