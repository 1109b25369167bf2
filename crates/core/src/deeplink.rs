//! Location-fragment handling: `#lg=<galleryId>&slide=<slug>`.
//!
//! Fragments are read once per gallery mount. After that the viewer owns the
//! location hash; [`fragment_for`] renders what it should write.

use crate::domain::GalleryItem;

/// Signals recognised in a location fragment. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeepLink {
    pub gallery: Option<String>,
    pub slide: Option<String>,
}

impl DeepLink {
    /// Parse a fragment, with or without the leading `#`.
    ///
    /// Pairs are `&`-separated `key=value`; the first occurrence of a key wins and empty
    /// values are treated as absent.
    pub fn parse(fragment: &str) -> Self {
        let mut link = DeepLink::default();
        let body = fragment.strip_prefix('#').unwrap_or(fragment);

        for pair in body.split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            if value.is_empty() {
                continue;
            }
            let slot = match key {
                "lg" => &mut link.gallery,
                "slide" => &mut link.slide,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.to_string());
            }
        }
        link
    }

    /// The requested slide, but only when the link targets `gallery_id`.
    pub fn slide_for(&self, gallery_id: &str) -> Option<&str> {
        match (&self.gallery, &self.slide) {
            (Some(gallery), Some(slide)) if gallery == gallery_id => Some(slide),
            _ => None,
        }
    }
}

/// Position of the deep-linked slide in `items`, if the link targets this gallery and
/// names a slug it contains. Misses are silent and leave the default view in place.
pub fn resolve(link: &DeepLink, gallery_id: &str, items: &[GalleryItem]) -> Option<usize> {
    let slug = link.slide_for(gallery_id)?;
    let index = items.iter().position(|item| item.slug == slug);
    if index.is_none() {
        tracing::debug!(gallery = gallery_id, slug, "deep-linked slide not found, ignoring");
    }
    index
}

/// Fragment the viewer writes when it shows `slug` in `gallery_id`.
pub fn fragment_for(gallery_id: &str, slug: &str) -> String {
    format!("#lg={gallery_id}&slide={slug}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, ThumbConvention};
    use crate::domain::ItemId;
    use crate::scanner::AssetIndex;

    fn items(slugs: &[&str]) -> Vec<GalleryItem> {
        slugs
            .iter()
            .enumerate()
            .map(|(i, slug)| GalleryItem {
                id: ItemId(i as u32 + 1),
                path: format!("./c/{slug}.jpg"),
                source: format!("/a/{slug}.jpg"),
                thumbnail: format!("/a/{slug}.jpg"),
                category: "c".to_string(),
                title: slug.to_string(),
                slug: slug.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_parse_full_link() {
        let link = DeepLink::parse("#lg=portfolio&slide=misty-lake");
        assert_eq!(link.gallery.as_deref(), Some("portfolio"));
        assert_eq!(link.slide.as_deref(), Some("misty-lake"));
    }

    #[test]
    fn test_parse_without_hash_and_reordered() {
        let link = DeepLink::parse("slide=x&lg=g");
        assert_eq!(link.gallery.as_deref(), Some("g"));
        assert_eq!(link.slide.as_deref(), Some("x"));
    }

    #[test]
    fn test_parse_ignores_garbage() {
        assert_eq!(DeepLink::parse(""), DeepLink::default());
        assert_eq!(DeepLink::parse("#"), DeepLink::default());
        assert_eq!(DeepLink::parse("#about"), DeepLink::default());
        assert_eq!(DeepLink::parse("#lg=&slide="), DeepLink::default());

        let link = DeepLink::parse("#foo=bar&lg=g&&slide");
        assert_eq!(link.gallery.as_deref(), Some("g"));
        assert_eq!(link.slide, None);
    }

    #[test]
    fn test_parse_first_key_wins() {
        let link = DeepLink::parse("#lg=a&lg=b");
        assert_eq!(link.gallery.as_deref(), Some("a"));
    }

    #[test]
    fn test_slide_requires_matching_gallery() {
        let link = DeepLink::parse("#lg=stories&slide=x");
        assert_eq!(link.slide_for("stories"), Some("x"));
        assert_eq!(link.slide_for("portfolio"), None);

        let bare = DeepLink::parse("#slide=x");
        assert_eq!(bare.slide_for("stories"), None);
    }

    #[test]
    fn test_resolve_finds_index() {
        let slugs = ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m"];
        let list = items(&slugs);
        let link = DeepLink::parse("#lg=g&slide=m");
        assert_eq!(resolve(&link, "g", &list), Some(12));
    }

    #[test]
    fn test_resolve_miss_is_none() {
        let list = items(&["a", "b"]);
        assert_eq!(resolve(&DeepLink::parse("#lg=g&slide=zzz"), "g", &list), None);
        assert_eq!(resolve(&DeepLink::parse("#lg=other&slide=a"), "g", &list), None);
        assert_eq!(resolve(&DeepLink::default(), "g", &list), None);
    }

    #[test]
    fn test_fragment_round_trips_through_parse() {
        let fragment = fragment_for("stories", "summit-at-dawn");
        assert_eq!(fragment, "#lg=stories&slide=summit-at-dawn");
        let link = DeepLink::parse(&fragment);
        assert_eq!(link.slide_for("stories"), Some("summit-at-dawn"));
    }

    #[test]
    fn test_fragment_round_trips_for_reserved_characters_in_file_name() {
        let index: AssetIndex = [
            ("./c/rock&roll.jpg", "/a/1.jpg"),
            ("./c/50%=half#2.jpg", "/a/2.jpg"),
        ]
        .into_iter()
        .collect();
        let catalog = Catalog::build(&index, &ThumbConvention::default());

        for (expected, item) in catalog.items().iter().enumerate() {
            let fragment = fragment_for("g", &item.slug);
            let link = DeepLink::parse(&fragment);
            assert_eq!(link.slide_for("g"), Some(item.slug.as_str()), "{fragment}");
            assert_eq!(resolve(&link, "g", catalog.items()), Some(expected));
        }
    }
}
