use serde::{Deserialize, Serialize};

/// Where thumbnails live and how they are named: `./<dir>/<name><suffix>.<ext>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThumbConvention {
    pub dir: String,
    pub suffix: String,
}

impl Default for ThumbConvention {
    fn default() -> Self {
        Self {
            dir: "thumbs".to_string(),
            suffix: "_thumb".to_string(),
        }
    }
}

impl ThumbConvention {
    /// True for paths that are thumbnails rather than primary images:
    /// anything under the thumbs directory or whose stem carries the suffix.
    pub fn is_thumbnail(&self, path: &str) -> bool {
        let in_thumbs_dir = path
            .split('/')
            .rev()
            .skip(1)
            .any(|segment| segment == self.dir);
        let (stem, _) = split_extension(file_name(path));
        in_thumbs_dir || stem.ends_with(self.suffix.as_str())
    }

    /// Conventional thumbnail path for a primary image path.
    pub fn thumbnail_path(&self, path: &str) -> String {
        let (stem, ext) = split_extension(file_name(path));
        match ext {
            Some(ext) => format!("./{}/{}{}.{}", self.dir, stem, self.suffix, ext),
            None => format!("./{}/{}{}", self.dir, stem, self.suffix),
        }
    }
}

/// Last `/`-separated segment.
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Immediate parent directory, if the path has one below the root.
pub fn parent_dir(path: &str) -> Option<&str> {
    let mut segments = path.rsplit('/');
    segments.next();
    segments.next().filter(|s| !s.is_empty() && *s != ".")
}

/// Split `name.ext` at the last dot.
fn split_extension(name: &str) -> (&str, Option<&str>) {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (name, None),
    }
}

/// Everything before the first dot, so `sunset.final.jpg` titles as "Sunset".
fn title_stem(name: &str) -> &str {
    name.split('.').next().unwrap_or(name)
}

/// `misty-lake_02.jpg` -> `Misty lake 02`.
pub fn title_from_filename(name: &str) -> String {
    let spaced: String = title_stem(name)
        .chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c })
        .collect();
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Slug for a file whose stem has no ASCII letters or digits.
const FALLBACK_SLUG: &str = "slide";

/// `Misty Lake_02.jpg` -> `misty-lake-02`.
///
/// Only `[a-z0-9-]` survives: every other run of characters becomes a single `-`, and
/// leading or trailing dashes are dropped, so a slug never needs escaping in a fragment.
pub fn slug_from_filename(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in title_stem(name).chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        slug.push_str(FALLBACK_SLUG);
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_from_filename() {
        assert_eq!(title_from_filename("misty-lake_02.jpg"), "Misty lake 02");
        assert_eq!(title_from_filename("summit.jpeg"), "Summit");
        assert_eq!(title_from_filename("sunset.final.jpg"), "Sunset");
        assert_eq!(title_from_filename("Already_Caps.png"), "Already Caps");
    }

    #[test]
    fn test_title_empty_stem() {
        assert_eq!(title_from_filename(".jpg"), "");
    }

    #[test]
    fn test_slug_from_filename() {
        assert_eq!(slug_from_filename("Misty Lake_02.jpg"), "misty-lake-02");
        assert_eq!(slug_from_filename("summit.jpeg"), "summit");
        assert_eq!(slug_from_filename("A-B_C.webp"), "a-b-c");
    }

    #[test]
    fn test_slug_keeps_only_url_safe_characters() {
        assert_eq!(slug_from_filename("rock&roll.jpg"), "rock-roll");
        assert_eq!(slug_from_filename("a=b#c%d.jpg"), "a-b-c-d");
        assert_eq!(slug_from_filename("Café  au lait.jpg"), "caf-au-lait");
        assert_eq!(slug_from_filename("--edge__.png"), "edge");
    }

    #[test]
    fn test_slug_fallback_when_nothing_survives() {
        assert_eq!(slug_from_filename("&&&.jpg"), "slide");
        assert_eq!(slug_from_filename(".jpg"), "slide");
    }

    #[test]
    fn test_parent_dir() {
        assert_eq!(parent_dir("./Mountains/peak.jpg"), Some("Mountains"));
        assert_eq!(parent_dir("./stories/alps/summit.jpg"), Some("alps"));
        assert_eq!(parent_dir("./loose.jpg"), None);
        assert_eq!(parent_dir("loose.jpg"), None);
    }

    #[test]
    fn test_thumbnail_detection() {
        let thumbs = ThumbConvention::default();
        assert!(thumbs.is_thumbnail("./thumbs/peak_thumb.jpg"));
        assert!(thumbs.is_thumbnail("./thumbs/anything.jpg"));
        assert!(thumbs.is_thumbnail("./Mountains/peak_thumb.jpg"));
        assert!(!thumbs.is_thumbnail("./Mountains/peak.jpg"));
        // A file called "thumbs.jpg" is not inside the thumbs directory
        assert!(!thumbs.is_thumbnail("./Mountains/thumbs.jpg"));
    }

    #[test]
    fn test_thumbnail_path() {
        let thumbs = ThumbConvention::default();
        assert_eq!(
            thumbs.thumbnail_path("./Mountains/peak.jpg"),
            "./thumbs/peak_thumb.jpg"
        );
        let custom = ThumbConvention {
            dir: "small".to_string(),
            suffix: "-sm".to_string(),
        };
        assert_eq!(custom.thumbnail_path("./a/b.png"), "./small/b-sm.png");
    }
}
