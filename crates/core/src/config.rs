use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::catalog::ThumbConvention;
use crate::error::{Error, Result};
use crate::gallery::{GalleryOptions, ALL_LABEL};
use crate::gate::Gate;
use crate::pagination::{BASE_PAGE_SIZE, DEEP_LINK_BUFFER};

/// Predicate over asset path identifiers, selecting a gallery's items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathRule {
    Any,
    Contains(String),
    NotContains(String),
    All(Vec<PathRule>),
}

impl PathRule {
    pub fn matches(&self, path: &str) -> bool {
        match self {
            PathRule::Any => true,
            PathRule::Contains(needle) => path.contains(needle.as_str()),
            PathRule::NotContains(needle) => !path.contains(needle.as_str()),
            PathRule::All(rules) => rules.iter().all(|r| r.matches(path)),
        }
    }
}

/// One top-level gallery page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryConfig {
    /// Value of the `lg` fragment token selecting this gallery.
    pub id: String,
    pub label: String,
    pub rule: PathRule,
    /// Behind the password gate.
    #[serde(default)]
    pub private: bool,
}

/// Site configuration, read from a JSON file. Every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub asset_root: PathBuf,
    pub thumbs_dir: String,
    pub thumb_suffix: String,
    pub extensions: Vec<String>,
    pub base_page_size: usize,
    pub deep_link_buffer: usize,
    pub all_label: String,
    pub default_gallery: String,
    pub galleries: Vec<GalleryConfig>,
    /// Lowercase hex SHA-256 of the private-gallery password.
    pub gate_digest: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let defaults = ThumbConvention::default();
        Self {
            asset_root: PathBuf::from("assets/images"),
            thumbs_dir: defaults.dir,
            thumb_suffix: defaults.suffix,
            extensions: ["jpg", "jpeg", "png", "webp", "svg"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            base_page_size: BASE_PAGE_SIZE,
            deep_link_buffer: DEEP_LINK_BUFFER,
            all_label: ALL_LABEL.to_string(),
            default_gallery: "portfolio".to_string(),
            galleries: vec![
                GalleryConfig {
                    id: "portfolio".to_string(),
                    label: "Portfolio".to_string(),
                    rule: PathRule::All(vec![
                        PathRule::NotContains("/stories/".to_string()),
                        PathRule::NotContains("/clients/".to_string()),
                    ]),
                    private: false,
                },
                GalleryConfig {
                    id: "stories".to_string(),
                    label: "Stories".to_string(),
                    rule: PathRule::Contains("/stories/".to_string()),
                    private: false,
                },
                GalleryConfig {
                    id: "clients".to_string(),
                    label: "Clients".to_string(),
                    rule: PathRule::Contains("/clients/".to_string()),
                    private: true,
                },
            ],
            gate_digest: None,
        }
    }
}

impl SiteConfig {
    /// Read and validate a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: SiteConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Gallery ids unique, default gallery declared, gate digest well-formed.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for gallery in &self.galleries {
            if !seen.insert(gallery.id.as_str()) {
                return Err(Error::DuplicateGallery(gallery.id.clone()));
            }
        }
        if !seen.contains(self.default_gallery.as_str()) {
            return Err(Error::UnknownGallery(self.default_gallery.clone()));
        }
        if let Some(digest) = &self.gate_digest {
            Gate::new(digest)?;
        }
        Ok(())
    }

    pub fn thumb_convention(&self) -> ThumbConvention {
        ThumbConvention {
            dir: self.thumbs_dir.clone(),
            suffix: self.thumb_suffix.clone(),
        }
    }

    pub fn gallery_options(&self) -> GalleryOptions {
        GalleryOptions {
            page_size: self.base_page_size,
            deep_link_buffer: self.deep_link_buffer,
            all_label: self.all_label.clone(),
        }
    }

    pub fn gallery(&self, id: &str) -> Option<&GalleryConfig> {
        self.galleries.iter().find(|g| g.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_are_exclusive() {
        let config = SiteConfig::default();
        for path in [
            "./Mountains/a.jpg",
            "./stories/alps/b.jpg",
            "./clients/acme/c.jpg",
        ] {
            let hits = config
                .galleries
                .iter()
                .filter(|g| g.rule.matches(path))
                .count();
            assert_eq!(hits, 1, "{path} should match exactly one gallery");
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        SiteConfig::default().validate().unwrap();
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("site.json");
        std::fs::write(
            &path,
            r#"{
                "asset_root": "/srv/photos",
                "base_page_size": 20,
                "galleries": [
                    { "id": "work", "label": "Work", "rule": "any" }
                ],
                "default_gallery": "work"
            }"#,
        )
        .unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.asset_root, PathBuf::from("/srv/photos"));
        assert_eq!(config.base_page_size, 20);
        assert_eq!(config.deep_link_buffer, 5);
        assert_eq!(config.all_label, "All");
        assert_eq!(config.galleries[0].rule, PathRule::Any);
        assert!(!config.galleries[0].private);
    }

    #[test]
    fn test_rule_json_shapes() {
        let rule: PathRule = serde_json::from_str(
            r#"{ "all": [ { "contains": "/a/" }, { "not_contains": "/b/" } ] }"#,
        )
        .unwrap();
        assert!(rule.matches("./a/x.jpg"));
        assert!(!rule.matches("./a/b/x.jpg"));
        assert!(!rule.matches("./c/x.jpg"));
    }

    #[test]
    fn test_validate_rejects_duplicate_gallery() {
        let mut config = SiteConfig::default();
        config.galleries.push(config.galleries[0].clone());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("declared twice"));
    }

    #[test]
    fn test_validate_rejects_unknown_default() {
        let config = SiteConfig {
            default_gallery: "nowhere".to_string(),
            ..SiteConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::UnknownGallery(_))));
    }

    #[test]
    fn test_validate_rejects_bad_digest() {
        let config = SiteConfig {
            gate_digest: Some("1234".to_string()),
            ..SiteConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidDigest(_))));
    }

    #[test]
    fn test_load_malformed_json() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("site.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(SiteConfig::load(&path), Err(Error::Config(_))));
    }
}
