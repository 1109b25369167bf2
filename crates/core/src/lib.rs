pub mod catalog;
pub mod config;
pub mod deeplink;
pub mod domain;
pub mod drag;
pub mod enrich;
pub mod error;
pub mod exif;
pub mod filter;
pub mod gallery;
pub mod gate;
pub mod pagination;
pub mod scanner;
pub mod viewer;

use std::sync::Arc;

use catalog::{Catalog, SubCatalog};
use config::{GalleryConfig, SiteConfig};
use deeplink::DeepLink;
use enrich::CaptionSource;
use error::{Error, Result};
use gate::{Gate, GateOutcome};
use scanner::AssetIndex;

pub use domain::{GalleryItem, ItemId, Slide};
pub use gallery::{Gallery, GalleryOptions, GridView};
pub use viewer::{Viewer, ViewerEvent};

/// The main entry point: one catalog, its galleries, and the private-section gate.
///
/// Built once at startup and shared read-only by every gallery opened from it.
pub struct Site {
    config: SiteConfig,
    catalog: Catalog,
    galleries: Vec<(GalleryConfig, SubCatalog)>,
    gate: Option<Gate>,
}

impl Site {
    /// Scan the configured asset root and build the catalog.
    pub fn open(config: SiteConfig) -> Result<Self> {
        let index = scanner::scan_assets(&config.asset_root, &config.extensions)?;
        Self::from_index(config, &index)
    }

    /// Build from an already-resolved asset index.
    pub fn from_index(config: SiteConfig, index: &AssetIndex) -> Result<Self> {
        config.validate()?;
        let gate = config.gate_digest.as_deref().map(Gate::new).transpose()?;

        let catalog = Catalog::build(index, &config.thumb_convention());
        let subs = catalog.partition(
            config
                .galleries
                .iter()
                .map(|g| (g.id.clone(), move |path: &str| g.rule.matches(path))),
        );
        let galleries = config.galleries.iter().cloned().zip(subs).collect();

        if gate.is_none() && config.galleries.iter().any(|g| g.private) {
            tracing::warn!("no gate_digest configured, private galleries stay locked");
        }

        Ok(Self {
            config,
            catalog,
            galleries,
            gate,
        })
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Configured galleries with their items, in config order.
    pub fn galleries(&self) -> impl Iterator<Item = (&GalleryConfig, &SubCatalog)> {
        self.galleries.iter().map(|(config, sub)| (config, sub))
    }

    pub fn sub_catalog(&self, id: &str) -> Result<&SubCatalog> {
        self.galleries
            .iter()
            .find(|(config, _)| config.id == id)
            .map(|(_, sub)| sub)
            .ok_or_else(|| Error::UnknownGallery(id.to_string()))
    }

    /// Gallery to show on load: the fragment's `lg` token when it names a known gallery,
    /// the default gallery otherwise.
    pub fn initial_gallery(&self, fragment: Option<&str>) -> &str {
        let requested = fragment.map(DeepLink::parse).and_then(|link| link.gallery);
        match requested {
            Some(id) => match self.galleries.iter().find(|(config, _)| config.id == id) {
                Some((config, _)) => &config.id,
                None => {
                    tracing::debug!(gallery = %id, "unknown gallery in fragment, using default");
                    &self.config.default_gallery
                }
            },
            None => &self.config.default_gallery,
        }
    }

    /// Try the private-section password. Without a configured gate no password can
    /// match, so private galleries stay locked.
    pub fn unlock(&mut self, password: &str) -> GateOutcome {
        match self.gate.as_mut() {
            Some(gate) => gate.submit(password),
            None => {
                tracing::debug!("unlock attempted without a configured gate");
                GateOutcome::Rejected
            }
        }
    }

    /// Whether private galleries are open. Always false without a configured gate.
    pub fn is_unlocked(&self) -> bool {
        self.gate.as_ref().is_some_and(Gate::is_unlocked)
    }

    pub fn gate(&self) -> Option<&Gate> {
        self.gate.as_ref()
    }

    pub fn gate_mut(&mut self) -> Option<&mut Gate> {
        self.gate.as_mut()
    }

    /// A fresh controller over the gallery's sub-catalog.
    /// Private galleries stay closed until the gate has been passed.
    pub fn gallery<V: Viewer>(
        &self,
        id: &str,
        captions: Arc<dyn CaptionSource>,
    ) -> Result<Gallery<V>> {
        let (config, sub) = self
            .galleries
            .iter()
            .find(|(config, _)| config.id == id)
            .ok_or_else(|| Error::UnknownGallery(id.to_string()))?;

        if config.private && !self.is_unlocked() {
            return Err(Error::GalleryLocked(id.to_string()));
        }

        Ok(Gallery::new(
            config.id.clone(),
            sub.clone(),
            self.config.gallery_options(),
            captions,
        ))
    }
}
