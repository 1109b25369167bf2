use std::collections::HashSet;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};

use crate::domain::{GalleryItem, ItemId};
use crate::error::Result;

/// Where captions come from. Implementations run on worker threads.
pub trait CaptionSource: Send + Sync {
    /// Embedded caption for the item's image, `Ok(None)` if it has none.
    fn caption(&self, item: &GalleryItem) -> Result<Option<String>>;
}

/// Reads `ImageDescription` / `UserComment` from the file at `item.source`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExifCaptionSource;

impl CaptionSource for ExifCaptionSource {
    fn caption(&self, item: &GalleryItem) -> Result<Option<String>> {
        crate::exif::read_caption(Path::new(&item.source))
    }
}

/// A caption extracted for one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caption {
    pub id: ItemId,
    pub text: String,
}

enum Outcome {
    Found(Caption),
    Nothing,
}

/// Replace the title of the item with `caption.id`, leaving every other item alone.
/// Returns false when the id is absent or the title is already equal.
pub fn merge_caption(items: &mut [GalleryItem], caption: &Caption) -> bool {
    match items.iter_mut().find(|item| item.id == caption.id) {
        Some(item) if item.title != caption.text => {
            item.title.clone_from(&caption.text);
            true
        }
        _ => false,
    }
}

/// Fire-and-forget caption extraction, at most one attempt per item.
///
/// Jobs run on the global rayon pool and report back over a channel; the owner drains
/// results on its own thread with [`Enricher::drain`] or [`Enricher::settle`]. Failures
/// are logged at debug level and otherwise dropped. Once the enricher is shut down or
/// dropped, queued jobs skip extraction and nothing more is delivered.
pub struct Enricher {
    source: Arc<dyn CaptionSource>,
    tx: Sender<Outcome>,
    rx: Receiver<Outcome>,
    attempted: HashSet<ItemId>,
    in_flight: usize,
    alive: Arc<AtomicBool>,
}

impl Enricher {
    pub fn new(source: Arc<dyn CaptionSource>) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self {
            source,
            tx,
            rx,
            attempted: HashSet::new(),
            in_flight: 0,
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Schedule extraction for `item`. Returns false if it was already attempted
    /// or the enricher is shut down.
    pub fn request(&mut self, item: &GalleryItem) -> bool {
        if !self.is_alive() || !self.attempted.insert(item.id) {
            return false;
        }
        self.in_flight += 1;

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let alive = Arc::clone(&self.alive);
        let item = item.clone();

        rayon::spawn(move || {
            let outcome = if alive.load(Ordering::Acquire) {
                extract(source.as_ref(), &item)
            } else {
                Outcome::Nothing
            };
            // The receiver lives as long as the enricher; a failed send means it is gone.
            let _ = tx.send(outcome);
        });
        true
    }

    /// Captions that have arrived since the last call, without blocking.
    pub fn drain(&mut self) -> Vec<Caption> {
        let outcomes: Vec<Outcome> = self.rx.try_iter().collect();
        self.collect(outcomes)
    }

    /// Block until every scheduled job has reported, returning the captions found.
    pub fn settle(&mut self) -> Vec<Caption> {
        let mut outcomes = Vec::with_capacity(self.in_flight);
        while outcomes.len() < self.in_flight {
            match self.rx.recv() {
                Ok(outcome) => outcomes.push(outcome),
                Err(_) => break,
            }
        }
        self.collect(outcomes)
    }

    fn collect(&mut self, outcomes: Vec<Outcome>) -> Vec<Caption> {
        self.in_flight = self.in_flight.saturating_sub(outcomes.len());
        if !self.is_alive() {
            return Vec::new();
        }
        outcomes
            .into_iter()
            .filter_map(|outcome| match outcome {
                Outcome::Found(caption) => Some(caption),
                Outcome::Nothing => None,
            })
            .collect()
    }

    pub fn was_attempted(&self, id: ItemId) -> bool {
        self.attempted.contains(&id)
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// Stop acting on results. Jobs still queued skip extraction.
    pub fn shutdown(&self) {
        self.alive.store(false, Ordering::Release);
    }
}

impl Drop for Enricher {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn extract(source: &dyn CaptionSource, item: &GalleryItem) -> Outcome {
    match source.caption(item) {
        Ok(Some(text)) => Outcome::Found(Caption { id: item.id, text }),
        Ok(None) => {
            tracing::debug!(id = %item.id, slug = %item.slug, "no embedded caption");
            Outcome::Nothing
        }
        Err(e) => {
            tracing::debug!(id = %item.id, slug = %item.slug, error = %e, "caption extraction failed");
            Outcome::Nothing
        }
    }
}
