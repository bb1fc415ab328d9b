//! Ordered, append-friendly collection of image entities.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use super::{ImageId, ImageSnapshot, SharedImage};

/// Ordered collection of discovered images.
///
/// Appends keep existing order. The only other mutation is a bulk
/// [`replace_all`](Self::replace_all). Reads never observe a half-applied append.
#[derive(Debug, Default)]
pub struct ImageCollection {
    items: RwLock<Vec<SharedImage>>,
    generation: AtomicU64,
}

impl ImageCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds entities after the existing ones.
    ///
    /// Returns the generation the entities were appended under.
    pub fn append(&self, entities: &[SharedImage]) -> u64 {
        let mut items = self.items.write();
        items.extend(entities.iter().cloned());
        self.generation()
    }

    /// Replaces the whole sequence.
    ///
    /// Entities dropped here stay valid for anyone still holding them, so
    /// in-flight lookups can finish writing into them harmlessly.
    pub fn replace_all(&self, entities: Vec<SharedImage>) {
        let mut items = self.items.write();
        *items = entities;
        self.generation.fetch_add(1, Ordering::AcqRel);
    }

    /// Bumped by every [`replace_all`](Self::replace_all).
    ///
    /// An entity appended at generation `g` is detached once this differs from `g`.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Returns the current sequence as a read-only copy.
    #[must_use]
    pub fn snapshot(&self) -> Vec<SharedImage> {
        self.items.read().clone()
    }

    /// Serializable view of every entity, in order.
    #[must_use]
    pub fn to_snapshots(&self) -> Vec<ImageSnapshot> {
        self.items
            .read()
            .iter()
            .map(|image| ImageSnapshot::from(image.as_ref()))
            .collect()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<SharedImage> {
        self.items.read().get(index).cloned()
    }

    #[must_use]
    pub fn find(&self, id: &ImageId) -> Option<SharedImage> {
        self.items
            .read()
            .iter()
            .find(|image| image.id() == id)
            .cloned()
    }

    #[must_use]
    pub fn contains(&self, id: &ImageId) -> bool {
        self.items.read().iter().any(|image| image.id() == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Number of entities with at least one URL.
    #[must_use]
    pub fn resolved_count(&self) -> usize {
        self.items
            .read()
            .iter()
            .filter(|image| image.is_resolved())
            .count()
    }
}
