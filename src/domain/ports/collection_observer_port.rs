//! Observer port for collection changes.

use crate::domain::entities::{ImageId, SharedImage};

/// Receives collection change events.
///
/// `on_item_changed` may be called from any task, in any order relative to
/// other entities, and always after the `on_items_added` that carried the entity.
pub trait CollectionObserver: Send + Sync {
    /// A batch of entities was appended, in collection order.
    fn on_items_added(&self, items: &[SharedImage]);

    /// An entity already in the collection received its URLs.
    fn on_item_changed(&self, id: &ImageId);

    /// The collection was emptied.
    fn on_reset(&self) {}
}

#[cfg(test)]
#[allow(dead_code)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum ObservedEvent {
        Added(Vec<ImageId>),
        Changed(ImageId),
        Reset,
    }

    /// Observer that records every event it receives.
    #[derive(Default)]
    pub struct RecordingObserver {
        pub events: Mutex<Vec<ObservedEvent>>,
    }

    impl RecordingObserver {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn events(&self) -> Vec<ObservedEvent> {
            self.events.lock().unwrap().clone()
        }

        pub fn added_batches(&self) -> Vec<Vec<ImageId>> {
            self.events()
                .into_iter()
                .filter_map(|e| match e {
                    ObservedEvent::Added(ids) => Some(ids),
                    _ => None,
                })
                .collect()
        }

        pub fn changed(&self) -> Vec<ImageId> {
            self.events()
                .into_iter()
                .filter_map(|e| match e {
                    ObservedEvent::Changed(id) => Some(id),
                    _ => None,
                })
                .collect()
        }
    }

    impl CollectionObserver for RecordingObserver {
        fn on_items_added(&self, items: &[SharedImage]) {
            let ids = items.iter().map(|i| i.id().clone()).collect();
            self.events.lock().unwrap().push(ObservedEvent::Added(ids));
        }

        fn on_item_changed(&self, id: &ImageId) {
            self.events
                .lock()
                .unwrap()
                .push(ObservedEvent::Changed(id.clone()));
        }

        fn on_reset(&self) {
            self.events.lock().unwrap().push(ObservedEvent::Reset);
        }
    }
}
