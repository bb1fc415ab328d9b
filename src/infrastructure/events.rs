//! Channel-backed collection observer.

use tokio::sync::mpsc;
use tracing::trace;

use crate::domain::entities::{ImageId, SharedImage};
use crate::domain::ports::CollectionObserver;

/// Collection change forwarded to the consumer side of the channel.
#[derive(Debug, Clone)]
pub enum CollectionEvent {
    /// A batch was appended.
    ItemsAdded(Vec<SharedImage>),
    /// An entity received its URLs.
    ItemChanged(ImageId),
    /// The collection was emptied.
    Reset,
}

/// Forwards observer callbacks into an unbounded channel.
///
/// Callbacks fire from whichever task resolved the entity; the receiver side
/// sees them in delivery order. A closed receiver drops events silently.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    event_tx: mpsc::UnboundedSender<CollectionEvent>,
}

impl ChannelObserver {
    #[must_use]
    pub const fn new(event_tx: mpsc::UnboundedSender<CollectionEvent>) -> Self {
        Self { event_tx }
    }

    /// Creates an observer together with its receiving end.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<CollectionEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        (Self::new(event_tx), event_rx)
    }

    fn send(&self, event: CollectionEvent) {
        if self.event_tx.send(event).is_err() {
            trace!("Collection event receiver dropped");
        }
    }
}

impl CollectionObserver for ChannelObserver {
    fn on_items_added(&self, items: &[SharedImage]) {
        self.send(CollectionEvent::ItemsAdded(items.to_vec()));
    }

    fn on_item_changed(&self, id: &ImageId) {
        self.send(CollectionEvent::ItemChanged(id.clone()));
    }

    fn on_reset(&self) {
        self.send(CollectionEvent::Reset);
    }
}
