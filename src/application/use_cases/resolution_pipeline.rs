//! Turns batches of posts into image entities, resolving hosted links out of band.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::{PendingResolutions, ResolvedBatch};
use crate::domain::entities::{ImageCollection, ImageEntity, ImageId, PostRecord, SharedImage};
use crate::domain::ports::{CollectionObserver, ImageHostPort};
use crate::domain::services::{Classification, classify_with, is_direct_image};

/// Lookup still owed to an entity after the batch is appended.
#[derive(Debug)]
enum Lookup {
    Image(String),
    Album(String),
}

/// Everything a spawned lookup needs to merge its result.
struct ResolutionTask {
    image_host: Arc<dyn ImageHostPort>,
    collection: Arc<ImageCollection>,
    observer: Arc<dyn CollectionObserver>,
    image: SharedImage,
    generation: u64,
}

/// Resolution pipeline owning the collection it feeds.
#[derive(Clone)]
pub struct ResolutionPipeline {
    image_host: Arc<dyn ImageHostPort>,
    collection: Arc<ImageCollection>,
    observer: Arc<dyn CollectionObserver>,
    is_direct: fn(&str) -> bool,
}

impl ResolutionPipeline {
    /// Creates a pipeline writing into `collection`.
    #[must_use]
    pub fn new(
        image_host: Arc<dyn ImageHostPort>,
        collection: Arc<ImageCollection>,
        observer: Arc<dyn CollectionObserver>,
    ) -> Self {
        Self {
            image_host,
            collection,
            observer,
            is_direct: is_direct_image,
        }
    }

    /// Replaces the direct-image predicate.
    #[must_use]
    pub fn with_direct_image_predicate(mut self, is_direct: fn(&str) -> bool) -> Self {
        self.is_direct = is_direct;
        self
    }

    #[must_use]
    pub const fn collection(&self) -> &Arc<ImageCollection> {
        &self.collection
    }

    /// Processes a batch of posts.
    ///
    /// Direct images are resolved immediately. Hosted images are appended
    /// unresolved and looked up on spawned tasks, which are only started after
    /// the batch is in the collection and `on_items_added` has fired.
    /// Posts whose id is already in the collection, or earlier in the same
    /// batch, are skipped so ids stay unique.
    /// Never blocks; must be called from within a Tokio runtime.
    pub fn resolve_batch(&self, posts: &[PostRecord]) -> ResolvedBatch {
        let mut added: Vec<SharedImage> = Vec::with_capacity(posts.len());
        let mut lookups: Vec<(SharedImage, Lookup)> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::with_capacity(posts.len());

        for post in posts {
            let url = post.url();

            if !seen.insert(post.id()) || self.collection.contains(&ImageId::new(post.id())) {
                debug!(post_id = %post.id(), "Skipping duplicate post");
                continue;
            }

            let lookup = match classify_with(url, self.is_direct) {
                Classification::NotApplicable => {
                    debug!(post_id = %post.id(), url, "Ignoring url");
                    continue;
                }
                Classification::DirectImage => None,
                Classification::SingleHostedImage(id) => Some(Lookup::Image(id)),
                Classification::GalleryOrAlbum(id) => Some(Lookup::Album(id)),
            };

            let image = Arc::new(ImageEntity::from_post(post));
            match lookup {
                None => image.set_single_url(url),
                Some(lookup) => lookups.push((image.clone(), lookup)),
            }
            added.push(image);
        }

        let generation = self.collection.append(&added);
        self.observer.on_items_added(&added);

        info!(
            posts = posts.len(),
            added = added.len(),
            pending = lookups.len(),
            "Batch appended"
        );

        let handles = lookups
            .into_iter()
            .map(|(image, lookup)| {
                let task = ResolutionTask {
                    image_host: self.image_host.clone(),
                    collection: self.collection.clone(),
                    observer: self.observer.clone(),
                    image,
                    generation,
                };
                tokio::spawn(task.run(lookup))
            })
            .collect();

        ResolvedBatch {
            added,
            pending: PendingResolutions::new(handles),
        }
    }

    /// Empties the collection, e.g. after the source selection changed.
    ///
    /// Lookups already in flight finish into their detached entities without
    /// notifying the observer.
    pub fn reset(&self) {
        self.collection.replace_all(Vec::new());
        self.observer.on_reset();
        debug!("Collection reset");
    }
}

impl ResolutionTask {
    async fn run(self, lookup: Lookup) {
        let written = match lookup {
            Lookup::Image(id) => match self.image_host.fetch_image(&id).await {
                Ok(Some(url)) => {
                    self.image.set_single_url(url);
                    true
                }
                Ok(None) => {
                    debug!(image_id = %self.image.id(), lookup_id = %id, "Image lookup returned no payload");
                    false
                }
                Err(e) => {
                    warn!(image_id = %self.image.id(), lookup_id = %id, error = %e, "Error getting single image link");
                    false
                }
            },
            Lookup::Album(id) => match self.image_host.fetch_album(&id).await {
                Ok(Some(urls)) if !urls.is_empty() => {
                    self.image.set_urls(urls);
                    true
                }
                Ok(_) => {
                    debug!(image_id = %self.image.id(), lookup_id = %id, "Album lookup returned no images");
                    false
                }
                Err(e) => {
                    warn!(image_id = %self.image.id(), lookup_id = %id, error = %e, "Error getting album images");
                    false
                }
            },
        };

        if !written {
            return;
        }

        if self.collection.generation() == self.generation {
            self.observer.on_item_changed(self.image.id());
        } else {
            debug!(image_id = %self.image.id(), "Resolved detached image, not notifying");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::domain::errors::LookupError;
    use crate::domain::ports::mocks::{MockImageHost, ObservedEvent, RecordingObserver};

    fn post(id: &str, url: &str) -> PostRecord {
        PostRecord::new(id, format!("title {id}"), url, "gifs", false)
    }

    fn pipeline(host: MockImageHost) -> (ResolutionPipeline, Arc<MockImageHost>, Arc<RecordingObserver>) {
        let host = Arc::new(host);
        let observer = Arc::new(RecordingObserver::new());
        let pipeline = ResolutionPipeline::new(
            host.clone(),
            Arc::new(ImageCollection::new()),
            observer.clone(),
        );
        (pipeline, host, observer)
    }

    fn urls(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[tokio::test]
    async fn test_mixed_batch_appends_in_order() {
        let (pipeline, _host, observer) = pipeline(
            MockImageHost::new().with_album("gallery/Xyz", Ok(Some(urls(&["u1", "u2", "u3"])))),
        );
        let posts = vec![
            post("t3_1", "http://i.imgur.com/direct.gif"),
            post("t3_2", "http://imgur.com/gallery/Xyz"),
            post("t3_3", "https://www.reddit.com/r/gifs/comments/self_post"),
        ];

        let batch = pipeline.resolve_batch(&posts);

        assert_eq!(
            observer.added_batches(),
            vec![vec![ImageId::new("t3_1"), ImageId::new("t3_2")]]
        );
        assert_eq!(batch.added.len(), 2);
        assert_eq!(batch.added[0].all_urls(), urls(&["http://i.imgur.com/direct.gif"]));
        assert_eq!(batch.added[1].url_count(), 0);
        assert_eq!(batch.pending.len(), 1);
        assert_eq!(pipeline.collection().len(), 2);
    }

    #[tokio::test]
    async fn test_repeated_post_is_added_once() {
        let (pipeline, host, observer) = pipeline(
            MockImageHost::new().with_image("Abc", Ok(Some("https://i.imgur.com/Abc.jpg".into()))),
        );

        pipeline
            .resolve_batch(&[post("t3_1", "http://imgur.com/Abc")])
            .pending
            .join()
            .await;
        let second = pipeline.resolve_batch(&[
            post("t3_1", "http://imgur.com/Abc"),
            post("t3_2", "http://i.redd.it/two.png"),
            post("t3_2", "http://i.redd.it/two.png"),
        ]);
        second.pending.join().await;

        let ids: Vec<ImageId> = pipeline
            .collection()
            .snapshot()
            .iter()
            .map(|image| image.id().clone())
            .collect();
        assert_eq!(ids, vec![ImageId::new("t3_1"), ImageId::new("t3_2")]);
        assert_eq!(
            observer.added_batches(),
            vec![vec![ImageId::new("t3_1")], vec![ImageId::new("t3_2")]]
        );
        assert_eq!(observer.changed(), vec![ImageId::new("t3_1")]);
        assert_eq!(host.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_gallery_resolution_notifies_once() {
        let (pipeline, _host, observer) = pipeline(
            MockImageHost::new().with_album("gallery/Xyz", Ok(Some(urls(&["u1", "u2", "u3"])))),
        );
        let posts = vec![
            post("t3_1", "http://i.imgur.com/direct.gif"),
            post("t3_2", "http://imgur.com/gallery/Xyz"),
            post("t3_3", "self.gifs"),
        ];

        let batch = pipeline.resolve_batch(&posts);
        batch.pending.join().await;

        let gallery = pipeline.collection().get(1).unwrap();
        assert_eq!(gallery.all_urls(), urls(&["u1", "u2", "u3"]));
        assert_eq!(observer.changed(), vec![ImageId::new("t3_2")]);
        assert_eq!(
            observer.events().first(),
            Some(&ObservedEvent::Added(vec![
                ImageId::new("t3_1"),
                ImageId::new("t3_2")
            ]))
        );
    }

    #[tokio::test]
    async fn test_single_image_and_album_lookups_use_normalized_ids() {
        let (pipeline, host, _observer) = pipeline(
            MockImageHost::new()
                .with_image("Abc12", Ok(Some("https://i.imgur.com/Abc12.png".into())))
                .with_album("album/LRBlm", Ok(Some(urls(&["a1", "a2"])))),
        );
        let posts = vec![
            post("t3_1", "http://imgur.com/Abc12"),
            post("t3_2", "http://imgur.com/a/LRBlm"),
        ];

        pipeline.resolve_batch(&posts).pending.join().await;

        let mut calls = host.calls();
        calls.sort();
        assert_eq!(calls, vec!["Abc12".to_string(), "album/LRBlm".to_string()]);
        assert_eq!(
            pipeline.collection().get(0).unwrap().all_urls(),
            urls(&["https://i.imgur.com/Abc12.png"])
        );
        assert_eq!(pipeline.collection().get(1).unwrap().all_urls(), urls(&["a1", "a2"]));
    }

    #[tokio::test]
    async fn test_lookup_failure_is_absorbed() {
        let (pipeline, _host, observer) = pipeline(
            MockImageHost::new()
                .with_album("gallery/Bad", Err(LookupError::network("connection reset")))
                .with_image("Good", Ok(Some("https://i.imgur.com/Good.jpg".into()))),
        );
        let posts = vec![
            post("t3_1", "http://i.imgur.com/direct.gif"),
            post("t3_2", "http://imgur.com/gallery/Bad"),
            post("t3_3", "http://imgur.com/Good"),
        ];

        pipeline.resolve_batch(&posts).pending.join().await;

        let collection = pipeline.collection();
        assert_eq!(collection.len(), 3);
        assert_eq!(collection.get(1).unwrap().url_count(), 0);
        assert_eq!(collection.get(1).unwrap().revision(), 0);
        assert!(collection.get(2).unwrap().is_resolved());
        assert_eq!(observer.changed(), vec![ImageId::new("t3_3")]);
    }

    #[tokio::test]
    async fn test_empty_payloads_are_no_ops() {
        let (pipeline, _host, observer) = pipeline(
            MockImageHost::new()
                .with_image("Null", Ok(None))
                .with_album("gallery/Empty", Ok(Some(Vec::new())))
                .with_album("album/Null", Ok(None)),
        );
        let posts = vec![
            post("t3_1", "http://imgur.com/Null"),
            post("t3_2", "http://imgur.com/gallery/Empty"),
            post("t3_3", "http://imgur.com/a/Null"),
        ];

        pipeline.resolve_batch(&posts).pending.join().await;

        assert_eq!(pipeline.collection().resolved_count(), 0);
        assert!(observer.changed().is_empty());
    }

    #[tokio::test]
    async fn test_order_independent_of_completion_order() {
        let (pipeline, _host, observer) = pipeline(
            MockImageHost::new()
                .with_album("gallery/Slow", Ok(Some(urls(&["slow"]))))
                .with_delay("gallery/Slow", Duration::from_millis(50))
                .with_image("Fast", Ok(Some("fast".into()))),
        );
        let posts = vec![
            post("t3_slow", "http://imgur.com/gallery/Slow"),
            post("t3_fast", "http://imgur.com/Fast"),
        ];

        pipeline.resolve_batch(&posts).pending.join().await;

        let order: Vec<_> = pipeline
            .collection()
            .snapshot()
            .iter()
            .map(|i| i.id().clone())
            .collect();
        assert_eq!(order, vec![ImageId::new("t3_slow"), ImageId::new("t3_fast")]);
        assert_eq!(
            observer.changed(),
            vec![ImageId::new("t3_fast"), ImageId::new("t3_slow")]
        );
    }

    #[tokio::test]
    async fn test_each_entity_written_once_per_batch() {
        let (pipeline, host, observer) = pipeline(
            MockImageHost::new()
                .with_image("One", Ok(Some("one".into())))
                .with_album("gallery/Two", Ok(Some(urls(&["two"])))),
        );
        let posts = vec![
            post("t3_0", "http://i.imgur.com/zero.png"),
            post("t3_1", "http://imgur.com/One"),
            post("t3_2", "http://imgur.com/gallery/Two"),
        ];

        let batch = pipeline.resolve_batch(&posts);
        let added = batch.added.clone();
        batch.pending.join().await;

        for image in &added {
            assert_eq!(image.revision(), 1, "{} written more than once", image.id());
        }
        assert_eq!(host.calls().len(), 2);
        assert_eq!(observer.changed().len(), 2);
    }

    #[tokio::test]
    async fn test_reset_detaches_in_flight_lookups() {
        let (pipeline, _host, observer) = pipeline(
            MockImageHost::new()
                .with_image("Late", Ok(Some("late".into())))
                .with_delay("Late", Duration::from_millis(20)),
        );

        let batch = pipeline.resolve_batch(&[post("t3_1", "http://imgur.com/Late")]);
        let detached = batch.added[0].clone();
        pipeline.reset();
        batch.pending.join().await;

        assert!(pipeline.collection().is_empty());
        assert_eq!(detached.all_urls(), urls(&["late"]));
        assert!(observer.changed().is_empty());
        assert_eq!(observer.events().last(), Some(&ObservedEvent::Reset));
    }

    #[tokio::test]
    async fn test_empty_batch_still_notifies() {
        let (pipeline, _host, observer) = pipeline(MockImageHost::new());

        let batch = pipeline.resolve_batch(&[post("t3_1", "self.gifs")]);

        assert!(batch.added.is_empty());
        assert!(batch.pending.is_empty());
        assert_eq!(observer.added_batches(), vec![Vec::<ImageId>::new()]);
    }

    #[tokio::test]
    async fn test_custom_direct_image_predicate() {
        let (pipeline, host, _observer) = pipeline(MockImageHost::new());
        let pipeline = pipeline.with_direct_image_predicate(|url| url.ends_with(".gifv"));

        let batch = pipeline.resolve_batch(&[post("t3_1", "http://i.imgur.com/clip.gifv")]);

        assert!(batch.pending.is_empty());
        assert_eq!(batch.added[0].all_urls(), urls(&["http://i.imgur.com/clip.gifv"]));
        assert!(host.calls().is_empty());
    }

    #[tokio::test]
    async fn test_batches_append_after_existing_items() {
        let (pipeline, _host, observer) = pipeline(MockImageHost::new());

        pipeline.resolve_batch(&[post("t3_1", "http://x.com/1.png")]);
        pipeline.resolve_batch(&[post("t3_2", "http://x.com/2.png")]);

        assert_eq!(pipeline.collection().len(), 2);
        assert_eq!(observer.added_batches().len(), 2);
        assert_eq!(pipeline.collection().get(1).unwrap().id().as_str(), "t3_2");
    }
}
