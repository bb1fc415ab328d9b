use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use imgfeed::application::{FeedResponse, LoadFeedUseCase, ResolutionPipeline};
use imgfeed::domain::entities::ImageCollection;
use imgfeed::domain::ports::FeedRequest;
use imgfeed::infrastructure::{
    AppConfig, ChannelObserver, CliArgs, CollectionEvent, ConfigStore, ImgurClient,
    RedditFeedClient, StateConfig,
};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = &config.log_path {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .init();
    }

    Ok(())
}

fn build_request(args: &CliArgs, config: &AppConfig, state: &StateConfig) -> FeedRequest {
    let request = config.feed_request();

    if let Some(before) = &args.before {
        request.before_cursor(before.clone())
    } else if let Some(after) = &args.after {
        request.after_cursor(after.clone())
    } else if let Some(after) = state.last_after.as_ref().filter(|_| args.next) {
        request.after_cursor(after.clone())
    } else {
        request
    }
}

fn drain_events(events: &mut mpsc::UnboundedReceiver<CollectionEvent>) {
    while let Ok(event) = events.try_recv() {
        match event {
            CollectionEvent::ItemsAdded(items) => debug!(count = items.len(), "Items added"),
            CollectionEvent::ItemChanged(id) => debug!(image_id = %id, "Item resolved"),
            CollectionEvent::Reset => debug!("Collection reset"),
        }
    }
}

fn print_collection(collection: &ImageCollection, json: bool) -> Result<()> {
    if json {
        let snapshots = collection.to_snapshots();
        println!("{}", serde_json::to_string_pretty(&snapshots)?);
        return Ok(());
    }

    for image in collection.snapshot() {
        let flag = if image.is_sensitive() { "nsfw" } else { "-" };
        println!(
            "{}\t{}\t{}\t[{}] {}",
            image.id(),
            flag,
            image.url_count(),
            image.source_group(),
            image.title()
        );
        for url in image.all_urls() {
            println!("\t{url}");
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let args = CliArgs::parse();
    let storage = ConfigStore::locate()?;
    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(&args);

    init_logging(&config)?;

    info!(version = imgfeed::VERSION, "Starting imgfeed");

    let mut state = storage.load_state()?;
    if config.feed.sources.is_empty() {
        config.feed.sources.clone_from(&state.selected_sources);
    }
    let request = build_request(&args, &config, &state);

    let (observer, mut events) = ChannelObserver::channel();
    let image_host = Arc::new(ImgurClient::with_base_url(
        config.imgur.base_url.clone(),
        config.imgur.client_id.clone(),
        &config.http,
    )?);
    let feed = Arc::new(RedditFeedClient::with_base_url(
        config.feed.base_url.clone(),
        &config.http,
    )?);

    let collection = Arc::new(ImageCollection::new());
    let pipeline = ResolutionPipeline::new(image_host, collection.clone(), Arc::new(observer));
    let use_case = LoadFeedUseCase::new(feed, pipeline);

    let FeedResponse {
        added,
        after,
        pending,
        ..
    } = use_case
        .execute(request.clone())
        .await
        .wrap_err("Failed to load feed")?;

    info!(added = added.len(), pending = pending.len(), "Waiting for lookups");

    let wait = Duration::from_secs(config.wait_secs);
    if tokio::time::timeout(wait, pending.join()).await.is_err() {
        warn!(
            wait_secs = config.wait_secs,
            "Some lookups are still running, printing what has resolved"
        );
    }
    drain_events(&mut events);

    state.selected_sources = request.selected_sources().map(str::to_owned).collect();
    state.last_after = after;
    if let Err(e) = storage.save_state(&state) {
        warn!(error = %e, "Failed to save state");
    }

    info!(
        total = collection.len(),
        resolved = collection.resolved_count(),
        "Collection ready"
    );

    print_collection(&collection, args.json)
}
