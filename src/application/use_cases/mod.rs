//! Use case implementations.

mod load_feed_use_case;
mod resolution_pipeline;

pub use load_feed_use_case::LoadFeedUseCase;
pub use resolution_pipeline::ResolutionPipeline;
