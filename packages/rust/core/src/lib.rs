//! Core ingestion pipeline and presentation state for the job carousel.
//!
//! This crate ties the sheet tokenizer, the CSV fetcher and the job
//! normalization rules together into one never-failing [`load_feed`] call,
//! and models the carousel the feed is shown in.

pub mod carousel;
pub mod cleanup;
pub mod normalize;
pub mod pipeline;
pub mod recency;
pub mod sample;

pub use carousel::{AutoPlay, CarouselState};
pub use pipeline::{FeedOrigin, IngestOptions, IngestStats, JobFeed, load_feed, parse_jobs, resolve_feed};
pub use sample::sample_jobs;
