//! Histmatch Core Library
//!
//! Core functionality for percentile-based histogram matching between images.

pub mod decoders;
pub mod exporters;
pub mod lut;
pub mod models;
pub mod pipeline;
pub mod stats;

// Re-export commonly used types
pub use lut::{build_lookup_table, LookupTable};
pub use models::MatchOptions;
pub use pipeline::{match_images, ProcessedImage};
pub use stats::ChannelHistogram;
