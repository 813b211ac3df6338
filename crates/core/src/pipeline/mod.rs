//! Concurrent extraction pipeline and its stage library.
//!
//! - `stages`: partitioning and the concurrent pipeline driver
//! - `filters`: object predicates
//! - `extractor`: stream decoding stage
//! - `processor`: character mapping stage
//! - `reducer`: output collection

pub mod extractor;
pub mod filters;
pub mod processor;
pub mod reducer;
pub mod stages;

pub use extractor::{ExtractorResult, simple_extractor};
pub use filters::{identity_filter, image_only_filter, objstm_only_filter, text_only_filter};
pub use processor::{ProcessorResult, cmap_processor, map_characters, transform};
pub use reducer::{Outputs, collecting_reducer, printing_reducer, writing_reducer};
pub use stages::{ConcurrentPipeline, partition, run_document};
