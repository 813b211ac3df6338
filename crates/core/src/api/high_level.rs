//! High-level text extraction API.
//!
//! Provides the main entry points:
//! - `extract_text()` - Extract all text from a file as a String
//! - `extract_text_from_bytes()` - Same, for a document already in memory
//! - `extract_text_to_writer()` - Stream the text to a writer
//! - `extract_text_to_file()` - Write the text to `<path>.txt` or a given path

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::parser::source::DEFAULT_BUFFER_SIZE;
use crate::parser::tokens::END_STREAM;
use crate::pipeline::reducer::{self, reduce_into};
use crate::pipeline::{
    ConcurrentPipeline, cmap_processor, collecting_reducer, simple_extractor, text_only_filter,
    writing_reducer,
};

/// Default bound for the per-partition stage queues.
pub const DEFAULT_QUEUE_CAPACITY: usize = 16;

pub(crate) fn default_thread_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Options for text extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Worker count. None uses the available parallelism.
    pub workers: Option<usize>,

    /// Bound of each feed and filter queue. Values below 1 are treated as 1.
    pub queue_capacity: usize,

    /// Initial read buffer size in bytes. Never smaller than the
    /// `endstream` marker.
    pub buffer_size: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            workers: None,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl ExtractOptions {
    /// Effective worker count, at least 1.
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(default_thread_count).max(1)
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity.max(1);
        self
    }

    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size.max(END_STREAM.len());
        self
    }
}

/// Extract all text from the document at `path`.
///
/// Only objects without a `/Type` are decoded; hex-encoded text is mapped
/// through the character maps embedded in the document.
///
/// # Example
///
/// ```ignore
/// use pdfsift_core::api::extract_text;
///
/// let text = extract_text("document.pdf", None)?;
/// ```
pub fn extract_text(path: impl AsRef<Path>, options: Option<ExtractOptions>) -> Result<String> {
    ConcurrentPipeline::open(path, options.unwrap_or_default())?.run(
        text_only_filter,
        simple_extractor,
        cmap_processor,
        collecting_reducer,
    )
}

/// Extract all text from document bytes already in memory. `name` is used
/// for logging only.
pub fn extract_text_from_bytes(
    name: &str,
    data: &[u8],
    options: Option<ExtractOptions>,
) -> Result<String> {
    ConcurrentPipeline::from_reader(name, data, options.unwrap_or_default()).run(
        text_only_filter,
        simple_extractor,
        cmap_processor,
        collecting_reducer,
    )
}

/// Extract text from the document at `path` into `writer`. Returns the
/// number of bytes written.
pub fn extract_text_to_writer<W: Write>(
    path: impl AsRef<Path>,
    writer: &mut W,
    options: Option<ExtractOptions>,
) -> Result<usize> {
    ConcurrentPipeline::open(path, options.unwrap_or_default())?.run(
        text_only_filter,
        simple_extractor,
        cmap_processor,
        |outputs, _| reduce_into(outputs, writer),
    )
}

/// Extract text from the document at `path` into a file. Without `output`
/// the file is `path` with `.txt` appended, next to the input. Returns the
/// path written.
pub fn extract_text_to_file(
    path: impl AsRef<Path>,
    output: Option<&Path>,
    options: Option<ExtractOptions>,
) -> Result<PathBuf> {
    let pipeline = ConcurrentPipeline::open(path, options.unwrap_or_default())?;
    match output {
        Some(output) => pipeline.run(
            text_only_filter,
            simple_extractor,
            cmap_processor,
            |outputs, _| reducer::write_to(outputs, output),
        ),
        None => pipeline.run(
            text_only_filter,
            simple_extractor,
            cmap_processor,
            writing_reducer,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_count_never_zero() {
        let options = ExtractOptions::default().with_workers(0);
        assert_eq!(options.worker_count(), 1);
        assert!(ExtractOptions::default().worker_count() >= 1);
    }

    #[test]
    fn test_builder_clamps() {
        let options = ExtractOptions::default()
            .with_queue_capacity(0)
            .with_buffer_size(2);
        assert_eq!(options.queue_capacity, 1);
        assert_eq!(options.buffer_size, END_STREAM.len());
    }
}
