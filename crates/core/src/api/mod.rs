//! High-level API module for text extraction.
//!
//! # Example
//!
//! ```ignore
//! use pdfsift_core::api::{ExtractOptions, extract_text};
//!
//! let options = ExtractOptions::default().with_workers(4);
//! let text = extract_text("document.pdf", Some(options))?;
//! ```

pub mod high_level;

pub use high_level::{
    DEFAULT_QUEUE_CAPACITY, ExtractOptions, extract_text, extract_text_from_bytes,
    extract_text_to_file, extract_text_to_writer,
};
