//! pdfsift - concurrent text extraction from PDF files.
//!
//! Parses the object structure of a document line by line, decodes stream
//! filters, recovers text from content streams and maps hex-encoded
//! characters through the character maps embedded in the document.

pub mod api;
pub mod codec;
pub mod error;
pub mod font;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod stream;

pub use api::high_level;
pub use api::{ExtractOptions, extract_text, extract_text_from_bytes, extract_text_to_file};
pub use error::{PdfError, Result};
pub use font::cmap::{CMap, CMapEntry, SharedCMap};
pub use model::{Pdf, PdfDict, PdfObject, PdfReference, PdfStream, PdfValue};
pub use parser::PdfReader;
pub use pipeline::{ConcurrentPipeline, ExtractorResult, ProcessorResult};
