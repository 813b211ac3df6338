//! Document parsing.
//!
//! - `source`: buffered byte source with line reads and look-ahead
//! - `tokens`: lexical constants, recognizers, delimiter padding
//! - `values`: recursive value parser
//! - `object`: object bodies, multi-line dictionaries, stream bytes
//! - `reader`: whole-document reader

pub mod object;
pub mod reader;
pub mod source;
pub mod tokens;
pub mod values;

pub use reader::PdfReader;
pub use source::{ByteSource, DEFAULT_BUFFER_SIZE, RefreshingReader};
pub use tokens::TokenCursor;
pub use values::{ContainerEnd, Parsed, parse_value};
