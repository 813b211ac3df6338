//! Document model: values, objects, streams.

pub mod document;
pub mod objects;

pub use document::{Pdf, PdfObject, PdfStream};
pub use objects::{PdfDict, PdfReference, PdfValue};
