//! Extraction stage: stream decoding per object.

use crate::error::{PdfError, Result};
use crate::font::cmap::SharedCMap;
use crate::model::document::PdfObject;
use crate::model::objects::PdfReference;
use crate::stream::Extracted;

/// What the extraction stage produced for one object.
#[derive(Debug)]
pub struct ExtractorResult {
    pub position: PdfReference,
    pub text: Vec<u8>,
    pub needs_mapping: bool,
    pub error: Option<PdfError>,
}

impl ExtractorResult {
    pub fn new(position: PdfReference, result: Result<Extracted>) -> Self {
        match result {
            Ok(extracted) => Self {
                position,
                text: extracted.text,
                needs_mapping: extracted.needs_mapping,
                error: None,
            },
            Err(error) => Self {
                position,
                text: Vec::new(),
                needs_mapping: false,
                error: Some(error),
            },
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Decode the object's stream, appending any embedded character map to
/// `cmap`. Failures are carried in the result rather than stopping the
/// pipeline.
pub fn simple_extractor(object: &PdfObject, cmap: &SharedCMap) -> ExtractorResult {
    ExtractorResult::new(object.position(), object.extract_stream(cmap))
}
