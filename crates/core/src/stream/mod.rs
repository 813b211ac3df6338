//! Stream decoding: filter chain, embedded character maps, text recovery.

pub mod content;

pub use content::recover_text;

use crate::codec::Filter;
use crate::error::{PdfError, Result};
use crate::font::cmap::{CMap, SharedCMap, parse_cmap};
use crate::model::document::PdfObject;
use std::borrow::Cow;

/// Text recovered from one stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extracted {
    /// Recovered bytes; hex runs are kept verbatim with their `<` `>`.
    pub text: Vec<u8>,
    /// Set when at least one hex run needs character mapping.
    pub needs_mapping: bool,
}

/// Decode the object's stream and recover its text.
pub fn decode(object: &PdfObject, cmap: &SharedCMap) -> Result<Extracted> {
    let content = object.stream().map(|s| s.content()).unwrap_or_default();
    decode_content(object, content, cmap)
}

/// Decode `content` using `object`'s filters.
///
/// Empty content is an error. Image streams yield no text. Any
/// `bfchar`/`bfrange` blocks in the decoded bytes are appended to `cmap`.
pub fn decode_content(object: &PdfObject, content: &[u8], cmap: &SharedCMap) -> Result<Extracted> {
    if content.is_empty() {
        return Err(PdfError::EmptyStream);
    }
    if object.is_image() {
        return Ok(Extracted::default());
    }

    let decoded = apply_filters(content, &object.filters())?;

    let mut discovered = CMap::new();
    parse_cmap(&decoded, &mut discovered);
    if !discovered.is_empty() {
        tracing::debug!(
            object = %object.position(),
            entries = discovered.len(),
            "found embedded cmap"
        );
        cmap.extend(discovered);
    }

    Ok(recover_text(&decoded))
}

/// Run `data` through `filters` in order. Filters this crate cannot decode
/// pass the bytes through unchanged.
pub fn apply_filters<'a>(data: &'a [u8], filters: &[&str]) -> Result<Cow<'a, [u8]>> {
    let mut data = Cow::Borrowed(data);
    for name in filters {
        match Filter::from_name(name) {
            Some(filter) => data = Cow::Owned(filter.decode(&data)?),
            None if Filter::is_image_codec(name) => {
                tracing::trace!(filter = *name, "leaving image data encoded");
            }
            None => tracing::debug!(filter = *name, "unknown filter, passing stream through"),
        }
    }
    Ok(data)
}
