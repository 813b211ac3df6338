//! Document, object and stream containers.

use crate::error::{PdfError, Result};
use crate::font::cmap::SharedCMap;
use crate::model::objects::{PdfDict, PdfReference, PdfValue};
use crate::parser::tokens::names;
use crate::stream::{self, Extracted};
use bytes::Bytes;

/// A parsed document: its name, version and the objects in file order.
#[derive(Debug, Clone, Default)]
pub struct Pdf {
    name: String,
    version: Option<String>,
    objects: Vec<PdfObject>,
}

impl Pdf {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            objects: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Version from the `%PDF-x.y` header, if one was seen.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn set_version(&mut self, version: impl Into<String>) {
        self.version = Some(version.into());
    }

    pub fn append_object(&mut self, object: PdfObject) {
        self.objects.push(object);
    }

    pub fn count(&self) -> usize {
        self.objects.len()
    }

    pub fn get_object(&self, index: usize) -> Result<&PdfObject> {
        self.objects.get(index).ok_or(PdfError::IndexOutOfRange {
            index,
            count: self.objects.len(),
        })
    }

    pub fn objects(&self) -> &[PdfObject] {
        &self.objects
    }
}

/// One `N G obj ... endobj` block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdfObject {
    position: PdfReference,
    dict: PdfDict,
    stream: Option<PdfStream>,
}

impl PdfObject {
    pub fn new(position: PdfReference) -> Self {
        Self {
            position,
            dict: PdfDict::new(),
            stream: None,
        }
    }

    pub const fn position(&self) -> PdfReference {
        self.position
    }

    pub fn dict(&self) -> &PdfDict {
        &self.dict
    }

    pub fn set_dict(&mut self, dict: PdfDict) {
        self.dict = dict;
    }

    pub fn get(&self, key: &str) -> Option<&PdfValue> {
        self.dict.get(key)
    }

    pub fn stream(&self) -> Option<&PdfStream> {
        self.stream.as_ref()
    }

    pub fn set_stream(&mut self, stream: PdfStream) {
        self.stream = Some(stream);
    }

    /// The `/Type` name, when the dictionary has one.
    pub fn object_type(&self) -> Option<&str> {
        self.get(names::TYPE).and_then(|v| v.as_name().ok())
    }

    pub fn is_image(&self) -> bool {
        self.object_type() == Some(names::XOBJECT)
    }

    /// Objects without a `/Type` are treated as text carriers.
    pub fn is_text(&self) -> bool {
        !self.dict.contains_key(names::TYPE)
    }

    pub fn is_object_stream(&self) -> bool {
        self.object_type() == Some(names::OBJECT_STREAM)
    }

    pub fn is_encoded(&self) -> bool {
        self.dict.contains_key(names::FILTER)
    }

    /// Filter names in application order. `/Filter` may be a single name
    /// or an array of names; anything else yields no filters.
    pub fn filters(&self) -> Vec<&str> {
        match self.get(names::FILTER) {
            Some(PdfValue::Name(name)) => vec![name.as_str()],
            Some(PdfValue::Array(items)) => {
                items.iter().filter_map(|v| v.as_name().ok()).collect()
            }
            _ => Vec::new(),
        }
    }

    /// First filter, if any.
    pub fn encoding(&self) -> Option<&str> {
        self.filters().first().copied()
    }

    /// Decode this object's stream and recover its text.
    pub fn extract_stream(&self, cmap: &SharedCMap) -> Result<Extracted> {
        stream::decode(self, cmap)
    }
}

/// Raw bytes between `stream` and `endstream`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdfStream {
    content: Bytes,
}

impl PdfStream {
    pub fn new(content: impl Into<Bytes>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Decode with the owning object's filters and recover text.
    pub fn extract(&self, object: &PdfObject, cmap: &SharedCMap) -> Result<Extracted> {
        stream::decode_content(object, &self.content, cmap)
    }
}
