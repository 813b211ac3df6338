//! Whole-document reader.

use crate::error::Result;
use crate::model::document::Pdf;
use crate::parser::object::parse_object;
use crate::parser::source::{ByteSource, RefreshingReader};
use crate::parser::tokens;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Reads every `N G obj ... endobj` block of a document, in file order.
///
/// Lines outside objects (cross-reference tables, trailers, comments) are
/// skipped, apart from the `%PDF-` header which sets the version. Reading
/// continues past `%%EOF` so incrementally updated files keep their later
/// objects.
pub struct PdfReader<S> {
    name: String,
    source: S,
}

impl PdfReader<RefreshingReader<File>> {
    /// Open a file; the document is named after the path as given.
    pub fn open(path: impl AsRef<Path>, buffer_size: usize) -> Result<Self> {
        let path = path.as_ref();
        let name = document_name(path);
        Ok(Self::new(name, RefreshingReader::open(path, buffer_size)?))
    }
}

impl<R: Read> PdfReader<RefreshingReader<R>> {
    pub fn from_reader(name: impl Into<String>, reader: R, buffer_size: usize) -> Self {
        Self::new(name, RefreshingReader::new(reader, buffer_size))
    }
}

impl<S: ByteSource> PdfReader<S> {
    pub fn new(name: impl Into<String>, source: S) -> Self {
        Self {
            name: name.into(),
            source,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parse the whole input. Structural errors abort with the offending
    /// line number.
    pub fn read_all(mut self) -> Result<Pdf> {
        let mut pdf = Pdf::new(self.name);
        while let Some(bytes) = self.source.read_line()? {
            let line = String::from_utf8_lossy(&bytes);
            let line = line.trim();
            if let Some((position, rest)) = tokens::object_header(line) {
                let object = parse_object(&mut self.source, position, rest)?;
                pdf.append_object(object);
            } else if pdf.version().is_none() && tokens::is_version(line) {
                if let Some(version) = tokens::version_of(line) {
                    pdf.set_version(version);
                }
            }
        }
        tracing::debug!(
            document = pdf.name(),
            version = pdf.version().unwrap_or("unknown"),
            objects = pdf.count(),
            "parsed document"
        );
        Ok(pdf)
    }
}

/// Name of a document read from `path`. Output files are derived from it,
/// so the directory and extension are kept.
pub fn document_name(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
