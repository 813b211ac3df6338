//! Object predicates for the filtering stage.

use crate::model::document::PdfObject;

/// Keep every object.
pub fn identity_filter(_object: &PdfObject) -> bool {
    true
}

/// Keep objects without a `/Type`, which is where page content lives.
pub fn text_only_filter(object: &PdfObject) -> bool {
    object.is_text()
}

/// Keep `/Type /XObject` objects.
pub fn image_only_filter(object: &PdfObject) -> bool {
    object.is_image()
}

/// Keep `/Type /ObjStm` objects.
pub fn objstm_only_filter(object: &PdfObject) -> bool {
    object.is_object_stream()
}
