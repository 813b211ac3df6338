//! Object body parsing: dictionaries spanning lines and raw stream bytes.

use crate::error::{PdfError, Result};
use crate::model::document::{PdfObject, PdfStream};
use crate::model::objects::{PdfReference, PdfValue};
use crate::parser::source::ByteSource;
use crate::parser::tokens::{self, TokenCursor};
use crate::parser::values::parse_value;

/// Parse the body of the object at `position`. `header_rest` is whatever
/// followed `obj` on the header line. Consumes input up to and including
/// the line ending in `endobj`.
pub fn parse_object<S: ByteSource>(
    source: &mut S,
    position: PdfReference,
    header_rest: &str,
) -> Result<PdfObject> {
    let mut object = PdfObject::new(position);
    let mut pending = (!header_rest.is_empty()).then(|| header_rest.to_string());

    loop {
        let line = match pending.take() {
            Some(line) => line,
            None => match source.read_line()? {
                Some(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                None => {
                    return Err(PdfError::UnexpectedEndOfInput {
                        line: source.line_number(),
                        context: "object body",
                    });
                }
            },
        };
        if dispatch_line(source, &mut object, line.trim())? {
            return Ok(object);
        }
    }
}

/// Handle one body line. Returns `true` once the object has ended.
fn dispatch_line<S: ByteSource>(
    source: &mut S,
    object: &mut PdfObject,
    line: &str,
) -> Result<bool> {
    if tokens::stream_begins(line) {
        read_stream(source, object)?;
        return Ok(false);
    }
    if tokens::dict_begins(line) {
        let start_line = source.line_number();
        let (tokens, last_line) = tokenize_dict(source, line)?;
        let mut cursor = TokenCursor::new(tokens, start_line);
        match parse_value(&mut cursor)?.into_value() {
            Some(PdfValue::Dict(dict)) => object.set_dict(dict),
            Some(other) => {
                tracing::debug!(
                    object = %object.position(),
                    kind = other.type_name(),
                    "ignoring non-dictionary object body"
                );
            }
            None => {}
        }
        let last_line = last_line.trim_end();
        if tokens::object_ends(last_line) {
            return Ok(true);
        }
        // `>> stream` on the same line as the dictionary end.
        if last_line.ends_with(tokens::STREAM) && !last_line.ends_with(tokens::END_STREAM) {
            read_stream(source, object)?;
        }
        return Ok(false);
    }
    Ok(tokens::object_ends(line))
}

/// Collect tokens from `first` and following lines until `<<` and `>>`
/// balance. Returns the tokens and the last line consumed.
pub fn tokenize_dict<S: ByteSource>(source: &mut S, first: &str) -> Result<(Vec<String>, String)> {
    let mut buffer = tokens::pad_delimiters(first);
    let mut balance = tokens::dict_balance(&buffer);
    let mut last = first.to_string();

    while balance > 0 {
        let bytes = source.read_line()?.ok_or(PdfError::UnexpectedEndOfInput {
            line: source.line_number(),
            context: "dictionary",
        })?;
        let text = String::from_utf8_lossy(&bytes).into_owned();
        let padded = tokens::pad_delimiters(&text);
        balance += tokens::dict_balance(&padded);
        buffer.push(' ');
        buffer.push_str(&padded);
        last = text;
    }
    Ok((tokens::tokenize(&buffer), last))
}

/// Copy bytes one at a time until the next bytes are `endstream`. The
/// terminator is left in the source for the line loop.
pub fn read_stream<S: ByteSource>(source: &mut S, object: &mut PdfObject) -> Result<()> {
    let mut content = Vec::new();
    loop {
        let ahead = source.peek(tokens::END_STREAM.len())?;
        if tokens::stream_ends(ahead) {
            break;
        }
        match source.read_byte()? {
            Some(byte) => content.push(byte),
            None => {
                return Err(PdfError::UnexpectedEndOfInput {
                    line: source.line_number(),
                    context: "stream",
                });
            }
        }
    }
    tracing::trace!(object = %object.position(), bytes = content.len(), "read stream");
    object.set_stream(PdfStream::new(content));
    Ok(())
}
