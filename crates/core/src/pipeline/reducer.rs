//! Reduce stage: draining per-partition outputs in partition order.

use crate::error::Result;
use crate::model::document::Pdf;
use crate::pipeline::processor::ProcessorResult;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;

/// Output of the mapping stage, one receiver per partition in partition
/// order.
pub type Outputs = Vec<Receiver<ProcessorResult>>;

/// Write every successful, non-empty result to `writer` in partition order.
/// Returns the number of bytes written.
pub fn reduce_into<W: Write>(outputs: Outputs, writer: &mut W) -> Result<usize> {
    let mut written = 0;
    for rx in outputs {
        for result in rx {
            if let Some(error) = &result.error {
                tracing::debug!(object = %result.position, %error, "skipping object");
                continue;
            }
            if result.text.is_empty() {
                continue;
            }
            writer.write_all(&result.text)?;
            written += result.text.len();
        }
    }
    Ok(written)
}

/// Write the text to the document name with `.txt` appended, so a file
/// read from `dir/report.pdf` produces `dir/report.pdf.txt`.
pub fn writing_reducer(outputs: Outputs, pdf: &Pdf) -> Result<PathBuf> {
    write_to(outputs, PathBuf::from(format!("{}.txt", pdf.name())))
}

/// Write the text to `path`, replacing any existing file.
pub fn write_to(outputs: Outputs, path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref().to_path_buf();
    let mut writer = BufWriter::new(File::create(&path)?);
    let written = reduce_into(outputs, &mut writer)?;
    writer.flush()?;
    tracing::info!(path = %path.display(), bytes = written, "wrote text");
    Ok(path)
}

/// Print each result to stdout followed by a newline.
pub fn printing_reducer(outputs: Outputs, _pdf: &Pdf) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for rx in outputs {
        for result in rx {
            if result.error.is_some() || result.text.is_empty() {
                continue;
            }
            out.write_all(&result.text)?;
            out.write_all(b"\n")?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Collect the text into a string; invalid UTF-8 is replaced.
pub fn collecting_reducer(outputs: Outputs, _pdf: &Pdf) -> Result<String> {
    let mut buffer = Vec::new();
    reduce_into(outputs, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
