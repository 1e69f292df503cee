use anyhow::{anyhow, Result};
use std::io::Write;

use super::ExpandedDocument;

/// Write one expanded document as a corpus line.
pub fn write_document<W: Write>(writer: &mut W, document: &ExpandedDocument) -> Result<()> {
    writeln!(writer, "{}", document)?;
    Ok(())
}

/// Write expanded documents, one line each, and flush.
pub fn write_documents<W: Write>(writer: &mut W, documents: &[ExpandedDocument]) -> Result<()> {
    for document in documents {
        write_document(writer, document)?;
    }

    writer.flush()?;
    Ok(())
}

/// Render expanded documents into a string (useful for tests and snapshots).
pub fn render_documents(documents: &[ExpandedDocument]) -> Result<String> {
    let mut buffer = Vec::new();
    write_documents(&mut buffer, documents)?;
    String::from_utf8(buffer).map_err(|_| anyhow!("rendered corpus is not valid UTF-8"))
}
