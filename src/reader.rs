use crate::docx_reader::DocxReader;
use crate::document::ParsedDocument;
use crate::epub_reader::EpubReader;
use crate::error::{ConvertError, Result};
use crate::text_reader::TextReader;
use std::path::Path;

/// Descriptive properties a container format may carry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentInfo {
    pub title: Option<String>,
    pub authors: Vec<String>,
    pub publisher: Option<String>,
    pub language: Option<String>,
    pub description: Option<String>,
}

/// A parser for one family of input formats (EPUB, DOCX, plain text)
pub trait DocumentReader {
    fn name(&self) -> &'static str;
    /// Parse the file into pages and elements, ready for export
    fn read(&self, path: &Path) -> Result<ParsedDocument>;
}

/// Pick a reader from the file extension.
pub fn reader_for(path: &Path) -> Result<Box<dyn DocumentReader>> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "epub" => Ok(Box::new(EpubReader)),
        "docx" => Ok(Box::new(DocxReader)),
        "md" | "markdown" | "txt" => Ok(Box::new(TextReader)),
        "" => Err(ConvertError::UnsupportedFormat("(none)".to_string())),
        other => Err(ConvertError::UnsupportedFormat(format!(".{}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_reader_by_extension() {
        assert_eq!(reader_for(Path::new("book.EPUB")).unwrap().name(), "epub");
        assert_eq!(reader_for(Path::new("a/report.docx")).unwrap().name(), "docx");
        assert_eq!(reader_for(Path::new("notes.md")).unwrap().name(), "text");
        assert_eq!(reader_for(Path::new("notes.txt")).unwrap().name(), "text");
    }

    #[test]
    fn rejects_unknown_extensions() {
        let err = reader_for(Path::new("scan.pdf")).err().unwrap();
        assert_eq!(err.to_string(), "Unsupported document format: .pdf");

        let err = reader_for(Path::new("docs/README")).err().unwrap();
        assert_eq!(err.to_string(), "Unsupported document format: (none)");
    }
}
