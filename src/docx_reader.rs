use crate::docx_markdown;
use crate::document::ParsedDocument;
use crate::error::{ConvertError, Result};
use crate::markdown;
use crate::metadata;
use crate::reader::{DocumentInfo, DocumentReader};
use docx_rust::DocxFile;
use std::path::Path;

/// DOCX has no fixed page layout, so the body is reported as a single page.
pub struct DocxReader;

impl DocumentReader for DocxReader {
    fn name(&self) -> &'static str {
        "docx"
    }

    fn read(&self, path: &Path) -> Result<ParsedDocument> {
        let file = DocxFile::from_file(path).map_err(|e| {
            ConvertError::conversion(format!("Failed to open DOCX: {}", path.display()), e)
        })?;
        let docx = file
            .parse()
            .map_err(|e| ConvertError::conversion("Failed to parse DOCX content", e))?;

        let info = document_info(&docx);
        let body = markdown::clean_markdown(&docx_markdown::docx_to_markdown(&docx));

        let mut md = metadata::format_metadata(&info);
        md.push_str(&body);

        Ok(ParsedDocument::from_markdown_pages(info.title, &[body], md))
    }
}

fn document_info(docx: &docx_rust::Docx<'_>) -> DocumentInfo {
    // Core and App each come in two namespace flavours with identical fields
    let (title, creator, language, description) = match &docx.core {
        Some(docx_rust::core::Core::CoreNamespace(c)) => (
            owned(&c.title),
            owned(&c.creator),
            owned(&c.language),
            owned(&c.description),
        ),
        Some(docx_rust::core::Core::CoreNoNamespace(c)) => (
            owned(&c.title),
            owned(&c.creator),
            owned(&c.language),
            owned(&c.description),
        ),
        None => (None, None, None, None),
    };

    let company = match &docx.app {
        Some(docx_rust::app::App::AppNoApNamespace(a)) => owned(&a.company),
        Some(docx_rust::app::App::AppWithApNamespace(a)) => owned(&a.company),
        None => None,
    };

    DocumentInfo {
        title,
        authors: creator.into_iter().collect(),
        publisher: company,
        language,
        description,
    }
}

fn owned<S: AsRef<str>>(value: &Option<S>) -> Option<String> {
    value.as_ref().map(|v| v.as_ref().to_string())
}
