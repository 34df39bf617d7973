//! Real conversion: delegate parsing to a document reader, then export and
//! describe the parsed document.

use crate::cli::{ConversionRequest, OutputFormat};
use crate::document::{ElementLabel, ParsedDocument};
use crate::envelope::{ConversionResult, Metadata};
use crate::error::Result;
use crate::reader::{self, DocumentReader};
use log::{debug, info, warn};
use std::path::Path;

/// Convert with the reader matching the file extension.
///
/// The path is not checked up front; a missing file surfaces as whatever
/// error the reader reports.
pub fn run(request: &ConversionRequest) -> ConversionResult {
    info!("Converting {} to {}", request.file_path, request.format);
    let result = reader::reader_for(Path::new(&request.file_path))
        .and_then(|reader| convert_with(reader.as_ref(), request));

    match result {
        Ok(result) => result,
        Err(e) => {
            warn!("Conversion of {} failed: {}", request.file_path, e);
            ConversionResult::failure(e, &request.file_path)
        }
    }
}

pub fn convert_with(
    reader: &dyn DocumentReader,
    request: &ConversionRequest,
) -> Result<ConversionResult> {
    debug!("Reading {} with the {} reader", request.file_path, reader.name());
    let doc = reader.read(Path::new(&request.file_path))?;
    let content = export(&doc, request.format)?;
    let metadata = describe(&doc, &request.file_path);

    info!(
        "Converted {}: {} pages, {} tables, {} images",
        request.file_path, metadata.page_count, metadata.tables_count, metadata.images_count
    );
    Ok(ConversionResult::success(content, metadata, request.format))
}

fn export(doc: &ParsedDocument, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Markdown => Ok(doc.export_to_markdown()),
        OutputFormat::Html => Ok(doc.export_to_html()),
        OutputFormat::Json => doc.export_to_json(),
    }
}

/// `text_length` is left for the envelope to derive from the content.
fn describe(doc: &ParsedDocument, source_file: &str) -> Metadata {
    Metadata {
        title: doc.title().to_string(),
        page_count: doc.page_count(),
        tables_count: doc.count_label(ElementLabel::Table),
        images_count: doc.count_label(ElementLabel::Picture),
        text_length: 0,
        stats: None,
        source_file: source_file.to_string(),
    }
}
