use crate::document::ParsedDocument;
use crate::error::{ConvertError, Result};
use crate::markdown;
use crate::metadata;
use crate::reader::{DocumentInfo, DocumentReader};
use log::debug;
use rbook::prelude::*;
use rbook::Epub;
use std::path::Path;

/// Separator between chapters in the markdown export
const CHAPTER_BREAK: &str = "\n---\n\n";

pub struct EpubReader;

impl DocumentReader for EpubReader {
    fn name(&self) -> &'static str {
        "epub"
    }

    /// Every spine document becomes one page.
    fn read(&self, path: &Path) -> Result<ParsedDocument> {
        let epub = EpubData::open(path)?;
        let info = epub.info();
        let chapters = epub.chapters()?;
        debug!("{}: {} chapters", path.display(), chapters.len());

        let pages: Vec<String> = chapters
            .iter()
            .map(|html| markdown::html_to_markdown(html))
            .collect();

        let mut md = metadata::format_metadata(&info);
        md.push_str(&pages.join(CHAPTER_BREAK));

        Ok(ParsedDocument::from_markdown_pages(info.title, &pages, md).with_html(chapters.join("\n")))
    }
}

struct EpubData {
    epub: Epub,
}

impl EpubData {
    fn open(path: &Path) -> Result<Self> {
        let epub = Epub::options()
            .strict(false)
            .open(path)
            .map_err(|e| {
                ConvertError::conversion(format!("Failed to open EPUB: {}", path.display()), e)
            })?;
        Ok(Self { epub })
    }

    /// Chapter HTML in reading order, skipping blank documents
    fn chapters(&self) -> Result<Vec<String>> {
        let mut chapters = Vec::new();
        let mut reader = self.epub.reader();

        while let Some(result) = reader.read_next() {
            let data =
                result.map_err(|e| ConvertError::conversion("Failed to read chapter content", e))?;
            let html = data.content().to_string();
            if !html.trim().is_empty() {
                chapters.push(html);
            }
        }

        Ok(chapters)
    }

    fn info(&self) -> DocumentInfo {
        let authors = self
            .epub
            .metadata()
            .creators()
            .map(|c| c.value().to_string())
            .collect();

        DocumentInfo {
            title: self.epub.metadata().title().map(|t| t.value().to_string()),
            authors,
            publisher: self.epub.metadata().publishers().next().map(|p| p.value().to_string()),
            language: self.epub.metadata().languages().next().map(|l| l.value().to_string()),
            description: self
                .epub
                .metadata()
                .descriptions()
                .next()
                .map(|d| d.value().to_string()),
        }
    }
}
