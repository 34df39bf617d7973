use crate::document::{ElementLabel, ParsedDocument};
use crate::error::Result;
use crate::markdown;
use crate::reader::DocumentReader;
use std::fs;
use std::path::Path;

/// Markdown and plain text, exported as-is. Title is the first level-1 heading.
pub struct TextReader;

impl DocumentReader for TextReader {
    fn name(&self) -> &'static str {
        "text"
    }

    fn read(&self, path: &Path) -> Result<ParsedDocument> {
        let text = String::from_utf8(fs::read(path)?)?;
        let title = markdown::extract_elements(&text)
            .into_iter()
            .find(|e| e.label == ElementLabel::Title)
            .map(|e| e.text);
        Ok(ParsedDocument::from_markdown_pages(title, &[&text], text.clone()))
    }
}
