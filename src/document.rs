//! Page/element model every backend produces, and the exports built from it.

use crate::error::{ConvertError, Result};
use crate::markdown;
use serde::Serialize;
use std::fmt;

/// Category of a document element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementLabel {
    Title,
    SectionHeader,
    Paragraph,
    ListItem,
    Table,
    Picture,
    Code,
}

impl fmt::Display for ElementLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Title => "title",
            Self::SectionHeader => "section_header",
            Self::Paragraph => "paragraph",
            Self::ListItem => "list_item",
            Self::Table => "table",
            Self::Picture => "picture",
            Self::Code => "code",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    pub label: ElementLabel,
    pub text: String,
}

impl Element {
    pub fn new(label: ElementLabel, text: impl Into<String>) -> Self {
        Self {
            label,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub page_no: usize,
    pub elements: Vec<Element>,
}

/// A document as parsed by a backend.
///
/// Fields a backend cannot provide stay `None` and fall back to fixed values:
/// no title reads as `""`, no page structure reads as one page with no
/// tables or pictures.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParsedDocument {
    pub title: Option<String>,
    pub pages: Option<Vec<Page>>,
    #[serde(skip)]
    pub markdown: String,
    /// Native HTML when the source already is HTML (EPUB chapters)
    #[serde(skip)]
    pub html: Option<String>,
}

impl ParsedDocument {
    /// Build a document whose pages are given as markdown, one string per page.
    pub fn from_markdown_pages<S: AsRef<str>>(
        title: Option<String>,
        page_markdown: &[S],
        markdown: String,
    ) -> Self {
        let pages = page_markdown
            .iter()
            .enumerate()
            .map(|(i, md)| Page {
                page_no: i + 1,
                elements: markdown::extract_elements(md.as_ref()),
            })
            .collect();

        Self {
            title: title.filter(|t| !t.trim().is_empty()),
            pages: Some(pages),
            markdown,
            html: None,
        }
    }

    pub fn with_html(mut self, html: String) -> Self {
        self.html = Some(html);
        self
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    pub fn page_count(&self) -> usize {
        self.pages.as_ref().map_or(1, |p| p.len()).max(1)
    }

    pub fn count_label(&self, label: ElementLabel) -> usize {
        self.pages.as_ref().map_or(0, |pages| {
            pages
                .iter()
                .flat_map(|p| &p.elements)
                .filter(|e| e.label == label)
                .count()
        })
    }

    pub fn export_to_markdown(&self) -> String {
        self.markdown.clone()
    }

    pub fn export_to_html(&self) -> String {
        match &self.html {
            Some(html) => html.clone(),
            None => markdown::render_html(&self.markdown),
        }
    }

    pub fn export_to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ConvertError::conversion("Failed to export document as JSON", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_structure_uses_defaults() {
        let doc = ParsedDocument {
            markdown: "text".into(),
            ..Default::default()
        };
        assert_eq!(doc.title(), "");
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.count_label(ElementLabel::Table), 0);
        assert_eq!(doc.count_label(ElementLabel::Picture), 0);
    }

    #[test]
    fn empty_page_list_still_counts_one_page() {
        let doc = ParsedDocument::from_markdown_pages::<&str>(None, &[], String::new());
        assert_eq!(doc.page_count(), 1);
    }

    #[test]
    fn counts_across_pages() {
        let pages = [
            "# Intro\n\n![cover](img/c.png)\n",
            "| a | b |\n| --- | --- |\n| 1 | 2 |\n\n![x](y.png)\n",
        ];
        let doc = ParsedDocument::from_markdown_pages(Some("Book".into()), &pages, pages.join("\n"));
        assert_eq!(doc.title(), "Book");
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.count_label(ElementLabel::Table), 1);
        assert_eq!(doc.count_label(ElementLabel::Picture), 2);
    }

    #[test]
    fn blank_title_is_dropped() {
        let doc = ParsedDocument::from_markdown_pages(Some("  ".into()), &["x"], "x".into());
        assert_eq!(doc.title, None);
    }

    #[test]
    fn html_export_prefers_native_html() {
        let doc = ParsedDocument::from_markdown_pages(None, &["# Hi"], "# Hi".into());
        assert_eq!(doc.export_to_html(), "<h1>Hi</h1>\n");
        let doc = doc.with_html("<p>native</p>".into());
        assert_eq!(doc.export_to_html(), "<p>native</p>");
    }

    #[test]
    fn json_export_has_labels() {
        let doc = ParsedDocument::from_markdown_pages(Some("T".into()), &["# T\n\n- one\n"], String::new());
        let json: serde_json::Value = serde_json::from_str(&doc.export_to_json().unwrap()).unwrap();
        assert_eq!(json["title"], "T");
        assert_eq!(json["pages"][0]["page_no"], 1);
        assert_eq!(json["pages"][0]["elements"][0]["label"], "title");
        assert_eq!(json["pages"][0]["elements"][1]["label"], "list_item");
        assert_eq!(json["pages"][0]["elements"][1]["text"], "one");
    }
}
