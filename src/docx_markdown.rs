//! DOCX body to markdown.
//!
//! Headings come from paragraph style ids, lists from numbering properties.
//! Drawings are written as image references to their package path so they are
//! counted as pictures downstream.

use docx_rust::document::{
    BodyContent, Drawing, Hyperlink, Paragraph, ParagraphContent, Run, RunContent, Table,
    TableCell, TableCellContent, TableRowContent,
};
use docx_rust::formatting::CharacterProperty;
use docx_rust::Docx;
use std::collections::HashMap;

pub fn docx_to_markdown(docx: &Docx) -> String {
    let mut writer = MarkdownWriter {
        docx,
        out: String::new(),
        counters: HashMap::new(),
    };

    for content in &docx.document.body.content {
        writer.body(content);
    }

    writer.out
}

/// Marker for a list item
enum Bullet {
    Dash,
    Ordered(usize),
}

struct MarkdownWriter<'a> {
    docx: &'a Docx<'a>,
    out: String,
    /// Next ordinal per (num_id, level)
    counters: HashMap<(isize, isize), usize>,
}

impl<'a> MarkdownWriter<'a> {
    fn body(&mut self, content: &BodyContent) {
        match content {
            BodyContent::Paragraph(para) => self.paragraph(para),
            BodyContent::Table(table) => self.table(table),
            BodyContent::Sdt(sdt) => {
                if let Some(ref inner) = sdt.content {
                    for item in &inner.content {
                        self.body(item);
                    }
                }
            }
            _ => {}
        }
    }

    fn paragraph(&mut self, para: &Paragraph) {
        let heading = para
            .property
            .as_ref()
            .and_then(|p| p.style_id.as_ref())
            .and_then(|s| heading_level(s.value.as_ref()));

        let numbering = para
            .property
            .as_ref()
            .and_then(|p| p.numbering.as_ref())
            .and_then(|n| match (&n.id, &n.level) {
                (Some(id), Some(level)) => Some((id.value, level.value)),
                _ => None,
            });

        let text = self.inline(para);
        let text = text.trim();

        if let Some(level) = heading {
            self.out.push_str(&format!("{} {}\n\n", "#".repeat(level), text));
        } else if let Some((num_id, level)) = numbering {
            let marker = match self.bullet(num_id, level) {
                Bullet::Dash => "-".to_string(),
                Bullet::Ordered(n) => format!("{}.", n),
            };
            let indent = "  ".repeat(level.max(0) as usize);
            self.out.push_str(&format!("{}{} {}\n", indent, marker, text));
        } else if text.is_empty() {
            self.out.push('\n');
        } else {
            self.out.push_str(text);
            self.out.push_str("\n\n");
        }
    }

    fn inline(&self, para: &Paragraph) -> String {
        let mut result = String::new();

        for pc in &para.content {
            match pc {
                ParagraphContent::Run(run) => {
                    let text = self.run_text(run);
                    if !text.is_empty() {
                        result.push_str(&emphasize(&text, &run.property));
                    }
                }
                ParagraphContent::Link(link) => {
                    let label = link
                        .content
                        .as_ref()
                        .map(|run| self.run_text(run))
                        .unwrap_or_default();
                    match (self.link_target(link), label.is_empty()) {
                        (Some(url), false) => result.push_str(&format!("[{}]({})", label, url)),
                        (Some(url), true) => result.push_str(&url),
                        (None, _) => result.push_str(&label),
                    }
                }
                _ => {}
            }
        }

        result
    }

    fn run_text(&self, run: &Run) -> String {
        let mut text = String::new();

        for rc in &run.content {
            match rc {
                RunContent::Text(t) => text.push_str(&t.text),
                RunContent::Break(_) => text.push('\n'),
                RunContent::Tab(_) => text.push('\t'),
                RunContent::Drawing(drawing) => {
                    if let Some(image) = self.drawing(drawing) {
                        text.push_str(&image);
                    }
                }
                _ => {}
            }
        }

        text
    }

    /// Inline drawings first, then floating anchors
    fn drawing(&self, drawing: &Drawing) -> Option<String> {
        if let Some(ref inline) = drawing.inline {
            if let Some(pic) = inline.graphic.as_ref().and_then(|g| g.data.children.first()) {
                let alt = inline.doc_property.descr.as_deref().unwrap_or("");
                return self.image(pic.fill.blip.embed.as_ref(), alt);
            }
        }

        if let Some(ref anchor) = drawing.anchor {
            if let Some(pic) = anchor.graphic.as_ref().and_then(|g| g.data.children.first()) {
                let alt = anchor.doc_property.descr.as_deref().unwrap_or("");
                return self.image(pic.fill.blip.embed.as_ref(), alt);
            }
        }

        None
    }

    fn relationship_target(&self, id: &str) -> Option<String> {
        self.docx
            .document_rels
            .as_ref()?
            .relationships
            .iter()
            .find(|r| r.id.as_ref() == id)
            .map(|r| r.target.to_string())
    }

    fn image(&self, embed_id: &str, alt: &str) -> Option<String> {
        let target = self.relationship_target(embed_id)?;
        Some(format!("![{}]({})", alt, target))
    }

    fn link_target(&self, link: &Hyperlink) -> Option<String> {
        if let Some(ref anchor) = link.anchor {
            return Some(format!("#{}", anchor));
        }
        link.id
            .as_ref()
            .and_then(|id| self.relationship_target(id.as_ref()))
    }

    fn bullet(&mut self, num_id: isize, level: isize) -> Bullet {
        let Some(format) = self.number_format(num_id, level) else {
            return Bullet::Dash;
        };
        match format.as_str() {
            "decimal" | "upperRoman" | "lowerRoman" | "upperLetter" | "lowerLetter" => {
                let counter = self.counters.entry((num_id, level)).or_insert(0);
                *counter += 1;
                Bullet::Ordered(*counter)
            }
            _ => Bullet::Dash,
        }
    }

    /// Follow num_id to its abstract numbering and read the level's format
    fn number_format(&self, num_id: isize, level: isize) -> Option<String> {
        let numbering = self.docx.numbering.as_ref()?;
        let abstract_id = numbering
            .numberings
            .iter()
            .find(|n| n.num_id == Some(num_id))?
            .abstract_num_id
            .as_ref()?
            .value;

        numbering
            .abstract_numberings
            .iter()
            .filter(|a| a.abstract_num_id == abstract_id)
            .flat_map(|a| a.levels.iter())
            .find(|l| l.i_level == Some(level))?
            .number_format
            .as_ref()
            .map(|f| f.value.to_string())
    }

    fn table(&mut self, table: &Table) {
        let rows: Vec<Vec<String>> = table
            .rows
            .iter()
            .map(|row| {
                row.cells
                    .iter()
                    .filter_map(|c| match c {
                        TableRowContent::TableCell(cell) => Some(self.cell_text(cell)),
                        _ => None,
                    })
                    .collect::<Vec<_>>()
            })
            .filter(|cells| !cells.is_empty())
            .collect();

        self.out.push_str(&pipe_table(&rows));
    }

    fn cell_text(&self, cell: &TableCell) -> String {
        cell.content
            .iter()
            .map(|tc| {
                let TableCellContent::Paragraph(para) = tc;
                self.inline(para).trim().to_string()
            })
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("<br>")
    }
}

/// `Heading1`..`Heading6` in any of Word's spellings, plus Title/Subtitle
fn heading_level(style_id: &str) -> Option<usize> {
    let lower = style_id.to_ascii_lowercase();
    match lower.as_str() {
        "title" => return Some(1),
        "subtitle" => return Some(2),
        _ => {}
    }
    let n: usize = lower.strip_prefix("heading")?.trim().parse().ok()?;
    (1..=6).contains(&n).then_some(n)
}

/// First row is treated as the header
fn pipe_table(rows: &[Vec<String>]) -> String {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    for (i, row) in rows.iter().enumerate() {
        out.push('|');
        for j in 0..width {
            out.push_str(&format!(" {} |", row.get(j).map(String::as_str).unwrap_or("")));
        }
        out.push('\n');
        if i == 0 {
            out.push('|');
            out.push_str(&" --- |".repeat(width));
            out.push('\n');
        }
    }
    out.push('\n');
    out
}

fn emphasize(text: &str, props: &Option<CharacterProperty>) -> String {
    let Some(props) = props else {
        return text.to_string();
    };
    if text.trim().is_empty() {
        return text.to_string();
    }

    let bold = props.bold.as_ref().is_some_and(|b| b.value != Some(false));
    let italic = props.italics.as_ref().is_some_and(|i| i.value != Some(false));
    let strike = props.strike.is_some() || props.dstrike.is_some();

    let text = if strike {
        format!("~~{}~~", text)
    } else {
        text.to_string()
    };
    match (bold, italic) {
        (true, true) => format!("***{}***", text),
        (true, false) => format!("**{}**", text),
        (false, true) => format!("*{}*", text),
        (false, false) => text,
    }
}
