use crate::document::{Element, ElementLabel};
use pulldown_cmark::{html, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

pub fn html_to_markdown(html: &str) -> String {
    clean_markdown(&html2md::parse_html(html))
}

pub fn render_html(md: &str) -> String {
    let mut out = String::new();
    html::push_html(&mut out, Parser::new_ext(md, options()));
    out
}

pub fn clean_markdown(md: &str) -> String {
    let mut result = md.to_string();

    // Collapse 3+ consecutive blank lines to 2
    while result.contains("\n\n\n") {
        result = result.replace("\n\n\n", "\n\n");
    }

    result = result
        .lines()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n");

    let trimmed = result.trim_end().to_string();
    if trimmed.is_empty() {
        String::new()
    } else {
        trimmed + "\n"
    }
}

/// Label the block structure of a markdown page.
///
/// Paragraphs nested in list items or tables are folded into their container.
/// Images become `Picture` elements carrying their alt text.
pub fn extract_elements(md: &str) -> Vec<Element> {
    let mut elements = Vec::new();
    let mut open: Vec<(ElementLabel, String)> = Vec::new();

    for event in Parser::new_ext(md, options()) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                let label = if level == HeadingLevel::H1 {
                    ElementLabel::Title
                } else {
                    ElementLabel::SectionHeader
                };
                open.push((label, String::new()));
            }
            Event::Start(Tag::Paragraph) if open.is_empty() => {
                open.push((ElementLabel::Paragraph, String::new()));
            }
            Event::Start(Tag::Item) => open.push((ElementLabel::ListItem, String::new())),
            Event::Start(Tag::Table(_)) => open.push((ElementLabel::Table, String::new())),
            Event::Start(Tag::CodeBlock(_)) => open.push((ElementLabel::Code, String::new())),
            Event::Start(Tag::Image { .. }) => open.push((ElementLabel::Picture, String::new())),

            Event::End(TagEnd::TableCell) => push_text(&mut open, " | "),
            Event::End(TagEnd::TableHead | TagEnd::TableRow) => push_text(&mut open, "\n"),

            Event::End(
                TagEnd::Heading(_)
                | TagEnd::Item
                | TagEnd::Table
                | TagEnd::CodeBlock
                | TagEnd::Image,
            ) => close(&mut open, &mut elements),
            Event::End(TagEnd::Paragraph) => {
                if matches!(open.last(), Some((ElementLabel::Paragraph, _))) {
                    close(&mut open, &mut elements);
                } else {
                    push_text(&mut open, " ");
                }
            }

            Event::Text(text) | Event::Code(text) => push_text(&mut open, &text),
            Event::SoftBreak | Event::HardBreak => push_text(&mut open, " "),
            Event::TaskListMarker(done) => push_text(&mut open, if done { "[x] " } else { "[ ] " }),
            _ => {}
        }
    }

    elements
}

fn push_text(open: &mut [(ElementLabel, String)], text: &str) {
    if let Some((_, buf)) = open.last_mut() {
        buf.push_str(text);
    }
}

fn close(open: &mut Vec<(ElementLabel, String)>, elements: &mut Vec<Element>) {
    let Some((label, text)) = open.pop() else {
        return;
    };
    let text = text.trim().to_string();
    // Tables and pictures count even when they carry no text
    if text.is_empty() && !matches!(label, ElementLabel::Table | ElementLabel::Picture) {
        return;
    }
    elements.push(Element::new(label, text));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(md: &str) -> Vec<ElementLabel> {
        extract_elements(md).into_iter().map(|e| e.label).collect()
    }

    #[test]
    fn headings_paragraphs_lists() {
        let elements = extract_elements("# Title\n\nIntro text\nwraps.\n\n## Part\n\n- one\n- two\n");
        assert_eq!(
            elements,
            vec![
                Element::new(ElementLabel::Title, "Title"),
                Element::new(ElementLabel::Paragraph, "Intro text wraps."),
                Element::new(ElementLabel::SectionHeader, "Part"),
                Element::new(ElementLabel::ListItem, "one"),
                Element::new(ElementLabel::ListItem, "two"),
            ]
        );
    }

    #[test]
    fn tables_and_images() {
        let md = "| a | b |\n| --- | --- |\n| 1 | 2 |\n\n![logo](logo.png)\n\n```\ncode\n```\n";
        assert_eq!(
            labels(md),
            vec![ElementLabel::Table, ElementLabel::Picture, ElementLabel::Code]
        );
        let table = &extract_elements(md)[0];
        assert!(table.text.contains("a | b"));
    }

    #[test]
    fn image_without_alt_still_counts() {
        assert_eq!(labels("![](x.png)"), vec![ElementLabel::Picture]);
    }

    #[test]
    fn task_items_keep_marker() {
        let elements = extract_elements("- [ ] ship it\n");
        assert_eq!(elements, vec![Element::new(ElementLabel::ListItem, "[ ] ship it")]);
    }

    #[test]
    fn clean_collapses_blank_lines_and_trailing_space() {
        assert_eq!(clean_markdown("a  \n\n\n\n\nb\n\n"), "a\n\nb\n");
        assert_eq!(clean_markdown("  \n\n"), "");
    }

    #[test]
    fn html_round_trips_headings() {
        let md = html_to_markdown("<h1>Chapter One</h1><p>Hello <b>world</b></p>");
        assert!(md.contains("Chapter One"));
        assert!(md.contains("world"));
        assert_eq!(render_html("## Sub"), "<h2>Sub</h2>\n");
    }
}
