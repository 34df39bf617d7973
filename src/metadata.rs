use crate::reader::DocumentInfo;

/// Markdown block placed ahead of the body when a container carries metadata.
pub fn format_metadata(info: &DocumentInfo) -> String {
    let mut lines = Vec::new();

    if let Some(title) = &info.title {
        lines.push(format!("# {}", title));
        lines.push(String::new());
    }
    if !info.authors.is_empty() {
        lines.push(format!("**Author:** {}", info.authors.join(", ")));
    }
    if let Some(publisher) = &info.publisher {
        lines.push(format!("**Publisher:** {}", publisher));
    }
    if let Some(language) = &info.language {
        lines.push(format!("**Language:** {}", language));
    }
    if let Some(description) = &info.description {
        lines.push(String::new());
        lines.push(format!("> {}", description));
    }

    if lines.is_empty() {
        return String::new();
    }
    lines.extend([String::new(), "---".to_string(), String::new()]);
    lines.join("\n") + "\n"
}
