//! Text-heuristic converter for environments without the document backends.
//!
//! Works on UTF-8 text only. Metadata is derived from the raw text, never from
//! the converted content, except `text_length`.

use crate::cli::{ConversionRequest, OutputFormat};
use crate::emit;
use crate::envelope::{ConversionResult, Metadata, TextStats};
use crate::error::{ConvertError, Result};
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::json;
use std::borrow::Cow;
use std::fs;
use std::path::Path;

pub const MOCK_MESSAGE: &str =
    "Document processed using the mock converter (use docbridge for full document parsing)";

/// Lines per estimated page
const LINES_PER_PAGE: usize = 50;

static TODO_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"TODO:|Action:|\[ \]").expect("valid TODO pattern"));

/// Entry point of the mock binary: check the path, convert, wrap.
pub fn run(request: &ConversionRequest) -> ConversionResult {
    // An empty path names the working directory; the read reports the failure.
    if !request.file_path.is_empty() && !Path::new(&request.file_path).exists() {
        warn!("{} does not exist", request.file_path);
        return ConversionResult::failure(
            ConvertError::NotFound(request.file_path.clone()),
            &request.file_path,
        );
    }
    convert(request)
}

/// Convert without the existence check; I/O failures become failure envelopes.
pub fn convert(request: &ConversionRequest) -> ConversionResult {
    info!("Mock-converting {} to {}", request.file_path, request.format);
    match read_text(&request.file_path) {
        Ok(text) => convert_text(&text, request),
        Err(e) => {
            warn!("Mock conversion of {} failed: {}", request.file_path, e);
            ConversionResult::failure(e, &request.file_path)
        }
    }
}

fn read_text(path: &str) -> Result<String> {
    Ok(String::from_utf8(fs::read(path)?)?)
}

/// Text-mode reading: `\r\n` and lone `\r` both become `\n`.
pub fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Whitespace for word splitting and line trimming, including the
/// information separators U+001C..U+001F.
fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

fn stripped(line: &str) -> &str {
    line.trim_matches(is_space)
}

/// Pure part of the conversion: same text and format always give the same result.
pub fn convert_text(text: &str, request: &ConversionRequest) -> ConversionResult {
    let text = normalize_newlines(text);
    let text = text.as_ref();
    let content = match request.format {
        OutputFormat::Markdown => text.to_string(),
        OutputFormat::Html => markdown_to_html(text),
        OutputFormat::Json => match emit::to_ascii_json(&json!({ "content": text })) {
            Ok(s) => s,
            Err(e) => return ConversionResult::failure(e, &request.file_path),
        },
    };

    let metadata = analyze(text, &request.file_path);
    debug!(
        "{}: {} words, {} headers, {} todos",
        request.file_path,
        metadata.stats.as_ref().map_or(0, |s| s.word_count),
        metadata.stats.as_ref().map_or(0, |s| s.headers_count),
        metadata.stats.as_ref().map_or(0, |s| s.todos_count),
    );

    ConversionResult::success(content, metadata, request.format).into_mock(MOCK_MESSAGE)
}

/// Literal substitution pass standing in for a Markdown renderer.
///
/// Order matters and is part of the output contract: every `"# "` becomes
/// `<h1>` but only the first newline is closed with `</h1>`; the `<h2>`, `<h3>`
/// and `<li>` passes close every newline.
pub fn markdown_to_html(text: &str) -> String {
    let content = text.replace("# ", "<h1>").replacen('\n', "</h1>\n", 1);
    let content = content.replace("## ", "<h2>").replace('\n', "</h2>\n");
    let content = content.replace("### ", "<h3>").replace('\n', "</h3>\n");
    content.replace("- ", "<li>").replace('\n', "</li>\n")
}

/// Heuristic metadata over the raw text. `text_length` is filled in by the envelope.
pub fn analyze(text: &str, source_file: &str) -> Metadata {
    let text = normalize_newlines(text);
    let text = text.as_ref();
    let lines: Vec<&str> = text.split('\n').collect();

    // `#` is stripped from the raw line, so indented headings keep theirs
    let title = lines
        .iter()
        .find(|line| stripped(line).starts_with('#'))
        .map(|line| line.trim_matches('#').trim_matches(is_space).to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| file_stem(source_file));

    let headers_count = lines.iter().filter(|l| stripped(l).starts_with('#')).count();
    let lists_count = lines
        .iter()
        .filter(|l| stripped(l).starts_with(['-', '*', '+']))
        .count();

    Metadata {
        title,
        page_count: (lines.len() / LINES_PER_PAGE).max(1),
        tables_count: text.matches('|').count(),
        images_count: text.matches("![").count(),
        text_length: 0,
        stats: Some(TextStats {
            word_count: text.split(is_space).filter(|w| !w.is_empty()).count(),
            headers_count,
            lists_count,
            todos_count: TODO_PATTERN.find_iter(text).count(),
        }),
        source_file: source_file.to_string(),
    }
}

fn file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
