//! The JSON result envelope shared by both converters.

use crate::cli::OutputFormat;
use serde::Serialize;

/// Text statistics only the mock converter reports
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TextStats {
    pub word_count: usize,
    pub headers_count: usize,
    pub lists_count: usize,
    pub todos_count: usize,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub title: String,
    pub page_count: usize,
    pub tables_count: usize,
    pub images_count: usize,
    pub text_length: usize,
    #[serde(flatten)]
    pub stats: Option<TextStats>,
    pub source_file: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Success {
    success: bool,
    pub content: String,
    pub metadata: Metadata,
    pub format: OutputFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mock: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    success: bool,
    pub error: String,
    pub source_file: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum ConversionResult {
    Success(Success),
    Failure(Failure),
}

impl ConversionResult {
    /// Build a success envelope. `text_length` is always derived from `content`.
    pub fn success(content: String, mut metadata: Metadata, format: OutputFormat) -> Self {
        metadata.text_length = text_length(&content);
        metadata.page_count = metadata.page_count.max(1);
        Self::Success(Success {
            success: true,
            content,
            metadata,
            format,
            mock: None,
            message: None,
        })
    }

    pub fn failure(error: impl ToString, source_file: impl Into<String>) -> Self {
        Self::Failure(Failure {
            success: false,
            error: error.to_string(),
            source_file: source_file.into(),
        })
    }

    /// Mark a success as produced without the real backends.
    pub fn into_mock(self, message: &str) -> Self {
        match self {
            Self::Success(mut s) => {
                s.mock = Some(true);
                s.message = Some(message.to_string());
                Self::Success(s)
            }
            failure => failure,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn source_file(&self) -> &str {
        match self {
            Self::Success(s) => &s.metadata.source_file,
            Self::Failure(f) => &f.source_file,
        }
    }
}

/// Character count, matching how content length is reported to consumers.
pub fn text_length(content: &str) -> usize {
    content.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn metadata(stats: Option<TextStats>) -> Metadata {
        Metadata {
            title: "Report".into(),
            page_count: 0,
            tables_count: 1,
            images_count: 2,
            text_length: 999,
            stats,
            source_file: "in/report.docx".into(),
        }
    }

    #[test]
    fn success_fixes_length_and_page_floor() {
        let result =
            ConversionResult::success("héllo".into(), metadata(None), OutputFormat::Markdown);
        let ConversionResult::Success(s) = &result else {
            panic!("expected success");
        };
        assert_eq!(s.metadata.text_length, 5);
        assert_eq!(s.metadata.page_count, 1);
        assert_eq!(result.source_file(), "in/report.docx");
    }

    #[test]
    fn real_success_omits_mock_fields() {
        let result = ConversionResult::success("x".into(), metadata(None), OutputFormat::Html);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["success"], Value::Bool(true));
        assert_eq!(json["format"], "html");
        assert!(json.get("mock").is_none());
        assert!(json.get("message").is_none());
        assert!(json["metadata"].get("word_count").is_none());
    }

    #[test]
    fn mock_success_carries_stats_before_source_file() {
        let stats = TextStats {
            word_count: 3,
            headers_count: 1,
            lists_count: 0,
            todos_count: 2,
        };
        let result = ConversionResult::success("x".into(), metadata(Some(stats)), OutputFormat::Json)
            .into_mock("mocked");
        let text = serde_json::to_string(&result).unwrap();
        assert!(text.find("\"todos_count\"").unwrap() < text.find("\"source_file\"").unwrap());
        assert!(text.find("\"text_length\"").unwrap() < text.find("\"word_count\"").unwrap());

        let json: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["mock"], Value::Bool(true));
        assert_eq!(json["message"], "mocked");
        assert_eq!(json["metadata"]["todos_count"], 2);
    }

    #[test]
    fn failure_shape() {
        let result = ConversionResult::failure("boom", "a.md");
        assert!(!result.is_success());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": false, "error": "boom", "source_file": "a.md"})
        );
        // into_mock leaves failures alone
        assert_eq!(result.clone().into_mock("m"), result);
    }
}
